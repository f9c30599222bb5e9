//! End-to-end resolver tests through the public API, with canned tool output
//! standing in for the operating system.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use portprobe_core::{
    CommandOutput, CommandRunner, CommandSpec, Error, ExecError, Platform, PortResolver,
    ResolverConfig, UNKNOWN_COMMAND,
};

#[derive(Default)]
struct ScriptedRunner {
    replies: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    fn on(mut self, command: &str, exit_code: i32, stdout: &str) -> Self {
        self.replies.insert(
            command.to_string(),
            CommandOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec, _timeout: Duration) -> Result<CommandOutput, ExecError> {
        let line = spec.to_string();
        self.calls.lock().push(line.clone());
        self.replies.get(&line).cloned().ok_or_else(|| ExecError::Spawn {
            program: spec.program.clone(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}

fn resolver(runner: ScriptedRunner, os: &str) -> PortResolver<ScriptedRunner> {
    let config = ResolverConfig {
        proc_root: "/nonexistent-proc-root".into(),
        ..ResolverConfig::default()
    };
    PortResolver::new(runner, Platform::from_os_name(os), config)
}

const NETSTAT_TULNP: &str = "\
Active Internet connections (only servers)
Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
tcp        0      0 0.0.0.0:5432            0.0.0.0:*               LISTEN      812/postgres
tcp        0      0 127.0.0.1:6379          0.0.0.0:*               LISTEN      901/redis-server
";

#[tokio::test]
async fn test_linux_falls_back_to_netstat_and_filters_port() {
    let runner = ScriptedRunner::default()
        .on("netstat -tulnp", 0, NETSTAT_TULNP)
        .on("ps -p 812 -o cmd=", 0, "postgres -D /var/lib/postgresql\n");
    let resolver = resolver(runner, "linux");

    let records = resolver.find_processes_on_port(5432).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pid(), "812");
    assert_eq!(records[0].port(), "5432");
    assert_eq!(records[0].command(), "postgres -D /var/lib/postgresql");

    let calls = resolver.runner().calls();
    assert_eq!(calls[0], "ss -tulnp sport = :5432");
    assert_eq!(calls[1], "netstat -tulnp");
    assert_eq!(calls.iter().filter(|c| c.starts_with("netstat")).count(), 1);
}

#[tokio::test]
async fn test_macos_lsof_exit_one_means_nothing_listening() {
    let runner = ScriptedRunner::default().on("lsof -i tcp:4000 -sTCP:LISTEN -P -n", 1, "");
    let resolver = resolver(runner, "darwin");

    let records = resolver.find_processes_on_port(4000).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(resolver.runner().calls().len(), 1);
}

#[tokio::test]
async fn test_windows_failed_label_lookup_keeps_placeholder() {
    let runner = ScriptedRunner::default().on(
        "netstat -ano",
        0,
        "  TCP    0.0.0.0:8080   0.0.0.0:0    LISTENING       4567\r\n",
    );
    let resolver = resolver(runner, "windows");

    let records = resolver.find_processes_on_port(8080).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pid(), "4567");
    assert_eq!(records[0].command(), UNKNOWN_COMMAND);
}

#[tokio::test]
async fn test_kill_reports_exit_status() {
    let runner = ScriptedRunner::default()
        .on("kill -9 1234", 0, "")
        .on("kill -9 4321", 1, "");
    let resolver = resolver(runner, "linux");

    assert!(resolver.kill_process("1234").await);
    assert!(!resolver.kill_process("4321").await);
    assert!(!resolver.kill_process("0").await);
    assert_eq!(resolver.runner().calls(), vec!["kill -9 1234", "kill -9 4321"]);
}

#[tokio::test]
async fn test_unsupported_platform_runs_nothing() {
    let resolver = resolver(ScriptedRunner::default(), "freebsd");

    let err = resolver.find_processes_on_port(80).await.unwrap_err();

    assert!(matches!(err, Error::UnsupportedPlatform(_)));
    assert!(resolver.runner().calls().is_empty());
}
