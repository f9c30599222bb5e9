//! Operating-system family used to pick tools and parsers.

use serde::Serialize;

/// The platform a resolver runs against, decided once and passed around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    /// Anything else, carrying the OS name for error messages.
    Unsupported(String),
}

impl Platform {
    /// The platform this binary was built for.
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS name in `std::env::consts::OS` form to a platform.
    pub fn from_os_name(os: &str) -> Self {
        match os.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            _ => Platform::Unsupported(os.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Platform::Unsupported(_))
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        match self {
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Unsupported(os) => os,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_name() {
        assert_eq!(Platform::from_os_name("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os_name("Darwin"), Platform::MacOs);
        assert_eq!(Platform::from_os_name("linux"), Platform::Linux);
        assert_eq!(Platform::from_os_name("windows"), Platform::Windows);
        assert_eq!(
            Platform::from_os_name("freebsd"),
            Platform::Unsupported("freebsd".to_string())
        );
    }

    #[test]
    fn test_detect_matches_build_target() {
        let platform = Platform::detect();
        if cfg!(any(target_os = "macos", target_os = "linux", target_os = "windows")) {
            assert!(platform.is_supported());
        } else {
            assert!(!platform.is_supported());
        }
    }
}
