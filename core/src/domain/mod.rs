//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod platform;
mod record;
mod validate;

// Re-export all domain types
pub use platform::Platform;
pub use record::{ProcessRecord, UNKNOWN_COMMAND};
pub use validate::{is_valid_pid, parse_port};
