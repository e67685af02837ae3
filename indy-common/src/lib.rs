//! Indy Common
//!
//! Shared utilities for the Indy SDK Rust wrapper:
//! - Component-scoped structured logging on top of the `log` facade
//! - The libindy status-code table

pub mod errors;
pub mod logging;

pub use errors::{categorize, describe, ErrorCategory, ErrorCode, UNDEFINED_CODE};
pub use logging::{Component, ComponentKey, LogLevel, Logger, LoggingConfig};
