use indy_common::{categorize, describe, ErrorCategory, ErrorCode, UNDEFINED_CODE};
use thiserror::Error;

/// Errors returned by every wrapper operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndyError {
    /// A required argument was empty; no native call was made
    #[error("{field} must be specified")]
    MissingArgument { field: &'static str },

    /// An argument could not be marshaled for the native call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The native entry point refused the command; no callback will fire
    #[error("{message}")]
    Rejected { code: i32, message: String },

    /// The command completed with a non-zero status
    #[error("{message}")]
    Failed { code: i32, message: String },

    /// The completion payload could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The command was dropped without a completion being delivered
    #[error("Command completion was never delivered")]
    Disconnected,
}

impl IndyError {
    /// Error for a non-zero immediate return status
    pub fn rejected(code: i32) -> Self {
        IndyError::Rejected {
            code,
            message: describe(code),
        }
    }

    /// Error for a non-zero callback status
    pub fn failed(code: i32) -> Self {
        IndyError::Failed {
            code,
            message: describe(code),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        IndyError::MissingArgument { field }
    }

    /// Native status carried by this error, or [`UNDEFINED_CODE`] when the
    /// error did not come from the native library
    pub fn code(&self) -> i32 {
        match self {
            IndyError::Rejected { code, .. } | IndyError::Failed { code, .. } => *code,
            _ => UNDEFINED_CODE,
        }
    }

    /// Typed status when it is part of the known table
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.code())
    }

    pub fn category(&self) -> ErrorCategory {
        categorize(self.code())
    }

    /// True when the error carries the given native status
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code() == code.code()
    }
}

/// Result type for wrapper operations
pub type Result<T> = std::result::Result<T, IndyError>;
