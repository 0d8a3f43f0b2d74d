use thiserror::Error;
use tracing::{error, warn};

use crate::story::StoryId;

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
    Internal, // invariant violation, never caused by the user
}

/// Domain-specific errors for the story layer
#[derive(Error, Debug)]
pub enum StoryError {
    #[error("No open story with id {0}")]
    StoryNotFound(StoryId),

    #[error("Unknown story format code: {0}")]
    UnknownStoryFormat(u32),

    #[error("Interpreter spawn failed: {0}")]
    ProcessSpawn(String),

    #[error("An interpreter is already running for this story")]
    AlreadyRunning,
}

impl StoryError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StoryNotFound(_) => ErrorSeverity::Warning,
            Self::UnknownStoryFormat(_) => ErrorSeverity::Internal,
            Self::ProcessSpawn(_) => ErrorSeverity::Error,
            Self::AlreadyRunning => ErrorSeverity::Info,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::StoryNotFound(_) => "The project window is no longer open".to_string(),
            Self::UnknownStoryFormat(code) => {
                format!("Internal error: unrecognised story format {}", code)
            }
            Self::ProcessSpawn(msg) => format!("Could not start the interpreter: {}", msg),
            Self::AlreadyRunning => "The story is already running".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// ```ignore
/// use inform_ide::error::ResultExt;
///
/// let report = registry.destroy(id).log_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Panic in debug mode, log error in release mode.
///
/// Use for "impossible" states that should crash during development
/// but degrade gracefully in production.
///
/// ```ignore
/// debug_panic!("Window {:?} registered twice", window);
/// ```
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            tracing::error!("IMPOSSIBLE STATE: {}", format_args!($($fmt_arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_is_internal() {
        let err = StoryError::UnknownStoryFormat(7);
        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert!(err.user_message().contains('7'));
    }

    #[test]
    fn test_log_err_passes_ok_through() {
        let ok: std::result::Result<u8, StoryError> = Ok(3);
        assert_eq!(ok.log_err(), Some(3));

        let err: std::result::Result<u8, StoryError> = Err(StoryError::AlreadyRunning);
        assert_eq!(err.warn_on_err(), None);
    }
}
