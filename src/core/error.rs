//! Error taxonomy for the shared state core.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur in store and scheduler operations
#[derive(Error, Debug)]
pub enum StateError {
    /// Durable state is missing or failed to parse. Fatal at startup unless
    /// the caller explicitly opts into reinitializing with defaults.
    #[error("stored state at {path} is missing or corrupt: {reason}")]
    CorruptState { path: String, reason: String },

    /// Malformed user input. Reported to the caller, state unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The notification sender could not deliver. Logged by the scheduler but
    /// never rolls back the delivered mark (at-most-once semantics).
    #[error("could not deliver notification to {destination}: {reason}")]
    DeliveryFailure { destination: String, reason: String },

    /// The durable write failed. The atomic replace means the on-disk record
    /// is never torn; the in-memory mutation is rolled back by the caller.
    #[error("failed to persist state: {0}")]
    PersistenceFailure(#[from] io::Error),
}

impl StateError {
    pub fn corrupt(path: &Path, reason: impl ToString) -> Self {
        StateError::CorruptState {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        StateError::InvalidArgument(reason.into())
    }
}

pub type Result<T, E = StateError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_state_names_the_path() {
        let err = StateError::corrupt(Path::new("data.json"), "unexpected EOF");
        let msg = err.to_string();
        assert!(msg.contains("data.json"));
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn test_io_error_maps_to_persistence_failure() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "read-only fs");
        let err: StateError = io.into();
        assert!(matches!(err, StateError::PersistenceFailure(_)));
    }
}
