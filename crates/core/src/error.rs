//! Error types for allocator operations.

use thiserror::Error;

use crate::block::Pid;

/// Errors produced by the allocator engine.
///
/// Recoverable errors describe a single rejected event and leave the
/// allocator untouched; the caller may keep feeding events. Non-recoverable
/// errors mean the engine could not be set up or the request itself was
/// malformed.
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// No free block is large enough for the request.
    #[error("Insufficient memory available: requested {requested}, largest free block {largest_free}")]
    InsufficientMemory {
        /// Units asked for.
        requested: usize,
        /// Size of the largest free block at the time of the request.
        largest_free: usize,
    },

    /// No allocated block is owned by the given process.
    #[error("No memory found for PID: {pid}")]
    NotFound {
        /// Owner that was looked up.
        pid: Pid,
    },

    /// The request was malformed before any list was consulted.
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// The allocator itself was configured with unusable parameters.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: String,
    },
}

impl AllocError {
    /// Create an insufficient-memory error.
    pub fn insufficient_memory(requested: usize, largest_free: usize) -> Self {
        Self::InsufficientMemory {
            requested,
            largest_free,
        }
    }

    /// Create a not-found error for `pid`.
    pub fn not_found(pid: Pid) -> Self {
        Self::NotFound { pid }
    }

    /// Create an invalid-request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether the trace may continue after this error.
    ///
    /// A failed allocation or a lookup miss rejects one event and nothing
    /// else; configuration and request errors are caller bugs.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientMemory { .. } | Self::NotFound { .. }
        )
    }
}

/// Result alias for allocator operations.
pub type AllocResult<T> = Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u32) -> Pid {
        Pid::new(raw).expect("nonzero pid")
    }

    #[test]
    fn insufficient_memory_is_recoverable() {
        let err = AllocError::insufficient_memory(50, 20);
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Insufficient memory available: requested 50, largest free block 20"
        );
    }

    #[test]
    fn not_found_is_recoverable() {
        let err = AllocError::not_found(pid(7));
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "No memory found for PID: 7");
    }

    #[test]
    fn config_and_request_errors_are_fatal() {
        assert!(!AllocError::invalid_config("partition size must be at least 1").is_recoverable());
        assert!(!AllocError::invalid_request("allocation size must be at least 1").is_recoverable());
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            AllocError::insufficient_memory(10, 5),
            AllocError::InsufficientMemory {
                requested: 10,
                largest_free: 5
            }
        );
        assert_ne!(
            AllocError::not_found(pid(1)),
            AllocError::not_found(pid(2))
        );
    }
}
