//! Error types for bridge operations

use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for bridge operations
///
/// None of these are fatal: every failure degrades to an absent/false
/// result at the call site, plus a transient user notice where the
/// operation calls for one. An interrupted wait surfaces to the caller the
/// same way cancellation does.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The user dismissed the document picker, or the platform denied the
    /// request
    #[error("request cancelled by user")]
    Cancelled,

    /// Opening, reading, or writing the resolved content stream failed
    #[error("content stream error: {0}")]
    Io(#[from] std::io::Error),
}
