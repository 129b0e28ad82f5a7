//! Error types for plugin installation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for install operations
pub type InstallResult<T> = Result<T, InstallError>;

/// Error type for install operations
///
/// Installation does not roll back: whatever was extracted before the
/// failure is left on disk, and cleanup policy is the caller's concern.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Filesystem error while extracting or rearranging content
    #[error("install I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive is corrupt or not a zip file
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An entry path would escape the extraction root
    #[error("unsafe entry path in archive: {0}")]
    UnsafeEntryPath(String),

    /// The install target already exists and the policy is to fail
    #[error("already installed at {}", .0.display())]
    AlreadyInstalled(PathBuf),
}
