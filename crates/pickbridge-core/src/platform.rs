//! Platform boundary traits
//!
//! The host platform brokers all filesystem access through asynchronous,
//! permission-mediated document flows. These traits describe that boundary:
//! the bridge issues fire-and-forget [`PickerRequest`]s through a
//! [`DocumentPicker`], and the platform later delivers exactly one
//! [`PickerReply`] per ticket on its own callback thread. A resolved
//! [`ContentHandle`] is opaque; only the [`ContentResolver`] can turn it
//! into a byte stream.

use crate::Ticket;
use std::io::{Read, Write};

/// Opaque platform reference to a user-selected file location
///
/// This is not a filesystem path. The locator string is meaningful only to
/// the platform's content resolver, though its trailing segment is usable
/// as a last-resort display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHandle {
    locator: String,
}

impl ContentHandle {
    /// Create a handle from a platform locator string
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
        }
    }

    /// The raw locator string
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// The trailing path segment of the locator, if any
    pub fn trailing_segment(&self) -> Option<&str> {
        self.locator
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }
}

impl std::fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.locator)
    }
}

/// A request handed to the platform's document picker
#[derive(Debug, Clone)]
pub enum PickerRequest {
    /// Ask the user where to create a new document
    Create {
        /// Filename to pre-populate in the picker
        suggested_name: String,
        /// MIME hint for the created document
        content_type: String,
    },
    /// Ask the user to pick an existing document
    Open {
        /// Prompt text shown by the picker
        prompt: String,
        /// MIME filter restricting what can be picked
        content_type: String,
    },
}

/// The platform's eventual answer to a picker request
#[derive(Debug, Clone)]
pub enum PickerReply {
    /// The user selected (or created) a document
    Picked(ContentHandle),
    /// The user dismissed the picker, or the platform denied the request
    Cancelled,
}

/// The platform's document picker, specified at its interface boundary
///
/// `request` must not block: it enqueues the picker flow and returns.
/// The platform later delivers exactly one reply for the ticket by calling
/// back into the bridge from its own thread context.
pub trait DocumentPicker: Send + Sync {
    /// Issue a fire-and-forget picker request correlated by `ticket`
    fn request(&self, ticket: Ticket, request: PickerRequest);
}

/// Turns an opaque content handle into a byte stream
pub trait ContentResolver: Send + Sync {
    /// Open the handle for reading
    fn open_read(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Read + Send>>;

    /// Open the handle for writing, truncating existing content
    fn open_write(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Write + Send>>;

    /// Human-readable original filename for the handle, when the platform
    /// knows one. Callers fall back to the locator's trailing segment.
    fn display_name(&self, handle: &ContentHandle) -> Option<String> {
        let _ = handle;
        None
    }
}

/// Sink for transient, user-visible notices
///
/// Failures in the bridge never propagate as errors to the engine; where an
/// operation calls for it, the user is told through this sink instead.
pub trait NoticeSink: Send + Sync {
    /// Surface a short notice to the user
    fn notice(&self, message: &str);
}

/// Notice sink that routes messages to the tracing pipeline at WARN
///
/// Useful as a default for hosts without a toast/snackbar equivalent.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notice(&self, message: &str) {
        tracing::warn!(target: "pickbridge::notice", "{message}");
    }
}
