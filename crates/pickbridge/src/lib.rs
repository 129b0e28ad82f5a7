//! # pickbridge
//!
//! A synchronous-looking file-access facade for a native game engine hosted
//! on a platform where every filesystem touch is brokered by asynchronous,
//! permission-mediated document picker flows.
//!
//! The engine thread calls three ordinary functions ("save these bytes
//! under this name", "let the user pick a file and give me its bytes", and
//! "let the user pick an archive and install it here") while underneath,
//! each call issues a fire-and-forget platform request and (where the
//! engine needs the result) parks the caller on a single-slot rendezvous
//! until the platform's callback thread deposits the outcome.
//!
//! ## Quick start
//!
//! Implement the three platform traits for your host, then hand them to the
//! bridge:
//!
//! ```ignore
//! use pickbridge::prelude::*;
//! use std::sync::Arc;
//!
//! let bridge = Arc::new(FileBridge::new(picker, resolver, notices));
//!
//! // Engine thread: blocking calls.
//! if let Some(bytes) = bridge.load("Select saved game", "application/octet-stream") {
//!     // ...
//! }
//! bridge.save("snapshot.dat", snapshot_bytes);
//! let ok = bridge.install_plugin("Select plugin archive", &plugins_dir);
//!
//! // Platform callback thread: exactly one reply per ticket.
//! bridge.resolve(ticket, PickerReply::Picked(handle));
//! ```
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports from:
//! - [`pickbridge_core`] - Tickets, platform boundary traits, configuration
//! - [`pickbridge_sync`] - The [`ResultLatch`] rendezvous and [`FileBridge`]
//! - [`pickbridge_installer`] - Archive extraction and layout normalization

// Re-export core types
pub use pickbridge_core::{
    BridgeConfig, BridgeError, BridgeResult, CollisionPolicy, ContentHandle, ContentResolver,
    DocumentPicker, NoticeSink, PickerReply, PickerRequest, RequestKind, Ticket, TicketCounter,
    TracingNotices,
};

// Re-export the bridge and its rendezvous primitive
pub use pickbridge_sync::{FileBridge, Outcome, ResultLatch};

// Re-export the installer
pub use pickbridge_installer::{ArchiveLayout, InstallError, InstallResult, Installer};

// Re-export common dependencies that host implementations need
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use pickbridge::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        BridgeConfig, CollisionPolicy, ContentHandle, ContentResolver, DocumentPicker,
        FileBridge, NoticeSink, PickerReply, PickerRequest, RequestKind, Ticket,
    };
}
