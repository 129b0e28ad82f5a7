//! pickbridge-core - Core types and platform boundary traits
//!
//! This crate provides the foundational types for the pickbridge facade:
//! - [`Ticket`] correlation tags for in-flight picker requests
//! - [`DocumentPicker`], [`ContentResolver`], and [`NoticeSink`] traits that
//!   describe the host platform at its interface boundary
//! - [`BridgeError`] for error handling
//! - [`BridgeConfig`] for bridge configuration

mod config;
mod error;
mod platform;
mod ticket;

pub use config::{BridgeConfig, CollisionPolicy};
pub use error::{BridgeError, BridgeResult};
pub use platform::{
    ContentHandle, ContentResolver, DocumentPicker, NoticeSink, PickerReply, PickerRequest,
    TracingNotices,
};
pub use ticket::{RequestKind, Ticket, TicketCounter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeConfig, BridgeError, BridgeResult, CollisionPolicy, ContentHandle, ContentResolver,
        DocumentPicker, NoticeSink, PickerReply, PickerRequest, RequestKind, Ticket,
    };
}
