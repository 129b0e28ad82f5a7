//! The synchronous file-access facade
//!
//! [`FileBridge`] turns the platform's fire-and-forget picker flows into the
//! blocking calls the engine expects. Each operation issues a correlated
//! picker request; `load` and `install_plugin` then park the calling thread
//! on a [`ResultLatch`] until the platform's callback thread deposits the
//! outcome. `save` returns immediately and completes wholly asynchronously.

use crate::latch::{Outcome, ResultLatch};
use crate::pending::{PendingOp, PendingTable};
use pickbridge_core::{
    BridgeConfig, BridgeError, BridgeResult, ContentHandle, ContentResolver, DocumentPicker,
    NoticeSink, PickerReply, PickerRequest, RequestKind, Ticket, TicketCounter,
};
use pickbridge_installer::{Installer, strip_archive_suffix};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Synchronous-looking facade over the platform's asynchronous document
/// flows.
///
/// Requests may overlap freely, including requests of the same kind: each
/// one is isolated under its own ticket. The platform must deliver every
/// reply through [`resolve`](FileBridge::resolve) on its callback thread;
/// replies for abandoned or already-resolved tickets are discarded.
pub struct FileBridge {
    picker: Arc<dyn DocumentPicker>,
    resolver: Arc<dyn ContentResolver>,
    notices: Arc<dyn NoticeSink>,
    config: BridgeConfig,
    tickets: TicketCounter,
    pending: PendingTable,
}

impl FileBridge {
    /// Create a bridge over the given platform collaborators with the
    /// default configuration
    pub fn new(
        picker: Arc<dyn DocumentPicker>,
        resolver: Arc<dyn ContentResolver>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            picker,
            resolver,
            notices,
            config: BridgeConfig::default(),
            tickets: TicketCounter::new(),
            pending: PendingTable::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Number of requests currently awaiting a platform reply
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Save `content` under a user-chosen destination suggested as
    /// `filename`.
    ///
    /// Fire-and-forget: returns as soon as the create-document request is
    /// issued. The bytes are written when the platform callback resolves;
    /// on cancellation, denial, or write failure a user notice is surfaced.
    /// Either way the scratch content is released.
    pub fn save(&self, filename: &str, content: Vec<u8>) {
        let ticket = self.tickets.issue(RequestKind::Save);
        tracing::debug!(%ticket, filename, bytes = content.len(), "requesting document create");
        self.pending.insert(
            ticket,
            PendingOp::Save {
                filename: filename.to_string(),
                content,
            },
        );
        self.picker.request(
            ticket,
            PickerRequest::Create {
                suggested_name: filename.to_string(),
                content_type: self.config.save_content_type.clone(),
            },
        );
    }

    /// Let the user pick a file and return its bytes.
    ///
    /// Blocks the calling thread, with no timeout, until the platform
    /// resolves the picker. Returns the complete contents on success and
    /// `None` on cancellation or read failure; the caller cannot (and need
    /// not) distinguish the two. Never returns a partial read.
    pub fn load(&self, prompt: &str, content_type: &str) -> Option<Vec<u8>> {
        let ticket = self.tickets.issue(RequestKind::Load);
        let latch = Arc::new(ResultLatch::new());
        self.pending.insert(ticket, PendingOp::Load {
            latch: latch.clone(),
        });
        tracing::debug!(%ticket, prompt, "requesting document open");
        self.picker.request(
            ticket,
            PickerRequest::Open {
                prompt: prompt.to_string(),
                content_type: content_type.to_string(),
            },
        );
        latch.wait().into_success()
    }

    /// Let the user pick a plugin archive and install it under `dest_root`.
    ///
    /// Blocks like [`load`](FileBridge::load). Returns `true` only when the
    /// archive was extracted and normalized successfully; partial
    /// extraction after a failure is left on disk.
    pub fn install_plugin(&self, prompt: &str, dest_root: &Path) -> bool {
        let ticket = self.tickets.issue(RequestKind::Install);
        let latch = Arc::new(ResultLatch::new());
        self.pending.insert(ticket, PendingOp::Install {
            latch: latch.clone(),
            dest_root: dest_root.to_path_buf(),
        });
        tracing::debug!(%ticket, prompt, dest = %dest_root.display(), "requesting archive open");
        self.picker.request(
            ticket,
            PickerRequest::Open {
                prompt: prompt.to_string(),
                content_type: self.config.archive_content_type.clone(),
            },
        );
        match latch.wait() {
            Outcome::Success(path) => {
                tracing::debug!(%ticket, path = %path.display(), "plugin install finished");
                true
            }
            Outcome::Failure => false,
            Outcome::Cancelled => {
                tracing::debug!(%ticket, "plugin install cancelled");
                false
            }
        }
    }

    /// Deliver the platform's reply for a ticket.
    ///
    /// Called from the platform's callback thread; all byte I/O and archive
    /// extraction run here, never on the engine thread. A reply whose
    /// ticket is no longer pending (already resolved, or abandoned via
    /// [`abort_all`](FileBridge::abort_all)) is discarded.
    pub fn resolve(&self, ticket: Ticket, reply: PickerReply) {
        let Some(op) = self.pending.remove(ticket) else {
            tracing::warn!(%ticket, "reply for unknown or abandoned request, discarding");
            return;
        };
        tracing::debug!(%ticket, "platform reply received");
        match op {
            PendingOp::Save { filename, content } => {
                self.finish_save(ticket, &filename, &content, reply);
            }
            PendingOp::Load { latch } => {
                latch.complete(self.finish_load(ticket, reply));
            }
            PendingOp::Install { latch, dest_root } => {
                latch.complete(self.finish_install(ticket, reply, &dest_root));
            }
        }
    }

    /// Wake every parked caller with Cancelled and drop all scratch state.
    ///
    /// The abandonment path, e.g. on engine shutdown. Replies that arrive
    /// afterwards hit the ticket fence in [`resolve`](FileBridge::resolve)
    /// and are discarded instead of executed.
    pub fn abort_all(&self) {
        for (ticket, op) in self.pending.drain() {
            tracing::debug!(%ticket, "abandoning pending request");
            match op {
                PendingOp::Save { .. } => {}
                PendingOp::Load { latch } => {
                    latch.cancel();
                }
                PendingOp::Install { latch, .. } => {
                    latch.cancel();
                }
            }
        }
    }

    fn finish_save(&self, ticket: Ticket, filename: &str, content: &[u8], reply: PickerReply) {
        match self.try_save(content, reply) {
            Ok(handle) => {
                tracing::debug!(%ticket, %handle, bytes = content.len(), "file saved");
            }
            Err(err) => {
                // Unlike load, the caller never observes this outcome, so
                // even a plain cancellation surfaces a notice.
                tracing::debug!(%ticket, filename, %err, "save not completed");
                self.notices.notice(&format!("Failed to save \"{filename}\"."));
            }
        }
    }

    fn try_save(&self, content: &[u8], reply: PickerReply) -> BridgeResult<ContentHandle> {
        let handle = picked(reply)?;
        let mut writer = self.resolver.open_write(&handle)?;
        writer.write_all(content)?;
        writer.flush()?;
        Ok(handle)
    }

    fn finish_load(&self, ticket: Ticket, reply: PickerReply) -> Outcome<Vec<u8>> {
        match self.try_read(reply) {
            Ok((handle, bytes)) => {
                tracing::debug!(%ticket, %handle, bytes = bytes.len(), "file loaded");
                Outcome::Success(bytes)
            }
            Err(BridgeError::Cancelled) => {
                tracing::debug!(%ticket, "load cancelled");
                Outcome::Cancelled
            }
            Err(err) => {
                tracing::warn!(%ticket, %err, "load failed");
                self.notices.notice("Failed to read the selected file.");
                Outcome::Failure
            }
        }
    }

    fn finish_install(
        &self,
        ticket: Ticket,
        reply: PickerReply,
        dest_root: &Path,
    ) -> Outcome<PathBuf> {
        let (handle, bytes) = match self.try_read(reply) {
            Ok(pair) => pair,
            Err(BridgeError::Cancelled) => {
                tracing::debug!(%ticket, "install cancelled");
                return Outcome::Cancelled;
            }
            Err(err) => {
                tracing::warn!(%ticket, %err, "reading plugin archive failed");
                self.notices.notice("Failed to read the selected archive.");
                return Outcome::Failure;
            }
        };

        // Prefer the platform's human-readable name, falling back to the
        // locator's trailing segment, then drop the archive suffix.
        let raw_name = self
            .resolver
            .display_name(&handle)
            .or_else(|| handle.trailing_segment().map(str::to_string));
        let display_name = raw_name
            .as_deref()
            .map(strip_archive_suffix)
            .filter(|name| !name.is_empty());

        let installer = Installer::new(dest_root)
            .with_collision_policy(self.config.collision_policy);
        match installer.install(Cursor::new(bytes), display_name) {
            Ok(path) => Outcome::Success(path),
            Err(err) => {
                tracing::warn!(%ticket, %handle, %err, "plugin install failed");
                self.notices.notice(&format!("Plugin install failed: {err}."));
                Outcome::Failure
            }
        }
    }

    /// Read the entire picked document into memory; never a partial read.
    fn try_read(&self, reply: PickerReply) -> BridgeResult<(ContentHandle, Vec<u8>)> {
        let handle = picked(reply)?;
        let mut reader = self.resolver.open_read(&handle)?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok((handle, bytes))
    }
}

fn picked(reply: PickerReply) -> BridgeResult<ContentHandle> {
    match reply {
        PickerReply::Picked(handle) => Ok(handle),
        PickerReply::Cancelled => Err(BridgeError::Cancelled),
    }
}

#[cfg(test)]
#[path = "bridge/bridge_tests.rs"]
mod bridge_tests;
