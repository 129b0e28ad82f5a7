//! Pending request table
//!
//! Each in-flight request owns one entry keyed by its ticket, carrying the
//! scratch payload that travels from issuance to the platform callback (the
//! bytes to save, the latch to wake, the install destination). Removing the
//! entry is what resolves a request: a reply whose ticket is absent finds
//! nothing to act on and is discarded.

use crate::ResultLatch;
use dashmap::DashMap;
use pickbridge_core::Ticket;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-request scratch context
pub(crate) enum PendingOp {
    /// Bytes waiting for a create-document reply
    Save { filename: String, content: Vec<u8> },
    /// A parked caller waiting for picked bytes
    Load { latch: Arc<ResultLatch<Vec<u8>>> },
    /// A parked caller waiting for an archive install
    Install {
        latch: Arc<ResultLatch<PathBuf>>,
        dest_root: PathBuf,
    },
}

/// Concurrent map of in-flight requests
#[derive(Default)]
pub(crate) struct PendingTable {
    ops: DashMap<Ticket, PendingOp>,
}

impl PendingTable {
    pub(crate) fn new() -> Self {
        Self {
            ops: DashMap::new(),
        }
    }

    pub(crate) fn insert(&self, ticket: Ticket, op: PendingOp) {
        self.ops.insert(ticket, op);
    }

    /// Claim the pending context for a ticket, resolving the request.
    pub(crate) fn remove(&self, ticket: Ticket) -> Option<PendingOp> {
        self.ops.remove(&ticket).map(|(_, op)| op)
    }

    /// Claim every pending context at once (the abandonment path).
    pub(crate) fn drain(&self) -> Vec<(Ticket, PendingOp)> {
        let tickets: Vec<Ticket> = self.ops.iter().map(|entry| *entry.key()).collect();
        tickets
            .into_iter()
            .filter_map(|ticket| self.ops.remove(&ticket))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.ops.len()
    }
}
