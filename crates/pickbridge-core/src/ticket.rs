//! Request correlation tags
//!
//! Every picker request carries a [`Ticket`]: the request kind plus a
//! monotonically increasing sequence number. The platform echoes the ticket
//! back when it delivers its reply, which is how the bridge finds the
//! matching pending context, and how late replies for abandoned requests
//! are recognized and discarded.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The kind of user-facing file operation behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Create a document and write caller-supplied bytes to it
    Save,
    /// Open a document and read its bytes
    Load,
    /// Open an archive and install its contents
    Install,
}

impl RequestKind {
    /// Short lowercase name, used in correlation tags and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Save => "save",
            RequestKind::Load => "load",
            RequestKind::Install => "install",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlation tag for one in-flight picker request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    kind: RequestKind,
    seq: u64,
}

impl Ticket {
    /// Create a ticket from its parts
    pub fn new(kind: RequestKind, seq: u64) -> Self {
        Self { kind, seq }
    }

    /// The request kind this ticket was issued for
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// The sequence number within the counter that issued this ticket
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.seq)
    }
}

/// Issues tickets with process-unique sequence numbers
#[derive(Debug, Default)]
pub struct TicketCounter {
    next: AtomicU64,
}

impl TicketCounter {
    /// Create a new counter starting at sequence zero
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Issue the next ticket for the given kind
    pub fn issue(&self, kind: RequestKind) -> Ticket {
        Ticket::new(kind, self.next.fetch_add(1, Ordering::SeqCst))
    }
}
