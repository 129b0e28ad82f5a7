//! pickbridge-sync - Blocking facade over asynchronous picker callbacks
//!
//! The host platform only offers fire-and-forget document requests whose
//! results arrive later on a different thread. The engine wants blocking
//! calls. This crate is the bridge between the two:
//!
//! - [`ResultLatch`] is the single-slot rendezvous primitive one thread
//!   blocks on while another deposits exactly one outcome
//! - [`FileBridge`] orchestrates the three user-facing operations (save,
//!   load, install-plugin), parking the calling thread on a latch until the
//!   platform's callback resolves the request
//!
//! Every request is correlated by a ticket; a reply for a ticket that is no
//! longer pending (abandoned or already resolved) is discarded rather than
//! executed, so a late platform callback can never write into state nobody
//! owns anymore.

mod bridge;
mod latch;
mod pending;

pub use bridge::FileBridge;
pub use latch::{Outcome, ResultLatch};
