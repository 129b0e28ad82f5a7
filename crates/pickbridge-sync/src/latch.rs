//! Single-slot result rendezvous

use parking_lot::{Condvar, Mutex};

/// Terminal outcome of one latch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation produced a payload
    Success(T),
    /// The operation failed (I/O error, denial); no payload
    Failure,
    /// The request was cancelled, or the wait was abandoned
    Cancelled,
}

impl<T> Outcome<T> {
    /// Whether this is a success outcome
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The payload, if this is a success outcome
    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure | Outcome::Cancelled => None,
        }
    }
}

struct Slot<T> {
    done: bool,
    outcome: Option<Outcome<T>>,
}

/// Reusable single-slot synchronization point.
///
/// One side blocks in [`wait`](ResultLatch::wait) until the other deposits
/// exactly one [`Outcome`] via [`complete`](ResultLatch::complete). The
/// deposit transitions the latch out of Pending exactly once per cycle; the
/// first writer wins and later deposits in the same cycle are refused. The
/// mutex/condvar pair guarantees the waiter observes the full payload with
/// no torn reads and no lost wakeups.
///
/// Discipline (one waiter and one producer per cycle, `reset` between
/// cycles) is the caller's responsibility; the bridge enforces it by giving
/// each request its own latch.
pub struct ResultLatch<T> {
    slot: Mutex<Slot<T>>,
    cond: Condvar,
}

impl<T> ResultLatch<T> {
    /// Create a latch in the Pending state
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                done: false,
                outcome: None,
            }),
            cond: Condvar::new(),
        }
    }

    /// Restore the latch to Pending, clearing any payload
    pub fn reset(&self) {
        let mut slot = self.slot.lock();
        slot.done = false;
        slot.outcome = None;
    }

    /// Whether no outcome has been deposited this cycle
    pub fn is_pending(&self) -> bool {
        !self.slot.lock().done
    }

    /// Deposit the outcome and wake the waiter.
    ///
    /// Returns `true` if this call performed the Pending → terminal
    /// transition; `false` if the cycle was already completed (the deposit
    /// is dropped).
    pub fn complete(&self, outcome: Outcome<T>) -> bool {
        let mut slot = self.slot.lock();
        if slot.done {
            return false;
        }
        slot.done = true;
        slot.outcome = Some(outcome);
        self.cond.notify_one();
        true
    }

    /// Deposit a Cancelled outcome; the interruption path for a blocked
    /// waiter.
    pub fn cancel(&self) -> bool {
        self.complete(Outcome::Cancelled)
    }

    /// Block until an outcome is deposited, then return it.
    ///
    /// Never returns while the latch is Pending. Blocks with no timeout:
    /// an unanswered request parks the caller until `complete` or `cancel`
    /// runs. A second `wait` in the same cycle is a contract violation and
    /// observes Cancelled instead of blocking forever.
    pub fn wait(&self) -> Outcome<T> {
        let mut slot = self.slot.lock();
        while !slot.done {
            self.cond.wait(&mut slot);
        }
        slot.outcome.take().unwrap_or(Outcome::Cancelled)
    }
}

impl<T> Default for ResultLatch<T> {
    fn default() -> Self {
        Self::new()
    }
}
