use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Counts armed-but-not-yet-fully-dispatched jobs.
///
/// Increments and decrements are atomic with respect to concurrently firing
/// timer callbacks: two timers completing at once cannot both observe a
/// live count of zero, so the drain fires exactly once per run.
///
/// The ledger must be [`seal`](TimerLedger::seal)ed once arming is finished;
/// until then [`drained`](TimerLedger::drained) will not resolve even if the
/// count is momentarily zero. This prevents a spurious shutdown between
/// "no jobs armed yet" and "all jobs armed".
#[derive(Debug, Default)]
pub struct TimerLedger {
    live: AtomicUsize,
    sealed: AtomicBool,
    drained: Notify,
}

impl TimerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one armed timer. Returns the new live count.
    pub fn arm(&self) -> usize {
        self.live.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record one fully-dispatched job (all its sends attempted).
    /// Returns the remaining live count.
    pub fn complete(&self) -> usize {
        let left = self.live.fetch_sub(1, Ordering::SeqCst) - 1;
        if left == 0 && self.sealed.load(Ordering::SeqCst) {
            self.drained.notify_waiters();
        }
        left
    }

    /// Mark arming as finished. From now on a live count of zero means the
    /// run is complete.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::SeqCst);
        if self.live.load(Ordering::SeqCst) == 0 {
            self.drained.notify_waiters();
        }
    }

    /// Current live count.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Resolve once the ledger is sealed and the live count has reached zero.
    pub async fn drained(&self) {
        loop {
            // Register before checking, so a notify between the check and
            // the await is not lost.
            let notified = self.drained.notified();
            if self.sealed.load(Ordering::SeqCst) && self.live.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}
