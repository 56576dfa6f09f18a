use std::sync::atomic::{AtomicI64, Ordering};

use ck_core::ports::ClockPort;

/// Clock that only moves when told to.
pub(crate) struct FixedClock(AtomicI64);

impl FixedClock {
    pub(crate) fn new(now_ms: i64) -> Self {
        Self(AtomicI64::new(now_ms))
    }

    pub(crate) fn set(&self, now_ms: i64) {
        self.0.store(now_ms, Ordering::SeqCst);
    }
}

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
