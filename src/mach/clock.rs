use std::cell::Cell;

/// Source of "now" for the `time_ms` sensor. Injected at machine
/// construction so tests can run on a settable clock.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> i64;
}

/// The real clock: epoch milliseconds.
#[derive(Debug, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: Cell<i64>,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock::default()
    }

    pub fn set(&self, ms: i64) {
        self.ms.set(ms);
    }

    pub fn advance(&self, ms: i64) {
        self.ms.set(self.ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.ms.get()
    }
}
