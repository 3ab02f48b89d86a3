// libs/shared/utils/src/clock.rs

use chrono::{Local, NaiveDateTime};

/// Injectable "now" provider. Slot generation, booking, and availability
/// queries all go through this seam instead of reading the wall clock, so
/// time-dependent behavior stays testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock implementation. Slots are identified by local datetimes, so the
/// system clock reports local time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed-instant clock for tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
