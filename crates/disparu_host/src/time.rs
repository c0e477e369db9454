//! Wall-clock helpers for stamping messages.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[derive(Debug, Default)]
/// Issues strictly increasing millisecond stamps.
///
/// Stamps follow the wall clock but never repeat or go backwards, even when several are issued
/// in the same millisecond or the clock is adjusted.
pub struct MonotonicClock {
    last_ms: Cell<u64>,
}

impl MonotonicClock {
    /// Records a stamp issued elsewhere (e.g. by a previous session) so later stamps sort after it.
    pub fn observe(&self, stamp_ms: u64) {
        if stamp_ms > self.last_ms.get() {
            self.last_ms.set(stamp_ms);
        }
    }

    /// Returns the next stamp.
    pub fn next_stamp_ms(&self) -> u64 {
        let next = unix_time_ms_now().max(self.last_ms.get().saturating_add(1));
        self.last_ms.set(next);
        next
    }
}
