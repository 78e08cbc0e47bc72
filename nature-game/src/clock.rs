//! Millisecond wall clocks used to stamp feeds, waterings, badges and saves.
use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Clock;

/// Clock backed by the host operating system.
///
/// # Panics
/// Reading it panics on `wasm32-unknown-unknown`, which has no system time.
/// Browser builds pass a host clock such as `nature_web::JsClock` to
/// [`crate::GameStore::with_clock`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}

/// Manually driven clock. Clones share the same instant, so a test can keep a
/// handle after moving one into a [`crate::GameStore`].
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Rc<Cell<u64>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
