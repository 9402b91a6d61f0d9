//! Time-derived ids for menu items and testimonials.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Issues ids from the wall clock in milliseconds.
///
/// Ids are strictly increasing per generator: a call landing in the same
/// millisecond as the previous one gets `previous + 1`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }

    /// Next id for which `taken` is false.
    pub fn next_unused(&self, taken: impl Fn(i64) -> bool) -> i64 {
        loop {
            let id = self.next();
            if !taken(id) {
                return id;
            }
        }
    }
}
