//! Clock implementations for deadline evaluation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Clock;

/// Wall-clock time from the host environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
	pub fn new() -> Self {
		Self
	}
}

impl Clock for SystemClock {
	fn current_time(&self) -> u64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or(0)
	}
}

/// Manually advanced clock for tests and demos.
///
/// Only moves forward; `advance` saturates rather than wrapping.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: AtomicU64,
}

impl ManualClock {
	/// Creates a clock fixed at `now` until advanced.
	pub fn new(now: u64) -> Self {
		Self {
			now: AtomicU64::new(now),
		}
	}

	/// Moves the clock forward by `seconds`.
	pub fn advance(&self, seconds: u64) {
		self.now.fetch_add(seconds, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn current_time(&self) -> u64 {
		self.now.load(Ordering::SeqCst)
	}
}
