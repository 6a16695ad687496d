//! Per-token monotonic nonce ledger providing single-use replay protection.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy_primitives::U256;
use thiserror::Error;

/// Nonce value a token starts at when first created.
pub const BASE_NONCE: u64 = 1;

/// The ledger's value moved past the nonce a signature embedded.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("nonce for token {token_id} is {current}, expected {expected}")]
pub struct NonceMismatch {
	pub token_id: U256,
	pub expected: U256,
	pub current: U256,
}

/// Maps each token identifier to a strictly increasing counter.
///
/// Counters start at [`BASE_NONCE`], never decrease, and advance by exactly
/// one per successful ownership-changing operation. The mutex makes the
/// check-and-increment atomic, so two submissions racing to consume the
/// same signature cannot both advance from the same value.
#[derive(Debug, Default)]
pub struct NonceLedger {
	counters: Mutex<HashMap<U256, U256>>,
}

impl NonceLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current nonce for `token_id`.
	pub fn current(&self, token_id: U256) -> U256 {
		let counters = self.counters.lock().expect("nonce ledger lock poisoned");
		counters
			.get(&token_id)
			.copied()
			.unwrap_or(U256::from(BASE_NONCE))
	}

	/// Advances the counter by one, but only if it still equals `expected`.
	///
	/// This is the optimistic check-and-increment guarding permit
	/// consumption: the losing side of a race observes a mismatch and
	/// aborts instead of overwriting.
	pub fn advance_from(&self, token_id: U256, expected: U256) -> Result<(), NonceMismatch> {
		let mut counters = self.counters.lock().expect("nonce ledger lock poisoned");
		let current = counters
			.get(&token_id)
			.copied()
			.unwrap_or(U256::from(BASE_NONCE));
		if current != expected {
			return Err(NonceMismatch {
				token_id,
				expected,
				current,
			});
		}
		counters.insert(token_id, current + U256::from(1));
		Ok(())
	}

	/// Advances the counter by one unconditionally.
	///
	/// Called from the plain ownership-transfer path, where the transfer
	/// itself already happened under the host's serialization and no
	/// signature is being consumed.
	pub fn advance(&self, token_id: U256) {
		let mut counters = self.counters.lock().expect("nonce ledger lock poisoned");
		let current = counters
			.get(&token_id)
			.copied()
			.unwrap_or(U256::from(BASE_NONCE));
		counters.insert(token_id, current + U256::from(1));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_starts_at_base_nonce() {
		let ledger = NonceLedger::new();
		assert_eq!(ledger.current(U256::from(1)), U256::from(BASE_NONCE));
	}

	#[test]
	fn test_advance_from_increments_by_one() {
		let ledger = NonceLedger::new();
		let token = U256::from(1);
		ledger.advance_from(token, U256::from(1)).unwrap();
		assert_eq!(ledger.current(token), U256::from(2));
	}

	#[test]
	fn test_advance_from_rejects_stale_expectation() {
		let ledger = NonceLedger::new();
		let token = U256::from(1);
		ledger.advance_from(token, U256::from(1)).unwrap();
		let err = ledger.advance_from(token, U256::from(1)).unwrap_err();
		assert_eq!(err.expected, U256::from(1));
		assert_eq!(err.current, U256::from(2));
		// The failed attempt must not have moved the counter
		assert_eq!(ledger.current(token), U256::from(2));
	}

	#[test]
	fn test_counters_are_independent_per_token() {
		let ledger = NonceLedger::new();
		ledger.advance(U256::from(1));
		assert_eq!(ledger.current(U256::from(1)), U256::from(2));
		assert_eq!(ledger.current(U256::from(2)), U256::from(BASE_NONCE));
	}
}
