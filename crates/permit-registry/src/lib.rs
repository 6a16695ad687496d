//! Collaborator interfaces consumed by the permit engine.
//!
//! The engine never duplicates ownership or role storage; it reads and
//! writes through the traits defined here. The host ledger provides the
//! real implementations; this crate ships in-memory reference
//! implementations so the engine is runnable and testable end to end.
//!
//! All trait methods are synchronous: the engine evaluates within a single
//! serialized call with no suspension points, so collaborators must answer
//! without I/O or blocking on external events.

use alloy_primitives::{Address, U256};
use permit_types::RoleId;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod clock;
	pub mod memory;
}

pub use implementations::clock::{ManualClock, SystemClock};
pub use implementations::memory::{InMemoryRoleRegistry, InMemoryTokenRegistry};

/// Errors that can occur when interacting with the token registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
	/// The token identifier has never been minted.
	#[error("unknown token: {0}")]
	UnknownToken(U256),
	/// A transfer named a `from` address that does not own the token.
	#[error("account {from} does not own token {token_id}")]
	NotOwner { from: Address, token_id: U256 },
}

/// Interface to the base token-ownership ledger.
///
/// Mirrors the surface of an ERC-721 registry: owner lookup, single-token
/// approval, wildcard operator approval, and safe transfer. `owner_of`
/// fails for tokens that do not exist.
pub trait TokenRegistry: Send + Sync {
	/// Returns the current owner of `token_id`.
	fn owner_of(&self, token_id: U256) -> Result<Address, RegistryError>;

	/// Returns the single-token approved spender, if any.
	fn get_approved(&self, token_id: U256) -> Result<Option<Address>, RegistryError>;

	/// Returns whether `operator` holds blanket approval over all of
	/// `owner`'s tokens.
	fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;

	/// Grants `spender` single-token approval on `token_id`.
	fn approve(&self, spender: Address, token_id: U256) -> Result<(), RegistryError>;

	/// Transfers `token_id` from `from` to `to`, clearing any single-token
	/// approval. `data` is forwarded opaquely to receiver hooks.
	fn safe_transfer(
		&self,
		from: Address,
		to: Address,
		token_id: U256,
		data: &[u8],
	) -> Result<(), RegistryError>;
}

/// Interface to the role store gating privileged operations.
pub trait RoleRegistry: Send + Sync {
	/// Returns whether `account` holds `role`.
	fn has_role(&self, role: RoleId, account: Address) -> bool;
}

/// Source of the current time for deadline checks.
///
/// Must be non-decreasing; the host environment's block or wall clock.
pub trait Clock: Send + Sync {
	/// Returns the current unix timestamp in seconds.
	fn current_time(&self) -> u64;
}
