//! In-memory reference implementations of the registry collaborators.
//!
//! These back the demo binary and the test suites. They keep the same
//! observable behavior a host ledger provides: `owner_of` fails for
//! unminted tokens, transfers clear single-token approvals, and wildcard
//! operator approvals are scoped per owner.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use alloy_primitives::{Address, U256};
use permit_types::RoleId;

use crate::{RegistryError, RoleRegistry, TokenRegistry};

#[derive(Debug, Default)]
struct TokenState {
	owners: HashMap<U256, Address>,
	approvals: HashMap<U256, Address>,
	operators: HashSet<(Address, Address)>,
	next_token_id: u64,
}

/// In-memory token-ownership ledger.
#[derive(Debug, Default)]
pub struct InMemoryTokenRegistry {
	state: Mutex<TokenState>,
}

impl InMemoryTokenRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Mints a fresh token to `owner` and returns its identifier.
	///
	/// Identifiers start at 1 and increase by one per mint.
	pub fn mint(&self, owner: Address) -> U256 {
		let mut state = self.state.lock().expect("token registry lock poisoned");
		state.next_token_id += 1;
		let token_id = U256::from(state.next_token_id);
		state.owners.insert(token_id, owner);
		tracing::debug!(%token_id, %owner, "minted token");
		token_id
	}

	/// Grants or revokes `operator`'s blanket approval over `owner`'s tokens.
	pub fn set_approval_for_all(&self, owner: Address, operator: Address, approved: bool) {
		let mut state = self.state.lock().expect("token registry lock poisoned");
		if approved {
			state.operators.insert((owner, operator));
		} else {
			state.operators.remove(&(owner, operator));
		}
	}
}

impl TokenRegistry for InMemoryTokenRegistry {
	fn owner_of(&self, token_id: U256) -> Result<Address, RegistryError> {
		let state = self.state.lock().expect("token registry lock poisoned");
		state
			.owners
			.get(&token_id)
			.copied()
			.ok_or(RegistryError::UnknownToken(token_id))
	}

	fn get_approved(&self, token_id: U256) -> Result<Option<Address>, RegistryError> {
		let state = self.state.lock().expect("token registry lock poisoned");
		if !state.owners.contains_key(&token_id) {
			return Err(RegistryError::UnknownToken(token_id));
		}
		Ok(state.approvals.get(&token_id).copied())
	}

	fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
		let state = self.state.lock().expect("token registry lock poisoned");
		state.operators.contains(&(owner, operator))
	}

	fn approve(&self, spender: Address, token_id: U256) -> Result<(), RegistryError> {
		let mut state = self.state.lock().expect("token registry lock poisoned");
		if !state.owners.contains_key(&token_id) {
			return Err(RegistryError::UnknownToken(token_id));
		}
		state.approvals.insert(token_id, spender);
		Ok(())
	}

	fn safe_transfer(
		&self,
		from: Address,
		to: Address,
		token_id: U256,
		_data: &[u8],
	) -> Result<(), RegistryError> {
		let mut state = self.state.lock().expect("token registry lock poisoned");
		let owner = state
			.owners
			.get(&token_id)
			.copied()
			.ok_or(RegistryError::UnknownToken(token_id))?;
		if owner != from {
			return Err(RegistryError::NotOwner { from, token_id });
		}
		state.owners.insert(token_id, to);
		// Single-token approvals do not survive an ownership change
		state.approvals.remove(&token_id);
		tracing::debug!(%token_id, %from, %to, "transferred token");
		Ok(())
	}
}

/// In-memory role store.
#[derive(Debug, Default)]
pub struct InMemoryRoleRegistry {
	grants: Mutex<HashSet<(RoleId, Address)>>,
}

impl InMemoryRoleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Grants `role` to `account`.
	pub fn grant_role(&self, role: RoleId, account: Address) {
		let mut grants = self.grants.lock().expect("role registry lock poisoned");
		grants.insert((role, account));
	}

	/// Revokes `role` from `account`.
	pub fn revoke_role(&self, role: RoleId, account: Address) {
		let mut grants = self.grants.lock().expect("role registry lock poisoned");
		grants.remove(&(role, account));
	}
}

impl RoleRegistry for InMemoryRoleRegistry {
	fn has_role(&self, role: RoleId, account: Address) -> bool {
		let grants = self.grants.lock().expect("role registry lock poisoned");
		grants.contains(&(role, account))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	const ALICE: Address = address!("00000000000000000000000000000000000000a1");
	const BOB: Address = address!("00000000000000000000000000000000000000b0");

	#[test]
	fn test_mint_and_owner_lookup() {
		let registry = InMemoryTokenRegistry::new();
		let token_id = registry.mint(ALICE);
		assert_eq!(registry.owner_of(token_id), Ok(ALICE));
		assert_eq!(
			registry.owner_of(U256::from(99)),
			Err(RegistryError::UnknownToken(U256::from(99)))
		);
	}

	#[test]
	fn test_transfer_clears_approval() {
		let registry = InMemoryTokenRegistry::new();
		let token_id = registry.mint(ALICE);
		registry.approve(BOB, token_id).unwrap();
		assert_eq!(registry.get_approved(token_id), Ok(Some(BOB)));

		registry.safe_transfer(ALICE, BOB, token_id, &[]).unwrap();
		assert_eq!(registry.owner_of(token_id), Ok(BOB));
		assert_eq!(registry.get_approved(token_id), Ok(None));
	}

	#[test]
	fn test_transfer_rejects_non_owner() {
		let registry = InMemoryTokenRegistry::new();
		let token_id = registry.mint(ALICE);
		assert_eq!(
			registry.safe_transfer(BOB, ALICE, token_id, &[]),
			Err(RegistryError::NotOwner {
				from: BOB,
				token_id
			})
		);
	}

	#[test]
	fn test_operator_approval_scoped_per_owner() {
		let registry = InMemoryTokenRegistry::new();
		registry.set_approval_for_all(ALICE, BOB, true);
		assert!(registry.is_approved_for_all(ALICE, BOB));
		assert!(!registry.is_approved_for_all(BOB, ALICE));
		registry.set_approval_for_all(ALICE, BOB, false);
		assert!(!registry.is_approved_for_all(ALICE, BOB));
	}

	#[test]
	fn test_role_grant_and_revoke() {
		let roles = InMemoryRoleRegistry::new();
		let role = RoleId::from_name("TEST_ROLE");
		assert!(!roles.has_role(role, ALICE));
		roles.grant_role(role, ALICE);
		assert!(roles.has_role(role, ALICE));
		roles.revoke_role(role, ALICE);
		assert!(!roles.has_role(role, ALICE));
	}
}
