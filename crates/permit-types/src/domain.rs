//! Signing domain bound to one deployment of the token registry.

use alloy_primitives::{Address, B256};

use crate::eip712::{compute_domain_hash, compute_final_digest};

/// Immutable EIP-712 domain context.
///
/// The separator is computed once at construction and reused for every
/// subsequent verification; signatures produced under one context are bound
/// to exactly that deployment (name, version, chain, contract address).
/// Forks and redeployments must construct a fresh context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainContext {
	/// Human-readable name of the registry deployment.
	pub name: String,
	/// Schema version, "1" for the current permit layout.
	pub version: String,
	/// Chain identifier the signatures are scoped to.
	pub chain_id: u64,
	/// Address of the verifying registry contract.
	pub verifying_contract: Address,
	/// Cached domain separator, derived from the fields above.
	separator: B256,
}

impl DomainContext {
	/// Creates a new domain context, computing the separator eagerly.
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		chain_id: u64,
		verifying_contract: Address,
	) -> Self {
		let name = name.into();
		let version = version.into();
		let separator = compute_domain_hash(&name, &version, chain_id, &verifying_contract);
		Self {
			name,
			version,
			chain_id,
			verifying_contract,
			separator,
		}
	}

	/// Returns the cached domain separator.
	pub fn separator(&self) -> B256 {
		self.separator
	}

	/// Combines a struct hash with this domain into the final signing digest.
	pub fn signing_digest(&self, struct_hash: &B256) -> B256 {
		compute_final_digest(&self.separator, struct_hash)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_separator_cached_matches_recomputation() {
		let ctx = DomainContext::new(
			"NFTMock",
			"1",
			31337,
			address!("1111111111111111111111111111111111111111"),
		);
		assert_eq!(
			ctx.separator(),
			compute_domain_hash("NFTMock", "1", 31337, &ctx.verifying_contract)
		);
	}
}
