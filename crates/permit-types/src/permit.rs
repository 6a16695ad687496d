//! The typed permit message signed off-chain by a token owner or operator.

use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::domain::DomainContext;
use crate::eip712::{Eip712AbiEncoder, PERMIT_TYPE};

/// An off-chain permit authorizing `spender` to act on `token_id`.
///
/// The message is ephemeral: it is built, hashed, and discarded within one
/// verification call. Its validity window is bounded by the nonce matching
/// the ledger's current value for the token and by `deadline` not having
/// passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitMessage {
	/// Beneficiary of the approval grant.
	pub spender: Address,
	/// Token the approval is scoped to.
	pub token_id: U256,
	/// Ledger nonce the signature embeds; stale nonces invalidate it.
	pub nonce: U256,
	/// Absolute expiry as a unix timestamp.
	pub deadline: U256,
}

impl PermitMessage {
	/// Computes the EIP-712 struct hash of this message.
	///
	/// Fields are ABI-encoded as fixed 32-byte words in schema order, with
	/// the permit type hash prepended.
	pub fn struct_hash(&self) -> B256 {
		let type_hash = keccak256(PERMIT_TYPE.as_bytes());
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&type_hash);
		enc.push_address(&self.spender);
		enc.push_u256(self.token_id);
		enc.push_u256(self.nonce);
		enc.push_u256(self.deadline);
		keccak256(enc.finish())
	}

	/// Computes the final signing digest of this message under `domain`.
	pub fn signing_digest(&self, domain: &DomainContext) -> B256 {
		domain.signing_digest(&self.struct_hash())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	fn test_message() -> PermitMessage {
		PermitMessage {
			spender: address!("2222222222222222222222222222222222222222"),
			token_id: U256::from(1),
			nonce: U256::from(1),
			deadline: U256::from(1893456000u64),
		}
	}

	#[test]
	fn test_struct_hash_known_vector() {
		assert_eq!(
			hex::encode(test_message().struct_hash()),
			"400b7f7d516248c26535608815beb9325dbc6ac275dcc41ededa65ab89b75cb2"
		);
	}

	#[test]
	fn test_signing_digest_known_vector() {
		let domain = DomainContext::new(
			"NFTMock",
			"1",
			31337,
			address!("1111111111111111111111111111111111111111"),
		);
		assert_eq!(
			hex::encode(test_message().signing_digest(&domain)),
			"70f3c8617204ab95945fd66a4de0c3ee78171410fd96be59e3a232a3d3e4b840"
		);
	}

	#[test]
	fn test_every_field_changes_the_digest() {
		let domain = DomainContext::new(
			"NFTMock",
			"1",
			31337,
			address!("1111111111111111111111111111111111111111"),
		);
		let base = test_message();
		let variants = [
			PermitMessage {
				spender: address!("3333333333333333333333333333333333333333"),
				..base.clone()
			},
			PermitMessage {
				token_id: U256::from(2),
				..base.clone()
			},
			PermitMessage {
				nonce: U256::from(2),
				..base.clone()
			},
			PermitMessage {
				deadline: U256::from(0),
				..base.clone()
			},
		];
		for variant in variants {
			assert_ne!(variant.signing_digest(&domain), base.signing_digest(&domain));
		}
	}
}
