//! Generic EIP-712 utilities shared across the permit engine.
//!
//! These helpers provide:
//! - Domain hash computation
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for the static EIP-712 field types used here

use alloy_primitives::{keccak256, Address, B256, U256};

/// EIP-712 domain type string with the full five-field layout.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Type string of the permit message; clients must encode exactly this
/// schema and field order to produce valid signatures.
pub const PERMIT_TYPE: &str =
	"Permit(address spender,uint256 tokenId,uint256 nonce,uint256 deadline)";

/// Compute the EIP-712 domain hash
/// (keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))).
pub fn compute_domain_hash(
	name: &str,
	version: &str,
	chain_id: u64,
	verifying_contract: &Address,
) -> B256 {
	let domain_type_hash = keccak256(DOMAIN_TYPE.as_bytes());
	let name_hash = keccak256(name.as_bytes());
	let version_hash = keccak256(version.as_bytes());
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&domain_type_hash);
	enc.push_b256(&name_hash);
	enc.push_b256(&version_hash);
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_contract);
	keccak256(enc.finish())
}

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for static types used in EIP-712 struct hashing.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_domain_hash_known_vector() {
		let verifying = address!("1111111111111111111111111111111111111111");
		let hash = compute_domain_hash("NFTMock", "1", 31337, &verifying);
		assert_eq!(
			hex::encode(hash),
			"611a82a5b7684ec4b89647f4a5d1438325e2881600f0071b27c95180c4ef8f0f"
		);
	}

	#[test]
	fn test_domain_hash_deterministic() {
		let verifying = address!("1111111111111111111111111111111111111111");
		let a = compute_domain_hash("NFTMock", "1", 31337, &verifying);
		let b = compute_domain_hash("NFTMock", "1", 31337, &verifying);
		assert_eq!(a, b);
	}

	#[test]
	fn test_domain_hash_binds_every_field() {
		let verifying = address!("1111111111111111111111111111111111111111");
		let base = compute_domain_hash("NFTMock", "1", 31337, &verifying);
		let other = address!("2222222222222222222222222222222222222222");
		assert_ne!(base, compute_domain_hash("Other", "1", 31337, &verifying));
		assert_ne!(base, compute_domain_hash("NFTMock", "2", 31337, &verifying));
		assert_ne!(base, compute_domain_hash("NFTMock", "1", 1, &verifying));
		assert_ne!(base, compute_domain_hash("NFTMock", "1", 31337, &other));
	}

	#[test]
	fn test_final_digest_prefix() {
		let domain = B256::repeat_byte(0xaa);
		let strct = B256::repeat_byte(0xbb);
		let mut expected = Vec::new();
		expected.extend_from_slice(&[0x19, 0x01]);
		expected.extend_from_slice(domain.as_slice());
		expected.extend_from_slice(strct.as_slice());
		assert_eq!(compute_final_digest(&domain, &strct), keccak256(expected));
	}
}
