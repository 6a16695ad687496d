//! ECDSA signature recovery over permit digests.

use alloy_primitives::{Address, Signature, B256};

/// Recovers the signer address from a 32-byte digest and a 65-byte
/// `r || s || v` signature.
///
/// Malformed input (wrong length, invalid recovery id, components outside
/// the curve's valid range) yields `None` rather than an error: downstream
/// authorization treats an unrecoverable signature identically to a signer
/// that does not match, producing one uniform denial. A recovered zero
/// address is likewise treated as unrecoverable.
pub fn recover_signer(digest: &B256, signature: &[u8]) -> Option<Address> {
	let signature = Signature::from_raw(signature).ok()?;
	signature
		.recover_address_from_prehash(digest)
		.ok()
		.filter(|address| !address.is_zero())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_signer::SignerSync;
	use alloy_signer_local::PrivateKeySigner;

	#[test]
	fn test_round_trip_recovers_the_signing_key() {
		let signer = PrivateKeySigner::random();
		let digest = B256::repeat_byte(0x42);
		let signature = signer.sign_hash_sync(&digest).unwrap();
		assert_eq!(
			recover_signer(&digest, &signature.as_bytes()),
			Some(signer.address())
		);
	}

	#[test]
	fn test_different_digest_recovers_a_different_address() {
		let signer = PrivateKeySigner::random();
		let signature = signer.sign_hash_sync(&B256::repeat_byte(0x42)).unwrap();
		let recovered = recover_signer(&B256::repeat_byte(0x43), &signature.as_bytes());
		assert_ne!(recovered, Some(signer.address()));
	}

	#[test]
	fn test_malformed_signatures_yield_none() {
		let digest = B256::repeat_byte(0x42);
		assert_eq!(recover_signer(&digest, &[]), None);
		assert_eq!(recover_signer(&digest, &[0u8; 64]), None);
		assert_eq!(recover_signer(&digest, &[0u8; 65]), None);
		// Invalid recovery parameter
		let mut bad = [0x11u8; 65];
		bad[64] = 0x05;
		assert_eq!(recover_signer(&digest, &bad), None);
	}
}
