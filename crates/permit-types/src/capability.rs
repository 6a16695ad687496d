//! Capability identifiers advertised to external callers.
//!
//! Callers probe these 4-byte identifiers before relying on an extension,
//! matching the ERC-165 style introspection the base registry exposes.

use std::fmt;

/// A 4-byte capability (interface) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityId(pub [u8; 4]);

/// Capability introspection itself.
pub const CAPABILITY_INTROSPECTION: CapabilityId = CapabilityId([0x01, 0xff, 0xc9, 0xa7]);
/// Base token-ownership ledger.
pub const CAPABILITY_TOKEN_OWNERSHIP: CapabilityId = CapabilityId([0x80, 0xac, 0x58, 0xcd]);
/// Token metadata surface.
pub const CAPABILITY_TOKEN_METADATA: CapabilityId = CapabilityId([0x5b, 0x5e, 0x13, 0x9f]);
/// The permit extension specified here.
pub const CAPABILITY_PERMIT: CapabilityId = CapabilityId([0x56, 0x04, 0xe2, 0x25]);

impl CapabilityId {
	/// All capabilities this deployment advertises.
	pub const SUPPORTED: [CapabilityId; 4] = [
		CAPABILITY_INTROSPECTION,
		CAPABILITY_TOKEN_OWNERSHIP,
		CAPABILITY_TOKEN_METADATA,
		CAPABILITY_PERMIT,
	];

	/// Returns whether this identifier is one of the advertised capabilities.
	pub fn is_supported(&self) -> bool {
		Self::SUPPORTED.contains(self)
	}
}

impl fmt::Display for CapabilityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_advertised_capabilities() {
		for id in CapabilityId::SUPPORTED {
			assert!(id.is_supported());
		}
		assert!(!CapabilityId([0xff, 0xff, 0xff, 0xff]).is_supported());
	}

	#[test]
	fn test_display_format() {
		assert_eq!(CAPABILITY_PERMIT.to_string(), "0x5604e225");
	}
}
