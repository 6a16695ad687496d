//! Role identifiers consumed from the role registry.

use std::fmt;

use alloy_primitives::{keccak256, B256};
use once_cell::sync::Lazy;

/// A 32-byte role identifier, derived from the role's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub B256);

impl RoleId {
	/// Derives a role identifier from its human-readable name.
	pub fn from_name(name: &str) -> Self {
		Self(keccak256(name.as_bytes()))
	}
}

impl fmt::Display for RoleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Role required to submit the combined approve-and-transfer operation.
///
/// Deployment-wide constant; the gate exists independently of the permit
/// signature, which only proves the owner delegated approval.
pub static TRANSFER_WITH_PERMIT_ROLE: Lazy<RoleId> =
	Lazy::new(|| RoleId::from_name("TRANSFER_WITH_PERMIT_ROLE"));

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_id_known_vector() {
		assert_eq!(
			TRANSFER_WITH_PERMIT_ROLE.to_string(),
			"0x67752a2a818170e6b5a3da16b2ce8efdc282b69f4e51269107b834f4bdf347a1"
		);
	}

	#[test]
	fn test_distinct_names_yield_distinct_roles() {
		assert_ne!(RoleId::from_name("A"), RoleId::from_name("B"));
	}
}
