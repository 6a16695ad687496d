//! Common types module for the permit engine.
//!
//! This module defines the core data types and structures shared across the
//! permit subsystem: EIP-712 encoding helpers, the signing domain context,
//! the permit message itself, capability identifiers, and role identifiers.

/// Capability identifiers advertised through the capability query.
pub mod capability;
/// Immutable signing domain bound to one deployment.
pub mod domain;
/// Generic EIP-712 hashing and ABI encoding helpers.
pub mod eip712;
/// The typed permit message and its struct hash.
pub mod permit;
/// Role identifiers consumed from the role registry.
pub mod role;

// Re-export all types for convenient access
pub use capability::{
	CapabilityId, CAPABILITY_INTROSPECTION, CAPABILITY_PERMIT, CAPABILITY_TOKEN_METADATA,
	CAPABILITY_TOKEN_OWNERSHIP,
};
pub use domain::DomainContext;
pub use eip712::{compute_domain_hash, compute_final_digest, Eip712AbiEncoder};
pub use permit::PermitMessage;
pub use role::{RoleId, TRANSFER_WITH_PERMIT_ROLE};
