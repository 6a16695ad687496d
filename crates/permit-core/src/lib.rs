//! Permit authorization engine for the token registry.
//!
//! This crate orchestrates digest construction, signature recovery, nonce
//! bookkeeping, and role gating into the delegated-authorization surface:
//! `permit` grants single-token approval from an off-chain signature, and
//! `safe_transfer_from_with_permit` bundles approval and transfer behind a
//! role check on the caller.
//!
//! The engine evaluates within one serialized call per invocation. The only
//! mutable state it owns is the nonce ledger, whose check-and-increment is
//! atomic, so a concurrent host cannot consume the same signature twice.

use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use permit_registry::{Clock, RegistryError, RoleRegistry, TokenRegistry};
use permit_types::{
	CapabilityId, DomainContext, PermitMessage, RoleId, TRANSFER_WITH_PERMIT_ROLE,
};
use thiserror::Error;

pub mod nonce;
pub mod recovery;

pub use nonce::{NonceLedger, BASE_NONCE};
pub use recovery::recover_signer;

/// Errors that can occur during permit operations.
///
/// Bad signatures, mismatched signers, and stale nonces all collapse into
/// [`PermitError::InvalidSignature`]: differentiated denials would let an
/// attacker probe which check failed. The access-control denial is specific
/// because it concerns the caller's own credentials.
#[derive(Debug, Error)]
pub enum PermitError {
	/// The permit's deadline is strictly before the current time.
	#[error("permit deadline {deadline} has expired (current time {now})")]
	ExpiredDeadline { deadline: U256, now: u64 },
	/// The signature did not authorize the operation.
	#[error("invalid permit signature")]
	InvalidSignature,
	/// The caller lacks the role required for the combined operation.
	#[error("account {account} is missing role {role}")]
	AccessDenied { account: Address, role: RoleId },
	/// A collaborator registry rejected the operation.
	#[error("registry error: {0}")]
	Registry(#[from] RegistryError),
}

/// Outcome of a successful signature validation.
///
/// Captures the state the validation was performed against so the mutating
/// paths can advance from exactly the nonce the signature embedded and
/// pre-check the transfer's `from` against the owner they validated.
struct ValidatedPermit {
	nonce: U256,
	owner: Address,
}

/// The permit authorization engine and access-gated dispatcher.
pub struct PermitEngine {
	domain: DomainContext,
	tokens: Arc<dyn TokenRegistry>,
	roles: Arc<dyn RoleRegistry>,
	clock: Arc<dyn Clock>,
	nonces: NonceLedger,
}

impl PermitEngine {
	/// Creates an engine bound to one deployment's domain and collaborators.
	pub fn new(
		domain: DomainContext,
		tokens: Arc<dyn TokenRegistry>,
		roles: Arc<dyn RoleRegistry>,
		clock: Arc<dyn Clock>,
	) -> Self {
		Self {
			domain,
			tokens,
			roles,
			clock,
			nonces: NonceLedger::new(),
		}
	}

	/// Returns the signing domain this engine verifies against.
	pub fn domain(&self) -> &DomainContext {
		&self.domain
	}

	/// Returns the current nonce for `token_id`.
	pub fn current_nonce(&self, token_id: U256) -> U256 {
		self.nonces.current(token_id)
	}

	/// Returns whether this deployment advertises `capability`.
	pub fn supports_capability(&self, capability: CapabilityId) -> bool {
		capability.is_supported()
	}

	/// Builds the permit message a client must sign right now to authorize
	/// `spender` on `token_id` until `deadline`.
	pub fn permit_message(&self, spender: Address, token_id: U256, deadline: U256) -> PermitMessage {
		PermitMessage {
			spender,
			token_id,
			nonce: self.nonces.current(token_id),
			deadline,
		}
	}

	/// Returns the signing digest for the message [`Self::permit_message`]
	/// would build.
	pub fn signing_digest(&self, spender: Address, token_id: U256, deadline: U256) -> B256 {
		self.permit_message(spender, token_id, deadline)
			.signing_digest(&self.domain)
	}

	/// Validates a permit tuple against current owner, approvals, nonce,
	/// and time. Pure with respect to engine state: no nonce movement.
	fn check(
		&self,
		spender: Address,
		token_id: U256,
		deadline: U256,
		signature: &[u8],
	) -> Result<ValidatedPermit, PermitError> {
		let now = self.clock.current_time();
		if deadline < U256::from(now) {
			return Err(PermitError::ExpiredDeadline { deadline, now });
		}

		// Reads may fail for unknown tokens; that is a collaborator error,
		// not a denial.
		let owner = self.tokens.owner_of(token_id)?;
		let approved = self.tokens.get_approved(token_id)?;

		let nonce = self.nonces.current(token_id);
		let message = PermitMessage {
			spender,
			token_id,
			nonce,
			deadline,
		};
		let digest = message.signing_digest(&self.domain);

		let signer = match recover_signer(&digest, signature) {
			Some(signer) => signer,
			None => return Err(PermitError::InvalidSignature),
		};

		// Owner, single-token approved spender, or wildcard operator of the
		// current owner; operator status is read fresh at verification time.
		let authorized = signer == owner
			|| approved == Some(signer)
			|| self.tokens.is_approved_for_all(owner, signer);
		if !authorized {
			tracing::warn!(%token_id, %spender, %signer, "permit denied");
			return Err(PermitError::InvalidSignature);
		}

		Ok(ValidatedPermit { nonce, owner })
	}

	/// Returns whether the permit tuple is currently valid.
	///
	/// Expired and invalid permits answer `false`; collaborator failures
	/// (unknown token) propagate as errors.
	pub fn is_authorized(
		&self,
		spender: Address,
		token_id: U256,
		deadline: U256,
		signature: &[u8],
	) -> Result<bool, PermitError> {
		match self.check(spender, token_id, deadline, signature) {
			Ok(_) => Ok(true),
			Err(PermitError::ExpiredDeadline { .. }) | Err(PermitError::InvalidSignature) => {
				Ok(false)
			}
			Err(err) => Err(err),
		}
	}

	/// Consumes a permit signature, granting `spender` single-token
	/// approval on `token_id`.
	///
	/// All-or-nothing: a failed attempt grants nothing and leaves the nonce
	/// untouched, so a bogus call cannot burn a victim's unused signature.
	pub fn permit(
		&self,
		spender: Address,
		token_id: U256,
		deadline: U256,
		signature: &[u8],
	) -> Result<(), PermitError> {
		let validated = self.check(spender, token_id, deadline, signature)?;

		// The ledger advance is the serialization point: the losing side of
		// a race aborts here before any approval is granted.
		self.nonces
			.advance_from(token_id, validated.nonce)
			.map_err(|_| PermitError::InvalidSignature)?;
		self.tokens.approve(spender, token_id)?;

		tracing::info!(%token_id, %spender, "permit consumed, approval granted");
		Ok(())
	}

	/// Transfers `token_id` from `from` to `to`, advancing the token's
	/// nonce and thereby invalidating all unused signatures issued for it.
	///
	/// This wrapper is the single point in the plain ownership-transfer
	/// path where the ledger advances; hosts routing transfers around the
	/// engine forfeit replay protection. Caller authorization for the
	/// transfer itself belongs to the token registry.
	pub fn safe_transfer_from(
		&self,
		from: Address,
		to: Address,
		token_id: U256,
		data: &[u8],
	) -> Result<(), PermitError> {
		self.tokens.safe_transfer(from, to, token_id, data)?;
		self.nonces.advance(token_id);
		Ok(())
	}

	/// Atomically consumes a permit for `to` and transfers `token_id` from
	/// `from` to `to`.
	///
	/// The caller must hold the transfer-with-permit role; that gate is
	/// evaluated before any signature work and fails naming the caller and
	/// the missing role. Any later failure likewise leaves owner, approval,
	/// and nonce state unchanged.
	pub fn safe_transfer_from_with_permit(
		&self,
		caller: Address,
		from: Address,
		to: Address,
		token_id: U256,
		data: &[u8],
		deadline: U256,
		signature: &[u8],
	) -> Result<(), PermitError> {
		let role = *TRANSFER_WITH_PERMIT_ROLE;
		if !self.roles.has_role(role, caller) {
			return Err(PermitError::AccessDenied {
				account: caller,
				role,
			});
		}

		// The recipient is the spender being authorized.
		let validated = self.check(to, token_id, deadline, signature)?;
		if validated.owner != from {
			return Err(PermitError::Registry(RegistryError::NotOwner {
				from,
				token_id,
			}));
		}

		self.nonces
			.advance_from(token_id, validated.nonce)
			.map_err(|_| PermitError::InvalidSignature)?;
		self.tokens.approve(to, token_id)?;
		self.tokens.safe_transfer(from, to, token_id, data)?;

		tracing::info!(%token_id, %from, %to, %caller, "transfer with permit executed");
		Ok(())
	}
}
