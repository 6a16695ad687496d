//! Command-line entry point for the permit engine.
//!
//! This binary is the composition root: it loads the signing-domain
//! configuration, initializes logging, and exposes the operations clients
//! need when working with permits off-chain — computing signing digests,
//! signing them with a local key, recovering signers, and running a fully
//! wired in-memory demonstration of the permit lifecycle.

use std::path::PathBuf;
use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use clap::{Parser, Subcommand};
use permit_config::Config;
use permit_core::PermitEngine;
use permit_registry::{
	Clock, InMemoryRoleRegistry, InMemoryTokenRegistry, RoleRegistry, SystemClock, TokenRegistry,
};
use permit_types::{PermitMessage, TRANSFER_WITH_PERMIT_ROLE};

/// Command-line arguments for the permit service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the EIP-712 signing digest for a permit tuple.
	Digest {
		/// Beneficiary of the approval grant
		#[arg(long)]
		spender: Address,
		/// Token identifier
		#[arg(long)]
		token_id: U256,
		/// Ledger nonce the signature will embed
		#[arg(long, default_value = "1")]
		nonce: U256,
		/// Expiry as a unix timestamp
		#[arg(long)]
		deadline: U256,
	},
	/// Sign a permit with a local private key and print the signature.
	Sign {
		/// Signing key as 0x-prefixed hex
		#[arg(long, env = "PERMIT_PRIVATE_KEY")]
		private_key: String,
		#[arg(long)]
		spender: Address,
		#[arg(long)]
		token_id: U256,
		#[arg(long, default_value = "1")]
		nonce: U256,
		#[arg(long)]
		deadline: U256,
	},
	/// Recover and print the signer of a digest and signature.
	Recover {
		/// 32-byte digest as 0x-prefixed hex
		#[arg(long)]
		digest: B256,
		/// 65-byte signature as 0x-prefixed hex
		#[arg(long)]
		signature: String,
	},
	/// Run the permit lifecycle end to end over in-memory collaborators.
	Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};
	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
	fmt().with_env_filter(env_filter).with_target(true).init();

	let config = Config::from_file(&args.config)?;
	let domain = config.domain_context()?;
	tracing::info!(name = %domain.name, chain_id = domain.chain_id, "loaded signing domain");

	match args.command {
		Command::Digest {
			spender,
			token_id,
			nonce,
			deadline,
		} => {
			let message = PermitMessage {
				spender,
				token_id,
				nonce,
				deadline,
			};
			let digest = message.signing_digest(&domain);
			println!(
				"{}",
				serde_json::json!({
					"message": message,
					"domain_separator": domain.separator().to_string(),
					"digest": digest.to_string(),
				})
			);
		}
		Command::Sign {
			private_key,
			spender,
			token_id,
			nonce,
			deadline,
		} => {
			let signer: PrivateKeySigner = private_key.parse()?;
			let message = PermitMessage {
				spender,
				token_id,
				nonce,
				deadline,
			};
			let digest = message.signing_digest(&domain);
			let signature = signer.sign_hash_sync(&digest)?;
			println!(
				"{}",
				serde_json::json!({
					"signer": signer.address().to_string(),
					"digest": digest.to_string(),
					"signature": format!("0x{}", hex::encode(signature.as_bytes())),
				})
			);
		}
		Command::Recover { digest, signature } => {
			let raw = hex::decode(signature.trim_start_matches("0x"))?;
			match permit_core::recover_signer(&digest, &raw) {
				Some(signer) => println!(
					"{}",
					serde_json::json!({ "signer": signer.to_string() })
				),
				None => println!("{}", serde_json::json!({ "signer": serde_json::Value::Null })),
			}
		}
		Command::Demo => run_demo(domain)?,
	}

	Ok(())
}

/// Wires the engine over in-memory collaborators and walks a permit plus a
/// transfer-with-permit through it, logging each step.
fn run_demo(domain: permit_types::DomainContext) -> Result<(), Box<dyn std::error::Error>> {
	let tokens = Arc::new(InMemoryTokenRegistry::new());
	let roles = Arc::new(InMemoryRoleRegistry::new());
	let clock = Arc::new(SystemClock::new());
	let engine = PermitEngine::new(
		domain,
		Arc::clone(&tokens) as Arc<dyn TokenRegistry>,
		Arc::clone(&roles) as Arc<dyn RoleRegistry>,
		Arc::clone(&clock) as Arc<dyn Clock>,
	);

	let owner = PrivateKeySigner::random();
	let recipient = PrivateKeySigner::random();
	let deadline = U256::from(clock.current_time() + 600);

	let token_id = tokens.mint(owner.address());
	tracing::info!(%token_id, owner = %owner.address(), "minted demo token");

	// Owner signs a permit for the recipient, who redeems it for approval.
	let digest = engine.signing_digest(recipient.address(), token_id, deadline);
	let signature = owner.sign_hash_sync(&digest)?.as_bytes().to_vec();
	engine.permit(recipient.address(), token_id, deadline, &signature)?;
	let approved = tokens.get_approved(token_id)?;
	tracing::info!(
		?approved,
		nonce = %engine.current_nonce(token_id),
		"permit redeemed"
	);

	// A second signature (fresh nonce) drives the role-gated transfer.
	roles.grant_role(*TRANSFER_WITH_PERMIT_ROLE, recipient.address());
	let digest = engine.signing_digest(recipient.address(), token_id, deadline);
	let signature = owner.sign_hash_sync(&digest)?.as_bytes().to_vec();
	engine.safe_transfer_from_with_permit(
		recipient.address(),
		owner.address(),
		recipient.address(),
		token_id,
		&[],
		deadline,
		&signature,
	)?;
	let new_owner = tokens.owner_of(token_id)?;
	tracing::info!(
		%new_owner,
		nonce = %engine.current_nonce(token_id),
		"transfer with permit complete"
	);

	Ok(())
}
