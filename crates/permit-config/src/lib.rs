//! Configuration module for the permit engine.
//!
//! Loads the signing-domain parameters from TOML and validates them before
//! any engine is constructed. Values support environment-variable
//! substitution with `${VAR}` and `${VAR:-default}` syntax.

use std::path::Path;
use std::str::FromStr;

use alloy_primitives::Address;
use permit_types::DomainContext;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration for a permit engine deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// EIP-712 signing domain parameters.
	pub domain: DomainSection,
}

/// Signing-domain section: one deployment, one domain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainSection {
	/// Name of the registry deployment.
	pub name: String,
	/// Permit schema version.
	#[serde(default = "default_version")]
	pub version: String,
	/// Chain identifier signatures are scoped to.
	pub chain_id: u64,
	/// Address of the verifying registry contract, 0x-prefixed hex.
	pub verifying_contract: String,
}

/// Returns the default permit schema version.
fn default_version() -> String {
	"1".to_string()
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the configuration, returning a descriptive error for the
	/// first violated constraint.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.domain.name.is_empty() {
			return Err(ConfigError::Validation(
				"domain.name must not be empty".to_string(),
			));
		}
		if self.domain.version.is_empty() {
			return Err(ConfigError::Validation(
				"domain.version must not be empty".to_string(),
			));
		}
		if self.domain.chain_id == 0 {
			return Err(ConfigError::Validation(
				"domain.chain_id must be non-zero".to_string(),
			));
		}
		self.verifying_contract()?;
		Ok(())
	}

	/// Parses the verifying contract address.
	pub fn verifying_contract(&self) -> Result<Address, ConfigError> {
		Address::from_str(&self.domain.verifying_contract).map_err(|e| {
			ConfigError::Validation(format!(
				"domain.verifying_contract is not a valid address: {}",
				e
			))
		})
	}

	/// Builds the immutable domain context this configuration describes.
	pub fn domain_context(&self) -> Result<DomainContext, ConfigError> {
		Ok(DomainContext::new(
			self.domain.name.clone(),
			self.domain.version.clone(),
			self.domain.chain_id,
			self.verifying_contract()?,
		))
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

/// Resolves `${VAR}` and `${VAR:-default}` references in raw configuration
/// text from the process environment.
fn resolve_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
		.map_err(|e| ConfigError::Parse(format!("invalid env var pattern: {}", e)))?;

	let mut result = String::with_capacity(content.len());
	let mut last_end = 0;
	for caps in re.captures_iter(content) {
		let whole = caps.get(0).expect("capture 0 always present");
		let name = &caps[1];
		let value = match std::env::var(name) {
			Ok(value) => value,
			Err(_) => match caps.get(2) {
				Some(default) => default.as_str().to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"environment variable {} is not set and has no default",
						name
					)))
				}
			},
		};
		result.push_str(&content[last_end..whole.start()]);
		result.push_str(&value);
		last_end = whole.end();
	}
	result.push_str(&content[last_end..]);
	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const VALID: &str = r#"
[domain]
name = "NFTMock"
chain_id = 31337
verifying_contract = "0x1111111111111111111111111111111111111111"
"#;

	#[test]
	fn test_parse_valid_config() {
		let config: Config = VALID.parse().unwrap();
		assert_eq!(config.domain.name, "NFTMock");
		assert_eq!(config.domain.version, "1");
		assert_eq!(config.domain.chain_id, 31337);
		let ctx = config.domain_context().unwrap();
		assert_eq!(ctx.chain_id, 31337);
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(VALID.as_bytes()).unwrap();
		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.domain.name, "NFTMock");
	}

	#[test]
	fn test_zero_chain_id_rejected() {
		let raw = VALID.replace("31337", "0");
		let err = raw.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("chain_id"));
	}

	#[test]
	fn test_bad_address_rejected() {
		let raw = VALID.replace("0x1111111111111111111111111111111111111111", "0x1234");
		let err = raw.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("verifying_contract"));
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("PERMIT_TEST_NAME", "FromEnv");
		let raw = VALID.replace("NFTMock", "${PERMIT_TEST_NAME}");
		let config: Config = raw.parse().unwrap();
		assert_eq!(config.domain.name, "FromEnv");
		std::env::remove_var("PERMIT_TEST_NAME");
	}

	#[test]
	fn test_env_var_with_default() {
		let raw = VALID.replace("NFTMock", "${PERMIT_MISSING_VAR:-Fallback}");
		let config: Config = raw.parse().unwrap();
		assert_eq!(config.domain.name, "Fallback");
	}

	#[test]
	fn test_missing_env_var_error() {
		let raw = VALID.replace("NFTMock", "${PERMIT_MISSING_VAR}");
		let err = raw.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("PERMIT_MISSING_VAR"));
	}
}
