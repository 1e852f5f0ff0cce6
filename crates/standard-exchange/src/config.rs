//! Configuration loading from files and environment.

use serde::Deserialize;
use standard_types::Address;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Config file not found: {0}")]
	FileNotFound(String),
	#[error("Failed to parse config: {0}")]
	ParseError(String),
	#[error("Invalid configuration: {0}")]
	ValidationError(String),
	#[error("Environment variable not set: {0}")]
	EnvVarNotFound(String),
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

fn default_gas_limit() -> u64 {
	crate::encode::DEFAULT_GAS_LIMIT
}

fn default_confirmation_timeout_secs() -> u64 {
	120
}

/// Client configuration.
///
/// `rpc_url`, `private_key` and `api_key` values may reference environment
/// variables as `${VAR_NAME}`; these are resolved at load time so secrets
/// stay out of checked-in config files.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
	/// HTTP JSON-RPC endpoint.
	pub rpc_url: String,
	pub chain_id: u64,
	/// Hex-encoded signing key, with or without `0x` prefix.
	pub private_key: String,
	/// Matching-engine contract address.
	pub matching_engine: Address,
	/// Exchange REST API base URL, for metadata bootstrap.
	#[serde(default)]
	pub api_url: Option<String>,
	#[serde(default)]
	pub api_key: Option<String>,
	/// Default gas limit per transaction.
	#[serde(default = "default_gas_limit")]
	pub gas_limit: u64,
	/// Fixed gas price in wei. Unset means fetch from the node per
	/// transaction.
	#[serde(default)]
	pub gas_price: Option<u128>,
	#[serde(default = "default_confirmation_timeout_secs")]
	pub confirmation_timeout_secs: u64,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from a TOML file
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}

		let contents = std::fs::read_to_string(path)?;
		Self::from_toml(&contents)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<ClientConfig, ConfigError> {
		let resolved = Self::substitute_env_vars(contents)?;
		let mut config: ClientConfig =
			toml::from_str(&resolved).map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Self::apply_env_overrides(&mut config);
		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Replace `${VAR_NAME}` references with environment variable values
	fn substitute_env_vars(contents: &str) -> Result<String, ConfigError> {
		let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
			ConfigError::ParseError(format!("Invalid substitution pattern: {}", e))
		})?;

		let mut missing = None;
		let resolved = re.replace_all(contents, |caps: &regex::Captures| {
			let name = &caps[1];
			match std::env::var(name) {
				Ok(value) => value,
				Err(_) => {
					missing.get_or_insert_with(|| name.to_string());
					String::new()
				}
			}
		});

		match missing {
			Some(name) => Err(ConfigError::EnvVarNotFound(name)),
			None => Ok(resolved.into_owned()),
		}
	}

	/// Apply `STANDARD_*` environment variable overrides
	fn apply_env_overrides(config: &mut ClientConfig) {
		if let Ok(key) = std::env::var("STANDARD_PRIVATE_KEY") {
			debug!("Overriding private key from environment");
			config.private_key = key;
		}
		if let Ok(url) = std::env::var("STANDARD_RPC_URL") {
			debug!("Overriding RPC URL from environment");
			config.rpc_url = url;
		}
		if let Ok(key) = std::env::var("STANDARD_API_KEY") {
			debug!("Overriding API key from environment");
			config.api_key = Some(key);
		}
	}

	/// Validate configuration
	fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
		if !config.rpc_url.starts_with("http://") && !config.rpc_url.starts_with("https://") {
			return Err(ConfigError::ValidationError(format!(
				"rpc_url must be an http(s) URL, got '{}'",
				config.rpc_url
			)));
		}

		let key = config.private_key.trim_start_matches("0x");
		if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(ConfigError::ValidationError(
				"private_key must be 32 bytes of hex".to_string(),
			));
		}

		if config.gas_limit == 0 {
			return Err(ConfigError::ValidationError(
				"gas_limit must be non-zero".to_string(),
			));
		}

		Ok(())
	}
}
