//! Error types for the exchange client.

use standard_account::AccountError;
use standard_delivery::DeliveryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExchangeError>;

#[derive(Error, Debug)]
pub enum ExchangeError {
	/// Malformed intent detected before any chain interaction.
	#[error("Validation error: {0}")]
	Validation(String),

	/// Pair or token metadata needed for encoding is missing. A caller
	/// configuration problem; refresh the metadata maps.
	#[error("Metadata error: {0}")]
	Metadata(String),

	#[error("Account error: {0}")]
	Account(#[from] AccountError),

	#[error("Delivery error: {0}")]
	Delivery(#[from] DeliveryError),

	#[error("Configuration error: {0}")]
	Config(#[from] crate::config::ConfigError),

	#[error("API error: {0}")]
	Api(String),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl ExchangeError {
	/// True if the transaction was mined but execution failed.
	pub fn is_reverted(&self) -> bool {
		matches!(
			self,
			ExchangeError::Delivery(DeliveryError::Reverted { .. })
		)
	}

	/// True if the transaction was submitted but not confirmed in time; its
	/// fate can still be queried by hash.
	pub fn is_unconfirmed(&self) -> bool {
		matches!(self, ExchangeError::Delivery(DeliveryError::Timeout { .. }))
	}
}
