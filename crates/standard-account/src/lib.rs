//! Account and signing for the exchange SDK.
//!
//! The signer is pure and deterministic: given an unsigned transaction and
//! the account's key it produces raw signed bytes, with no I/O beyond the
//! cryptographic signing itself. Key validity is checked once when the
//! wallet is constructed, not per call.

use async_trait::async_trait;
use standard_types::{Address, SignedTransaction, Transaction};
use thiserror::Error;

mod local;

pub use local::LocalWallet;

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	#[error("Signing failed: {0}")]
	SigningFailed(String),
}

/// Seam for transaction signing backends.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
	/// The account address this signer controls.
	fn address(&self) -> Address;

	/// Sign an unsigned transaction into broadcast-ready raw bytes.
	async fn sign_transaction(&self, tx: &Transaction)
		-> Result<SignedTransaction, AccountError>;
}
