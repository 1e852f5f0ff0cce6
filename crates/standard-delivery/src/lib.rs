//! Transaction submission and confirmation for the exchange SDK.
//!
//! This layer broadcasts signed transactions and waits for a terminal
//! receipt. It performs no retries: resubmission needs a fresh nonce, so
//! retry policy belongs to the caller. A reverted transaction surfaces as
//! [`DeliveryError::Reverted`] here, which means the decode stage never
//! observes a failed receipt.

use async_trait::async_trait;
use standard_types::{Address, Receipt, SignedTransaction, B256};
use std::time::Duration;
use thiserror::Error;

mod rpc;

pub use rpc::HttpDelivery;

#[derive(Debug, Error)]
pub enum DeliveryError {
	#[error("Network error: {0}")]
	Network(String),
	/// The transaction was mined but execution failed. Terminal; the gas
	/// spent and the hash are kept for caller diagnostics.
	#[error("Transaction {hash} reverted (gas used: {gas_used})")]
	Reverted { hash: B256, gas_used: u64 },
	/// The transaction was submitted but not confirmed within the caller's
	/// timeout. Its fate remains on-chain and can be queried later by hash.
	#[error("Timed out waiting for confirmation of {hash}")]
	Timeout { hash: B256 },
}

/// Seam for blockchain delivery backends.
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Current account nonce, fetched fresh from the network.
	async fn nonce(&self, address: Address) -> Result<u64, DeliveryError>;

	/// Current network gas price in wei.
	async fn gas_price(&self) -> Result<u128, DeliveryError>;

	/// Broadcast a signed transaction, returning its hash.
	async fn submit(&self, tx: &SignedTransaction) -> Result<B256, DeliveryError>;

	/// Poll until the transaction is mined successfully, reverts, or the
	/// timeout elapses.
	async fn wait_for_confirmation(
		&self,
		hash: B256,
		timeout: Duration,
	) -> Result<Receipt, DeliveryError>;

	/// Fetch a receipt by hash, if one exists yet. Unlike
	/// [`wait_for_confirmation`](DeliveryInterface::wait_for_confirmation)
	/// this returns reverted receipts as-is, for post-timeout inspection.
	async fn receipt(&self, hash: B256) -> Result<Option<Receipt>, DeliveryError>;
}
