//! HTTP RPC delivery implementation built on Alloy.

use crate::{DeliveryError, DeliveryInterface};
use alloy_provider::{Provider, RootProvider};
use alloy_transport_http::Http;
use async_trait::async_trait;
use standard_types::{Address, LogEntry, Receipt, SignedTransaction, B256};
use std::time::Duration;

/// Utility function to truncate a transaction hash for display.
fn truncate_hash(hash: &B256) -> String {
	let hash_str = hex::encode(hash);
	if hash_str.len() <= 8 {
		hash_str
	} else {
		format!("{}..", &hash_str[..8])
	}
}

/// Alloy-based HTTP delivery.
///
/// Submits raw signed transactions and polls for receipts. Signing happens
/// upstream in `standard-account`; this provider never holds a key.
pub struct HttpDelivery {
	provider: RootProvider<Http<reqwest::Client>>,
	poll_interval: Duration,
}

impl HttpDelivery {
	/// Creates a delivery instance for the given RPC endpoint.
	pub fn new(rpc_url: &str) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL: {}", e)))?;

		Ok(Self {
			provider: RootProvider::new_http(url),
			poll_interval: Duration::from_secs(2),
		})
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	fn convert_receipt(receipt: alloy_rpc_types::TransactionReceipt) -> Receipt {
		let logs = receipt
			.inner
			.logs()
			.iter()
			.map(|log| LogEntry {
				address: log.address(),
				topics: log.topics().to_vec(),
				data: log.data().data.clone(),
			})
			.collect();

		Receipt {
			hash: receipt.transaction_hash,
			block_number: receipt.block_number.unwrap_or_default(),
			gas_used: receipt.gas_used as u64,
			status: receipt.status(),
			logs,
		}
	}
}

#[async_trait]
impl DeliveryInterface for HttpDelivery {
	async fn nonce(&self, address: Address) -> Result<u64, DeliveryError> {
		self.provider
			.get_transaction_count(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get nonce: {}", e)))
	}

	async fn gas_price(&self) -> Result<u128, DeliveryError> {
		self.provider
			.get_gas_price()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get gas price: {}", e)))
	}

	async fn submit(&self, tx: &SignedTransaction) -> Result<B256, DeliveryError> {
		let pending = self
			.provider
			.send_raw_transaction(tx.raw.as_ref())
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = *pending.tx_hash();
		tracing::info!(tx_hash = %truncate_hash(&tx_hash), "Submitted transaction");

		Ok(tx_hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: B256,
		timeout: Duration,
	) -> Result<Receipt, DeliveryError> {
		let start_time = tokio::time::Instant::now();

		tracing::info!(
			tx_hash = %truncate_hash(&hash),
			"Waiting for confirmation (timeout: {}s)",
			timeout.as_secs()
		);

		loop {
			if start_time.elapsed() > timeout {
				return Err(DeliveryError::Timeout { hash });
			}

			let receipt = match self.provider.get_transaction_receipt(hash).await {
				Ok(Some(receipt)) => receipt,
				Ok(None) => {
					// Not yet mined, wait and retry
					tokio::time::sleep(self.poll_interval).await;
					continue;
				}
				Err(e) => {
					return Err(DeliveryError::Network(format!(
						"Failed to get receipt: {}",
						e
					)));
				}
			};

			let receipt = Self::convert_receipt(receipt);
			if !receipt.status {
				tracing::warn!(
					tx_hash = %truncate_hash(&hash),
					gas_used = receipt.gas_used,
					"Transaction reverted"
				);
				return Err(DeliveryError::Reverted {
					hash,
					gas_used: receipt.gas_used,
				});
			}

			return Ok(receipt);
		}
	}

	async fn receipt(&self, hash: B256) -> Result<Option<Receipt>, DeliveryError> {
		let receipt = self
			.provider
			.get_transaction_receipt(hash)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get receipt: {}", e)))?;

		Ok(receipt.map(Self::convert_receipt))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_hash() {
		let hash = B256::from([0xab; 32]);
		assert_eq!(truncate_hash(&hash), "abababab..");
	}

	#[test]
	fn test_rejects_bad_url() {
		assert!(HttpDelivery::new("not a url").is_err());
	}
}
