//! Local private-key wallet.

use crate::{AccountError, TransactionSigner};
use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSigner;
use alloy_primitives::TxKind;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use standard_types::{Address, SignedTransaction, Transaction};

/// Wallet backed by a locally held private key.
///
/// Suitable for bots and scripts where key management simplicity is
/// preferred over custody separation. The key is parsed and validated once
/// here; a wallet that constructs successfully signs without further
/// structural checks.
pub struct LocalWallet {
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a wallet from a hex-encoded private key (with or without a
	/// `0x` prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}
}

#[async_trait]
impl TransactionSigner for LocalWallet {
	fn address(&self) -> Address {
		self.signer.address()
	}

	async fn sign_transaction(
		&self,
		tx: &Transaction,
	) -> Result<SignedTransaction, AccountError> {
		let mut legacy = TxLegacy {
			chain_id: Some(tx.chain_id),
			nonce: tx.nonce,
			gas_price: tx.gas_price,
			gas_limit: tx.gas_limit,
			to: TxKind::Call(tx.to),
			value: tx.value,
			input: tx.data.clone(),
		};

		let signature = TxSigner::sign_transaction(&self.signer, &mut legacy)
			.await
			.map_err(|e| {
				AccountError::SigningFailed(format!("Failed to sign transaction: {}", e))
			})?;

		let signed = legacy.into_signed(signature);
		let hash = *signed.hash();
		let raw = TxEnvelope::Legacy(signed).encoded_2718();

		Ok(SignedTransaction {
			raw: raw.into(),
			hash,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use standard_types::{Bytes, U256};

	// Well-known development key (anvil account 0).
	const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[test]
	fn test_address_derivation() {
		let wallet = LocalWallet::new(DEV_KEY).unwrap();
		let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
			.parse()
			.unwrap();
		assert_eq!(wallet.address(), expected);
	}

	#[test]
	fn test_invalid_key_rejected_at_construction() {
		assert!(LocalWallet::new("0xdeadbeef").is_err());
		assert!(LocalWallet::new("not hex at all").is_err());
	}

	#[tokio::test]
	async fn test_signing_is_deterministic() {
		let wallet = LocalWallet::new(DEV_KEY).unwrap();
		let tx = Transaction {
			to: Address::from([0x42; 20]),
			data: Bytes::from(vec![0xde, 0xad]),
			value: U256::from(1u64),
			chain_id: 31337,
			nonce: 0,
			gas_limit: 3_000_000,
			gas_price: 6_000_000_000,
		};

		let a = wallet.sign_transaction(&tx).await.unwrap();
		let b = wallet.sign_transaction(&tx).await.unwrap();
		assert_eq!(a, b);
		assert!(!a.raw.is_empty());
	}
}
