//! Transaction types for the exchange SDK.
//!
//! An unsigned [`Transaction`] is assembled per call with a freshly fetched
//! nonce, handed to the signer, and never reused. The resulting
//! [`SignedTransaction`] carries the raw bytes ready for broadcast.

use crate::common::{Address, Bytes, B256, U256};

/// Unsigned matching-engine call, ready for signing.
///
/// Every field is concrete: the transaction builder resolves nonce and gas
/// before signing, so there is nothing left for a downstream filler to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
	/// The matching-engine contract address.
	pub to: Address,
	/// ABI-encoded calldata (selector plus arguments).
	pub data: Bytes,
	/// Native value to attach (ETH-denominated orders).
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Account nonce, fetched fresh at build time.
	pub nonce: u64,
	/// Gas limit for execution.
	pub gas_limit: u64,
	/// Legacy gas price in wei.
	pub gas_price: u128,
}

/// A signed transaction, derived from exactly one [`Transaction`] and one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
	/// RLP-encoded signed transaction bytes for `eth_sendRawTransaction`.
	pub raw: Bytes,
	/// Hash of the signed transaction.
	pub hash: B256,
}
