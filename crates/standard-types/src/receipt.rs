//! Receipt and log types produced by the delivery layer.

use crate::common::{Address, BlockNumber, Bytes, B256};

/// Raw log entry emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
	/// Address of the contract that emitted the log.
	pub address: Address,
	/// Indexed topics; `topics[0]` is the event signature hash.
	pub topics: Vec<B256>,
	/// ABI-encoded non-indexed event data.
	pub data: Bytes,
}

impl LogEntry {
	/// The event signature hash, if the log has any topics.
	pub fn topic0(&self) -> Option<&B256> {
		self.topics.first()
	}
}

/// Confirmation record for a mined transaction.
///
/// The status flag must be checked before any decoding is attempted; the
/// delivery layer only hands successful receipts to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Receipt {
	/// The hash of the transaction.
	pub hash: B256,
	/// The block number where the transaction was included.
	pub block_number: BlockNumber,
	/// Gas consumed by execution.
	pub gas_used: u64,
	/// Whether the transaction executed successfully.
	pub status: bool,
	/// Emitted logs, in execution order.
	pub logs: Vec<LogEntry>,
}
