//! Caller-facing order results.

use crate::common::{Address, B256, U256};
use crate::events::DecodedEvent;
use crate::intent::CancelOrderId;
use rust_decimal::Decimal;

/// A placed order as reported back to the caller.
///
/// Constructed only from an `OrderPlaced` event immediately after decode;
/// the SDK never persists these.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrderInfo {
	/// Packed identifier, `"{base}_{quote}_{IsBid}_{orderId}"`; feed it back
	/// into `cancel_orders` verbatim.
	pub id: String,
	pub pair: Address,
	pub base: Address,
	pub quote: Address,
	pub is_bid: bool,
	pub order_id: u32,
	/// On-chain fixed-point price (8 implied decimals).
	pub price: U256,
	/// Price in human units.
	pub price_adjusted: Decimal,
	/// Placed amount in the traded token's native integer units.
	pub amount: U256,
	/// Placed amount adjusted by the traded token's decimals.
	pub amount_adjusted: Decimal,
}

impl OrderInfo {
	/// The typed form of [`OrderInfo::id`].
	pub fn cancel_id(&self) -> CancelOrderId {
		CancelOrderId {
			base: self.base,
			quote: self.quote,
			is_bid: self.is_bid,
			order_id: self.order_id,
		}
	}
}

/// How many orders a transaction placed.
///
/// A single sum type instead of the loosely-keyed `order_info` /
/// `order_infos` result dictionaries, so callers match exhaustively.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum OrderOutcome {
	/// No order was placed (e.g. a pure cancel, or a fully-matched taker).
	None,
	/// Exactly one order was placed.
	One(OrderInfo),
	/// Multiple orders were placed (batch operations).
	Many(Vec<OrderInfo>),
}

impl OrderOutcome {
	pub fn from_infos(mut infos: Vec<OrderInfo>) -> Self {
		match infos.len() {
			0 => OrderOutcome::None,
			1 => OrderOutcome::One(infos.remove(0)),
			_ => OrderOutcome::Many(infos),
		}
	}

	/// The first placed order, if any.
	pub fn first(&self) -> Option<&OrderInfo> {
		match self {
			OrderOutcome::None => None,
			OrderOutcome::One(info) => Some(info),
			OrderOutcome::Many(infos) => infos.first(),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			OrderOutcome::None => 0,
			OrderOutcome::One(_) => 1,
			OrderOutcome::Many(infos) => infos.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, OrderOutcome::None)
	}
}

/// Final result bundle for one executed intent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionResult {
	pub transaction_hash: B256,
	pub block_number: u64,
	pub gas_used: u64,
	/// Always true for results that reach the caller; reverted transactions
	/// surface as errors instead.
	pub status: bool,
	/// Every decoded matching-engine event, in log order.
	pub events: Vec<DecodedEvent>,
	/// Orders placed by this transaction.
	pub outcome: OrderOutcome,
}
