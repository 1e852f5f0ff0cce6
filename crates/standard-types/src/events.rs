//! Decoded matching-engine events.
//!
//! Each log from the matching engine decodes into exactly one
//! [`ExchangeEvent`] variant; logs from other contracts (token transfers,
//! approvals) never reach this type.

use crate::common::{Address, BlockNumber, B256, U256};

/// Event payload emitted by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExchangeEvent {
	/// An order was placed on the book.
	OrderPlaced {
		pair: Address,
		id: u32,
		owner: Address,
		is_bid: bool,
		price: U256,
		placed: U256,
	},
	/// An order matched against resting liquidity.
	OrderMatched {
		pair: Address,
		id: u32,
		owner: Address,
		is_bid: bool,
		price: U256,
		base_amount: U256,
		quote_amount: U256,
		total: U256,
	},
	/// An order was removed from the book.
	OrderCanceled {
		pair: Address,
		id: u32,
		is_bid: bool,
		price: U256,
		amount: U256,
	},
	/// The pair's market price moved.
	NewMarketPrice { pair: Address, price: U256 },
	/// A new trading pair was listed.
	PairAdded {
		pair: Address,
		base: Address,
		quote: Address,
		listing_price: U256,
	},
	/// The listing cost was changed by governance.
	ListingCostSet { payment: Address, amount: U256 },
	/// A pair's parameters were re-configured.
	PairUpdated {
		pair: Address,
		base: Address,
		quote: Address,
	},
}

impl ExchangeEvent {
	pub fn name(&self) -> &'static str {
		match self {
			ExchangeEvent::OrderPlaced { .. } => "OrderPlaced",
			ExchangeEvent::OrderMatched { .. } => "OrderMatched",
			ExchangeEvent::OrderCanceled { .. } => "OrderCanceled",
			ExchangeEvent::NewMarketPrice { .. } => "NewMarketPrice",
			ExchangeEvent::PairAdded { .. } => "PairAdded",
			ExchangeEvent::ListingCostSet { .. } => "ListingCostSet",
			ExchangeEvent::PairUpdated { .. } => "PairUpdated",
		}
	}
}

/// An [`ExchangeEvent`] tied back to the transaction that emitted it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecodedEvent {
	pub event: ExchangeEvent,
	pub transaction_hash: B256,
	pub block_number: BlockNumber,
}
