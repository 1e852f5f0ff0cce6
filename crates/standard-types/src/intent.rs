//! Trading intents accepted by the exchange client.
//!
//! An intent is a caller-specified desire to trade or manage orders, prior to
//! being turned into a transaction. Prices, amounts and slippage limits are
//! plain decimal quantities in human units; the intent encoder performs all
//! fixed-point scaling using the pair/token metadata.

use crate::common::Address;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One order inside a `createOrders`/`updateOrders` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOrder {
	pub base: Address,
	pub quote: Address,
	/// True for buy orders, false for sell orders.
	pub is_bid: bool,
	/// True for limit orders, false for market orders.
	pub is_limit: bool,
	/// Existing order to replace. `None` means a new order for creates;
	/// updates must name one.
	pub order_id: Option<u32>,
	/// Limit price in quote units per base unit.
	pub price: Decimal,
	/// Order size in human units of the traded token (quote for bids, base
	/// for asks, ETH for `is_eth` orders).
	pub amount: Decimal,
	/// Maximum number of matches to attempt.
	pub n: u32,
	pub recipient: Address,
	/// ETH-denominated order; its scaled amount is attached as transaction
	/// value rather than pulled from a token balance.
	pub is_eth: bool,
}

/// A trading intent, one variant per matching-engine entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderIntent {
	MarketBuy {
		base: Address,
		quote: Address,
		quote_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		/// Slippage limit as a percentage (e.g. `0.1` for 0.1%).
		slippage_limit: Decimal,
	},
	MarketSell {
		base: Address,
		quote: Address,
		base_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
	},
	LimitBuy {
		base: Address,
		quote: Address,
		price: Decimal,
		quote_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
	},
	LimitSell {
		base: Address,
		quote: Address,
		price: Decimal,
		base_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
	},
	/// Market buy paying with native ETH; `eth_amount` rides as msg.value.
	MarketBuyEth {
		base: Address,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
		eth_amount: Decimal,
	},
	/// Market sell of native ETH for the quote token.
	MarketSellEth {
		quote: Address,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
		eth_amount: Decimal,
	},
	LimitBuyEth {
		base: Address,
		price: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		eth_amount: Decimal,
	},
	LimitSellEth {
		quote: Address,
		price: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		eth_amount: Decimal,
	},
	/// Create a batch of orders as one transaction, all-or-nothing.
	CreateOrders(Vec<BatchOrder>),
	/// Update a batch of existing orders as one transaction.
	UpdateOrders(Vec<BatchOrder>),
	/// Cancel a batch of orders identified by packed id strings
	/// (`"{base}_{quote}_{IsBid}_{orderId}"`).
	CancelOrders(Vec<String>),
}

impl OrderIntent {
	/// Matching-engine function this intent maps to.
	pub fn function_name(&self) -> &'static str {
		match self {
			OrderIntent::MarketBuy { .. } => "marketBuy",
			OrderIntent::MarketSell { .. } => "marketSell",
			OrderIntent::LimitBuy { .. } => "limitBuy",
			OrderIntent::LimitSell { .. } => "limitSell",
			OrderIntent::MarketBuyEth { .. } => "marketBuyETH",
			OrderIntent::MarketSellEth { .. } => "marketSellETH",
			OrderIntent::LimitBuyEth { .. } => "limitBuyETH",
			OrderIntent::LimitSellEth { .. } => "limitSellETH",
			OrderIntent::CreateOrders(_) => "createOrders",
			OrderIntent::UpdateOrders(_) => "updateOrders",
			OrderIntent::CancelOrders(_) => "cancelOrders",
		}
	}
}

/// Error parsing a packed cancel-order identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CancelIdError {
	#[error("expected 4 '_'-delimited fields, got {0}")]
	FieldCount(usize),
	#[error("invalid address in field {0}")]
	Address(usize),
	#[error("invalid side flag: {0}")]
	Side(String),
	#[error("invalid order id: {0}")]
	OrderId(String),
}

/// Packed order identifier, `"{base}_{quote}_{IsBid}_{orderId}"`.
///
/// This is the wire-level id format the exchange API uses for open orders.
/// Parsing and formatting round-trip the (base, quote, side, orderId) tuple
/// exactly; addresses are emitted as lowercase hex and the side as
/// `True`/`False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelOrderId {
	pub base: Address,
	pub quote: Address,
	pub is_bid: bool,
	pub order_id: u32,
}

impl fmt::Display for CancelOrderId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"0x{}_0x{}_{}_{}",
			hex::encode(self.base),
			hex::encode(self.quote),
			if self.is_bid { "True" } else { "False" },
			self.order_id
		)
	}
}

impl FromStr for CancelOrderId {
	type Err = CancelIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let parts: Vec<&str> = s.split('_').collect();
		if parts.len() != 4 {
			return Err(CancelIdError::FieldCount(parts.len()));
		}
		let base: Address = parts[0].parse().map_err(|_| CancelIdError::Address(0))?;
		let quote: Address = parts[1].parse().map_err(|_| CancelIdError::Address(1))?;
		let is_bid = match parts[2] {
			"True" | "true" => true,
			"False" | "false" => false,
			other => return Err(CancelIdError::Side(other.to_string())),
		};
		let order_id: u32 = parts[3]
			.parse()
			.map_err(|_| CancelIdError::OrderId(parts[3].to_string()))?;
		Ok(Self {
			base,
			quote,
			is_bid,
			order_id,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn addr(byte: u8) -> Address {
		Address::from([byte; 20])
	}

	#[test]
	fn test_cancel_id_round_trip() {
		let id = CancelOrderId {
			base: addr(0x11),
			quote: addr(0x22),
			is_bid: true,
			order_id: 12345,
		};
		let packed = id.to_string();
		let parsed: CancelOrderId = packed.parse().unwrap();
		assert_eq!(parsed, id);
	}

	#[test]
	fn test_cancel_id_display_format() {
		let id = CancelOrderId {
			base: addr(0xaa),
			quote: addr(0xbb),
			is_bid: false,
			order_id: 7,
		};
		let expected = format!(
			"0x{}_0x{}_False_7",
			"aa".repeat(20),
			"bb".repeat(20)
		);
		assert_eq!(id.to_string(), expected);
	}

	#[test]
	fn test_cancel_id_accepts_checksummed_and_lowercase_side() {
		let s = format!("{}_{}_true_3", addr(0x01), addr(0x02));
		let parsed: CancelOrderId = s.parse().unwrap();
		assert_eq!(parsed.base, addr(0x01));
		assert!(parsed.is_bid);
	}

	#[test]
	fn test_cancel_id_wrong_field_count() {
		let err = "a_b_c".parse::<CancelOrderId>().unwrap_err();
		assert_eq!(err, CancelIdError::FieldCount(3));
	}

	#[test]
	fn test_cancel_id_bad_side() {
		let s = format!("0x{}_0x{}_maybe_1", "11".repeat(20), "22".repeat(20));
		let err = s.parse::<CancelOrderId>().unwrap_err();
		assert_eq!(err, CancelIdError::Side("maybe".to_string()));
	}

	#[test]
	fn test_function_names() {
		let intent = OrderIntent::CancelOrders(vec![]);
		assert_eq!(intent.function_name(), "cancelOrders");
		let intent = OrderIntent::LimitBuyEth {
			base: addr(1),
			price: Decimal::ONE,
			is_maker: true,
			n: 1,
			recipient: addr(2),
			eth_amount: Decimal::ONE,
		};
		assert_eq!(intent.function_name(), "limitBuyETH");
	}
}
