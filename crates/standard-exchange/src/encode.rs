//! Intent encoding: typed trading intents into matching-engine calldata.
//!
//! All fixed-point scaling happens here, once: prices carry 8 implied
//! decimals, slippage percentages 6, ETH amounts 18, and token amounts each
//! token's own decimal count from the metadata maps. Callers supply plain
//! decimal quantities and never pre-scale.

use crate::abi;
use crate::error::{ExchangeError, Result};
use alloy_sol_types::SolCall;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use standard_types::{
	Address, BatchOrder, Bytes, CancelOrderId, ExchangeMetadata, OrderIntent, U256,
};

/// Implied decimals of on-chain price fields.
pub const PRICE_DECIMALS: u32 = 8;
/// Implied decimals of slippage-limit percentage fields.
pub const SLIPPAGE_DECIMALS: u32 = 6;
/// Decimals of the native currency.
pub const ETH_DECIMALS: u32 = 18;

/// Default gas limit for a single-order call.
pub const DEFAULT_GAS_LIMIT: u64 = 3_000_000;
/// Per-item gas floor for batch calls; batch gas must scale at least
/// linearly with batch size or large batches run out of gas.
pub const BATCH_GAS_PER_ORDER: u64 = 3_000_000;

/// An encoded matching-engine call, ready for transaction assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
	/// Contract function name, kept for logging.
	pub function: &'static str,
	/// Selector plus ABI-encoded arguments.
	pub calldata: Bytes,
	/// Native value to attach.
	pub value: U256,
	/// Minimum gas limit this call needs; the transaction builder raises
	/// the caller's gas to at least this.
	pub min_gas: u64,
}

/// Scales a decimal quantity into integer units with the given implied
/// decimals. Rejects negatives, sub-precision fractions, and overflow.
fn scale_decimal(value: Decimal, decimals: u32, what: &str) -> Result<u128> {
	if value.is_sign_negative() {
		return Err(ExchangeError::Validation(format!(
			"{what} must not be negative"
		)));
	}
	if decimals > 28 {
		return Err(ExchangeError::Validation(format!(
			"{what}: unsupported decimal count {decimals}"
		)));
	}
	let factor = Decimal::from_i128_with_scale(10i128.pow(decimals), 0);
	let scaled = value.checked_mul(factor).ok_or_else(|| {
		ExchangeError::Validation(format!("{what} too large to scale by 1e{decimals}"))
	})?;
	if scaled.fract() != Decimal::ZERO {
		return Err(ExchangeError::Validation(format!(
			"{what} has precision finer than 1e-{decimals}"
		)));
	}
	scaled.to_u128().ok_or_else(|| {
		ExchangeError::Validation(format!("{what} does not fit in integer units"))
	})
}

fn scale_price(price: Decimal, what: &str) -> Result<U256> {
	scale_decimal(price, PRICE_DECIMALS, what).map(U256::from)
}

fn scale_slippage(pct: Decimal) -> Result<u32> {
	let units = scale_decimal(pct, SLIPPAGE_DECIMALS, "slippage limit")?;
	u32::try_from(units).map_err(|_| {
		ExchangeError::Validation(format!("slippage limit {pct}% out of range"))
	})
}

fn scale_eth(amount: Decimal, what: &str) -> Result<U256> {
	scale_decimal(amount, ETH_DECIMALS, what).map(U256::from)
}

fn token_decimals(meta: &ExchangeMetadata, token: Address, what: &str) -> Result<u32> {
	meta.decimals(token).map(u32::from).ok_or_else(|| {
		ExchangeError::Metadata(format!("{what}: no token metadata for {token}"))
	})
}

fn scale_token_amount(
	meta: &ExchangeMetadata,
	token: Address,
	amount: Decimal,
	what: &str,
) -> Result<U256> {
	let decimals = token_decimals(meta, token, what)?;
	scale_decimal(amount, decimals, what).map(U256::from)
}

/// Validates and converts a `createOrders`/`updateOrders` batch.
///
/// Fails fast on the first malformed item, naming its index; no partial
/// batch is ever encoded. ETH-flagged item amounts are summed into the
/// transaction value.
fn encode_batch(
	orders: &[BatchOrder],
	require_order_id: bool,
	meta: &ExchangeMetadata,
) -> Result<(Vec<abi::OrderInput>, U256)> {
	if orders.is_empty() {
		return Err(ExchangeError::Validation(
			"order batch cannot be empty".to_string(),
		));
	}

	let mut inputs = Vec::with_capacity(orders.len());
	let mut eth_value = U256::ZERO;

	for (i, order) in orders.iter().enumerate() {
		let order_id = match order.order_id {
			Some(id) => id,
			None if require_order_id => {
				return Err(ExchangeError::Validation(format!(
					"order at index {i} is missing order_id (required for updates)"
				)));
			}
			// New order
			None => 0,
		};

		let price = scale_price(order.price, &format!("price at index {i}"))?;
		let amount_label = format!("amount at index {i}");
		let amount = if order.is_eth {
			scale_eth(order.amount, &amount_label)?
		} else if order.is_bid {
			scale_token_amount(meta, order.quote, order.amount, &amount_label)?
		} else {
			scale_token_amount(meta, order.base, order.amount, &amount_label)?
		};

		if order.is_eth {
			eth_value += amount;
		}

		inputs.push(abi::OrderInput {
			base: order.base,
			quote: order.quote,
			isBid: order.is_bid,
			isLimit: order.is_limit,
			orderId: order_id,
			price,
			amount,
			n: order.n,
			recipient: order.recipient,
			isETH: order.is_eth,
		});
	}

	Ok((inputs, eth_value))
}

fn parse_cancel_ids(ids: &[String]) -> Result<Vec<abi::CancelInput>> {
	if ids.is_empty() {
		return Err(ExchangeError::Validation(
			"cancel batch cannot be empty".to_string(),
		));
	}

	ids.iter()
		.enumerate()
		.map(|(i, raw)| {
			let parsed: CancelOrderId = raw.parse().map_err(|e| {
				ExchangeError::Validation(format!("cancel id at index {i}: {e}"))
			})?;
			Ok(abi::CancelInput {
				base: parsed.base,
				quote: parsed.quote,
				isBid: parsed.is_bid,
				orderId: parsed.order_id,
			})
		})
		.collect()
}

/// Encodes an intent into calldata, attached value, and a gas floor.
pub fn encode_intent(intent: &OrderIntent, meta: &ExchangeMetadata) -> Result<EncodedCall> {
	let function = intent.function_name();
	let (calldata, value, min_gas) = match intent {
		OrderIntent::MarketBuy {
			base,
			quote,
			quote_amount,
			is_maker,
			n,
			recipient,
			slippage_limit,
		} => {
			let call = abi::marketBuyCall {
				base: *base,
				quote: *quote,
				quoteAmount: scale_token_amount(meta, *quote, *quote_amount, "quote amount")?,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
				slippageLimit: scale_slippage(*slippage_limit)?,
			};
			(call.abi_encode(), U256::ZERO, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::MarketSell {
			base,
			quote,
			base_amount,
			is_maker,
			n,
			recipient,
			slippage_limit,
		} => {
			let call = abi::marketSellCall {
				base: *base,
				quote: *quote,
				baseAmount: scale_token_amount(meta, *base, *base_amount, "base amount")?,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
				slippageLimit: scale_slippage(*slippage_limit)?,
			};
			(call.abi_encode(), U256::ZERO, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::LimitBuy {
			base,
			quote,
			price,
			quote_amount,
			is_maker,
			n,
			recipient,
		} => {
			let call = abi::limitBuyCall {
				base: *base,
				quote: *quote,
				price: scale_price(*price, "price")?,
				quoteAmount: scale_token_amount(meta, *quote, *quote_amount, "quote amount")?,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
			};
			(call.abi_encode(), U256::ZERO, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::LimitSell {
			base,
			quote,
			price,
			base_amount,
			is_maker,
			n,
			recipient,
		} => {
			let call = abi::limitSellCall {
				base: *base,
				quote: *quote,
				price: scale_price(*price, "price")?,
				baseAmount: scale_token_amount(meta, *base, *base_amount, "base amount")?,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
			};
			(call.abi_encode(), U256::ZERO, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::MarketBuyEth {
			base,
			is_maker,
			n,
			recipient,
			slippage_limit,
			eth_amount,
		} => {
			let call = abi::marketBuyETHCall {
				base: *base,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
				slippageLimit: scale_slippage(*slippage_limit)?,
			};
			let value = scale_eth(*eth_amount, "eth amount")?;
			(call.abi_encode(), value, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::MarketSellEth {
			quote,
			is_maker,
			n,
			recipient,
			slippage_limit,
			eth_amount,
		} => {
			let call = abi::marketSellETHCall {
				quote: *quote,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
				slippageLimit: scale_slippage(*slippage_limit)?,
			};
			let value = scale_eth(*eth_amount, "eth amount")?;
			(call.abi_encode(), value, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::LimitBuyEth {
			base,
			price,
			is_maker,
			n,
			recipient,
			eth_amount,
		} => {
			let call = abi::limitBuyETHCall {
				base: *base,
				price: scale_price(*price, "price")?,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
			};
			let value = scale_eth(*eth_amount, "eth amount")?;
			(call.abi_encode(), value, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::LimitSellEth {
			quote,
			price,
			is_maker,
			n,
			recipient,
			eth_amount,
		} => {
			let call = abi::limitSellETHCall {
				quote: *quote,
				price: scale_price(*price, "price")?,
				isMaker: *is_maker,
				n: *n,
				recipient: *recipient,
			};
			let value = scale_eth(*eth_amount, "eth amount")?;
			(call.abi_encode(), value, DEFAULT_GAS_LIMIT)
		}
		OrderIntent::CreateOrders(orders) => {
			let (inputs, value) = encode_batch(orders, false, meta)?;
			let min_gas = BATCH_GAS_PER_ORDER * inputs.len() as u64;
			let call = abi::createOrdersCall { orders: inputs };
			(call.abi_encode(), value, min_gas)
		}
		OrderIntent::UpdateOrders(orders) => {
			let (inputs, value) = encode_batch(orders, true, meta)?;
			let min_gas = BATCH_GAS_PER_ORDER * inputs.len() as u64;
			let call = abi::updateOrdersCall { orders: inputs };
			(call.abi_encode(), value, min_gas)
		}
		OrderIntent::CancelOrders(ids) => {
			let inputs = parse_cancel_ids(ids)?;
			let min_gas = BATCH_GAS_PER_ORDER * inputs.len() as u64;
			let call = abi::cancelOrdersCall { orders: inputs };
			(call.abi_encode(), U256::ZERO, min_gas)
		}
	};

	Ok(EncodedCall {
		function,
		calldata: calldata.into(),
		value,
		min_gas,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_sol_types::SolCall;
	use standard_types::{PairMetadata, TokenMetadata};

	fn addr(byte: u8) -> Address {
		Address::from([byte; 20])
	}

	fn dec(s: &str) -> Decimal {
		s.parse().unwrap()
	}

	/// Base token with 18 decimals, quote token with 6.
	fn test_metadata() -> ExchangeMetadata {
		let mut meta = ExchangeMetadata::new();
		meta.insert_token(TokenMetadata {
			address: addr(0x01),
			symbol: "BASE".to_string(),
			decimals: 18,
		});
		meta.insert_token(TokenMetadata {
			address: addr(0x02),
			symbol: "QUOTE".to_string(),
			decimals: 6,
		});
		meta.insert_pair(PairMetadata {
			address: addr(0x10),
			symbol: "BASE/QUOTE".to_string(),
			base: addr(0x01),
			quote: addr(0x02),
		});
		meta
	}

	fn batch_order() -> BatchOrder {
		BatchOrder {
			base: addr(0x01),
			quote: addr(0x02),
			is_bid: true,
			is_limit: true,
			order_id: None,
			price: dec("1.5"),
			amount: dec("10"),
			n: 1,
			recipient: addr(0x99),
			is_eth: false,
		}
	}

	#[test]
	fn test_scale_decimal() {
		assert_eq!(scale_decimal(dec("234.5"), 8, "price").unwrap(), 23_450_000_000);
		assert_eq!(scale_decimal(dec("0.1"), 6, "slippage").unwrap(), 100_000);
		assert_eq!(scale_decimal(dec("2"), 0, "amount").unwrap(), 2);
	}

	#[test]
	fn test_scale_decimal_rejects_negative_and_sub_precision() {
		assert!(scale_decimal(dec("-1"), 8, "price").is_err());
		// 1e-7 of a 6-decimal token cannot be represented on chain.
		assert!(scale_decimal(dec("0.0000001"), 6, "amount").is_err());
	}

	#[test]
	fn test_limit_buy_argument_contract() {
		let meta = test_metadata();
		let intent = OrderIntent::LimitBuy {
			base: addr(0x01),
			quote: addr(0x02),
			price: dec("2500"),
			quote_amount: dec("100"),
			is_maker: true,
			n: 3,
			recipient: addr(0x99),
		};

		let encoded = encode_intent(&intent, &meta).unwrap();
		assert_eq!(encoded.function, "limitBuy");
		assert_eq!(encoded.value, U256::ZERO);

		let expected = abi::limitBuyCall {
			base: addr(0x01),
			quote: addr(0x02),
			price: U256::from(2500u64) * U256::from(100_000_000u64),
			quoteAmount: U256::from(100_000_000u64), // 100 * 1e6
			isMaker: true,
			n: 3,
			recipient: addr(0x99),
		};
		assert_eq!(encoded.calldata.as_ref(), expected.abi_encode());
	}

	#[test]
	fn test_market_buy_scales_slippage() {
		let meta = test_metadata();
		let intent = OrderIntent::MarketBuy {
			base: addr(0x01),
			quote: addr(0x02),
			quote_amount: dec("1"),
			is_maker: false,
			n: 1,
			recipient: addr(0x99),
			slippage_limit: dec("0.1"),
		};

		let encoded = encode_intent(&intent, &meta).unwrap();
		let decoded = abi::marketBuyCall::abi_decode(encoded.calldata.as_ref(), true).unwrap();
		assert_eq!(decoded.slippageLimit, 100_000); // 0.1% * 1e6
		assert_eq!(decoded.quoteAmount, U256::from(1_000_000u64));
	}

	#[test]
	fn test_limit_buy_eth_attaches_value() {
		let meta = test_metadata();
		let intent = OrderIntent::LimitBuyEth {
			base: addr(0x01),
			price: dec("1800"),
			is_maker: true,
			n: 1,
			recipient: addr(0x99),
			eth_amount: dec("0.5"),
		};

		let encoded = encode_intent(&intent, &meta).unwrap();
		assert_eq!(encoded.value, U256::from(500_000_000_000_000_000u128));
	}

	#[test]
	fn test_missing_token_metadata_is_a_caller_error() {
		let meta = ExchangeMetadata::new();
		let intent = OrderIntent::MarketBuy {
			base: addr(0x01),
			quote: addr(0x02),
			quote_amount: dec("1"),
			is_maker: false,
			n: 1,
			recipient: addr(0x99),
			slippage_limit: dec("0"),
		};
		assert!(matches!(
			encode_intent(&intent, &meta),
			Err(ExchangeError::Metadata(_))
		));
	}

	#[test]
	fn test_empty_batch_rejected() {
		let meta = test_metadata();
		for intent in [
			OrderIntent::CreateOrders(vec![]),
			OrderIntent::UpdateOrders(vec![]),
			OrderIntent::CancelOrders(vec![]),
		] {
			assert!(matches!(
				encode_intent(&intent, &meta),
				Err(ExchangeError::Validation(_))
			));
		}
	}

	#[test]
	fn test_update_requires_order_id_naming_index() {
		let meta = test_metadata();
		let mut orders = vec![batch_order(), batch_order()];
		orders[0].order_id = Some(7);
		// index 1 left without an order id

		let err = encode_intent(&OrderIntent::UpdateOrders(orders), &meta).unwrap_err();
		match err {
			ExchangeError::Validation(msg) => assert!(msg.contains("index 1"), "{msg}"),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_malformed_item_rejects_whole_batch() {
		let meta = test_metadata();
		let mut orders = vec![batch_order(), batch_order(), batch_order()];
		orders[2].price = dec("-1");

		assert!(encode_intent(&OrderIntent::CreateOrders(orders), &meta).is_err());
	}

	#[test]
	fn test_batch_eth_value_and_gas_floor() {
		let meta = test_metadata();
		let mut orders = vec![batch_order(), batch_order(), batch_order()];
		orders[1].is_eth = true;
		orders[1].amount = dec("100");
		orders[2].is_eth = true;
		orders[2].amount = dec("50");

		let encoded = encode_intent(&OrderIntent::CreateOrders(orders), &meta).unwrap();
		let eth = U256::from(10u64).pow(U256::from(18u64));
		assert_eq!(encoded.value, U256::from(150u64) * eth);
		assert_eq!(encoded.min_gas, 3 * BATCH_GAS_PER_ORDER);
	}

	#[test]
	fn test_create_defaults_order_id_to_zero() {
		let meta = test_metadata();
		let encoded =
			encode_intent(&OrderIntent::CreateOrders(vec![batch_order()]), &meta).unwrap();
		let decoded = abi::createOrdersCall::abi_decode(encoded.calldata.as_ref(), true).unwrap();
		assert_eq!(decoded.orders[0].orderId, 0);
		// Bid amount scaled by quote decimals (6).
		assert_eq!(decoded.orders[0].amount, U256::from(10_000_000u64));
	}

	#[test]
	fn test_cancel_round_trip() {
		let meta = test_metadata();
		let id = CancelOrderId {
			base: addr(0x01),
			quote: addr(0x02),
			is_bid: true,
			order_id: 12345,
		};

		let encoded =
			encode_intent(&OrderIntent::CancelOrders(vec![id.to_string()]), &meta).unwrap();
		let decoded = abi::cancelOrdersCall::abi_decode(encoded.calldata.as_ref(), true).unwrap();
		assert_eq!(decoded.orders.len(), 1);
		assert_eq!(decoded.orders[0].base, id.base);
		assert_eq!(decoded.orders[0].quote, id.quote);
		assert_eq!(decoded.orders[0].isBid, id.is_bid);
		assert_eq!(decoded.orders[0].orderId, id.order_id);
	}

	#[test]
	fn test_cancel_rejects_malformed_id_with_index() {
		let meta = test_metadata();
		let good = CancelOrderId {
			base: addr(0x01),
			quote: addr(0x02),
			is_bid: false,
			order_id: 1,
		};
		let ids = vec![good.to_string(), "only_three_fields".to_string()];

		let err = encode_intent(&OrderIntent::CancelOrders(ids), &meta).unwrap_err();
		match err {
			ExchangeError::Validation(msg) => assert!(msg.contains("index 1"), "{msg}"),
			other => panic!("unexpected error: {other}"),
		}
	}
}
