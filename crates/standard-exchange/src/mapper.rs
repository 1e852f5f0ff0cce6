//! Maps decoded events into caller-facing order results.
//!
//! Only `OrderPlaced` events produce an [`OrderInfo`]; the other events are
//! informational and get logged by [`log_summaries`]. Mapping is best-effort:
//! an event whose pair or token metadata is missing is skipped with a
//! warning rather than failing an already-confirmed transaction.

use rust_decimal::Decimal;
use standard_types::{
	Address, CancelOrderId, DecodedEvent, ExchangeEvent, ExchangeMetadata, OrderInfo, U256,
};

use crate::encode::PRICE_DECIMALS;

/// Converts a raw fixed-point amount into human units.
///
/// Returns `None` when the raw value exceeds what `Decimal` can carry; prices
/// and amounts on real books stay far below that bound.
fn adjust(raw: U256, decimals: u32) -> Option<Decimal> {
	let raw = u128::try_from(raw).ok()?;
	let raw = i128::try_from(raw).ok()?;
	Decimal::try_from_i128_with_scale(raw, decimals)
		.ok()
		.map(|d| d.normalize())
}

fn order_info(
	meta: &ExchangeMetadata,
	pair: Address,
	id: u32,
	is_bid: bool,
	price: U256,
	placed: U256,
) -> Option<OrderInfo> {
	let pair_meta = match meta.pair(pair) {
		Some(p) => p,
		None => {
			tracing::warn!(pair = %pair, "No pair metadata for placed order, skipping");
			return None;
		}
	};

	// Bids lock the quote token, asks lock the base token.
	let traded = if is_bid {
		pair_meta.quote
	} else {
		pair_meta.base
	};
	let decimals = match meta.decimals(traded) {
		Some(d) => u32::from(d),
		None => {
			tracing::warn!(token = %traded, "No token metadata for placed order, skipping");
			return None;
		}
	};

	let price_adjusted = adjust(price, PRICE_DECIMALS)?;
	let amount_adjusted = adjust(placed, decimals)?;

	let cancel_id = CancelOrderId {
		base: pair_meta.base,
		quote: pair_meta.quote,
		is_bid,
		order_id: id,
	};

	Some(OrderInfo {
		id: cancel_id.to_string(),
		pair,
		base: pair_meta.base,
		quote: pair_meta.quote,
		is_bid,
		order_id: id,
		price,
		price_adjusted,
		amount: placed,
		amount_adjusted,
	})
}

/// Extracts an [`OrderInfo`] for every `OrderPlaced` event, in log order.
pub fn map_order_infos(events: &[DecodedEvent], meta: &ExchangeMetadata) -> Vec<OrderInfo> {
	events
		.iter()
		.filter_map(|decoded| match &decoded.event {
			ExchangeEvent::OrderPlaced {
				pair,
				id,
				is_bid,
				price,
				placed,
				..
			} => order_info(meta, *pair, *id, *is_bid, *price, *placed),
			_ => None,
		})
		.collect()
}

/// Logs a human-readable line per non-placement event.
pub fn log_summaries(events: &[DecodedEvent], meta: &ExchangeMetadata) {
	for decoded in events {
		match &decoded.event {
			ExchangeEvent::OrderPlaced { .. } => {}
			ExchangeEvent::OrderMatched {
				pair,
				id,
				is_bid,
				price,
				base_amount,
				quote_amount,
				total,
				..
			} => {
				// Total is denominated in the quote token.
				let (base_str, quote_str, total_str) = match meta.pair(*pair) {
					Some(p) => (
						token_display(meta, p.base, *base_amount),
						token_display(meta, p.quote, *quote_amount),
						token_display(meta, p.quote, *total),
					),
					None => (
						base_amount.to_string(),
						quote_amount.to_string(),
						total.to_string(),
					),
				};
				tracing::info!(
					pair = %pair_symbol(meta, *pair),
					order_id = id,
					side = side(*is_bid),
					price = %adjusted_or_raw(*price, PRICE_DECIMALS),
					base = %base_str,
					quote = %quote_str,
					total = %total_str,
					"Order matched"
				);
			}
			ExchangeEvent::OrderCanceled {
				pair,
				id,
				is_bid,
				amount,
				..
			} => {
				tracing::info!(
					pair = %pair_symbol(meta, *pair),
					order_id = id,
					side = side(*is_bid),
					remaining = %amount,
					"Order canceled"
				);
			}
			ExchangeEvent::NewMarketPrice { pair, price } => {
				tracing::info!(
					pair = %pair_symbol(meta, *pair),
					price = %adjusted_or_raw(*price, PRICE_DECIMALS),
					"New market price"
				);
			}
			ExchangeEvent::PairAdded {
				pair,
				base,
				quote,
				listing_price,
			} => {
				tracing::info!(
					pair = %pair,
					base = %base,
					quote = %quote,
					listing_price = %adjusted_or_raw(*listing_price, PRICE_DECIMALS),
					"Pair added"
				);
			}
			ExchangeEvent::ListingCostSet { payment, amount } => {
				tracing::info!(payment = %payment, amount = %amount, "Listing cost set");
			}
			ExchangeEvent::PairUpdated { pair, base, quote } => {
				tracing::info!(pair = %pair, base = %base, quote = %quote, "Pair updated");
			}
		}
	}
}

fn side(is_bid: bool) -> &'static str {
	if is_bid {
		"buy"
	} else {
		"sell"
	}
}

fn pair_symbol(meta: &ExchangeMetadata, pair: Address) -> String {
	meta.pair(pair)
		.map(|p| p.symbol.clone())
		.unwrap_or_else(|| pair.to_string())
}

fn adjusted_or_raw(raw: U256, decimals: u32) -> String {
	adjust(raw, decimals)
		.map(|d| d.to_string())
		.unwrap_or_else(|| raw.to_string())
}

/// A raw amount rendered in the token's human units with its symbol, or the
/// raw integer when the token is unknown.
fn token_display(meta: &ExchangeMetadata, token: Address, raw: U256) -> String {
	match meta.token(token) {
		Some(t) => format!("{} {}", adjusted_or_raw(raw, u32::from(t.decimals)), t.symbol),
		None => raw.to_string(),
	}
}
