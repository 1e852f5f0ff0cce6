//! Receipt log decoding.
//!
//! Logs are dispatched on their first topic against the known event
//! signatures. Logs emitted by other contracts, and logs whose topic is not a
//! matching-engine event, are skipped without failing the decode.

use crate::abi;
use alloy_primitives::LogData;
use alloy_sol_types::SolEvent;
use standard_types::{Address, DecodedEvent, ExchangeEvent, LogEntry, Receipt};

fn decode_log(log: &LogEntry) -> Option<ExchangeEvent> {
	let topic0 = log.topic0()?;
	let data = LogData::new_unchecked(log.topics.clone(), log.data.clone());

	let decoded = match *topic0 {
		t if t == abi::OrderPlaced::SIGNATURE_HASH => {
			abi::OrderPlaced::decode_log_data(&data, true).map(|e| ExchangeEvent::OrderPlaced {
				pair: e.pair,
				id: e.id,
				owner: e.owner,
				is_bid: e.isBid,
				price: e.price,
				placed: e.placed,
			})
		}
		t if t == abi::OrderMatched::SIGNATURE_HASH => {
			abi::OrderMatched::decode_log_data(&data, true).map(|e| ExchangeEvent::OrderMatched {
				pair: e.pair,
				id: e.id,
				owner: e.owner,
				is_bid: e.isBid,
				price: e.price,
				base_amount: e.baseAmount,
				quote_amount: e.quoteAmount,
				total: e.total,
			})
		}
		t if t == abi::OrderCanceled::SIGNATURE_HASH => {
			abi::OrderCanceled::decode_log_data(&data, true).map(|e| {
				ExchangeEvent::OrderCanceled {
					pair: e.pair,
					id: e.id,
					is_bid: e.isBid,
					price: e.price,
					amount: e.amount,
				}
			})
		}
		t if t == abi::NewMarketPrice::SIGNATURE_HASH => {
			abi::NewMarketPrice::decode_log_data(&data, true).map(|e| {
				ExchangeEvent::NewMarketPrice {
					pair: e.pair,
					price: e.price,
				}
			})
		}
		t if t == abi::PairAdded::SIGNATURE_HASH => {
			abi::PairAdded::decode_log_data(&data, true).map(|e| ExchangeEvent::PairAdded {
				pair: e.pair,
				base: e.base,
				quote: e.quote,
				listing_price: e.listingPrice,
			})
		}
		t if t == abi::ListingCostSet::SIGNATURE_HASH => {
			abi::ListingCostSet::decode_log_data(&data, true).map(|e| {
				ExchangeEvent::ListingCostSet {
					payment: e.payment,
					amount: e.amount,
				}
			})
		}
		t if t == abi::PairUpdated::SIGNATURE_HASH => {
			abi::PairUpdated::decode_log_data(&data, true).map(|e| ExchangeEvent::PairUpdated {
				pair: e.pair,
				base: e.base,
				quote: e.quote,
			})
		}
		_ => {
			tracing::warn!(topic = %topic0, "Could not decode log with unknown topic");
			return None;
		}
	};

	match decoded {
		Ok(event) => Some(event),
		Err(e) => {
			tracing::warn!(
				topic = %topic0,
				"Could not decode matching-engine log: {}",
				e
			);
			None
		}
	}
}

/// Decodes a confirmed receipt's logs into matching-engine events.
///
/// Only logs emitted by `matching_engine` are considered; order of emission
/// is preserved.
pub fn decode_receipt(receipt: &Receipt, matching_engine: Address) -> Vec<DecodedEvent> {
	receipt
		.logs
		.iter()
		.filter(|log| log.address == matching_engine)
		.filter_map(decode_log)
		.map(|event| DecodedEvent {
			event,
			transaction_hash: receipt.hash,
			block_number: receipt.block_number,
		})
		.collect()
}
