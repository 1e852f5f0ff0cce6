//! Pair and token metadata consumed by the pipeline.
//!
//! Built from the exchange REST API (or injected directly) and treated as
//! read-only by the SDK; the caller owns refreshing it. Keys are typed
//! addresses, so the mixed-case address strings the API and the chain emit
//! collapse to one key at parse time.

use crate::common::Address;
use std::collections::HashMap;

/// A listed token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TokenMetadata {
	pub address: Address,
	pub symbol: String,
	pub decimals: u8,
}

/// A listed trading pair and its base/quote resolution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PairMetadata {
	pub address: Address,
	pub symbol: String,
	pub base: Address,
	pub quote: Address,
}

/// Lookup maps for pair identity and token decimals.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ExchangeMetadata {
	pairs: HashMap<Address, PairMetadata>,
	tokens: HashMap<Address, TokenMetadata>,
}

impl ExchangeMetadata {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert_pair(&mut self, pair: PairMetadata) {
		self.pairs.insert(pair.address, pair);
	}

	pub fn insert_token(&mut self, token: TokenMetadata) {
		self.tokens.insert(token.address, token);
	}

	pub fn pair(&self, address: Address) -> Option<&PairMetadata> {
		self.pairs.get(&address)
	}

	pub fn token(&self, address: Address) -> Option<&TokenMetadata> {
		self.tokens.get(&address)
	}

	/// Decimal count for a token, if known.
	pub fn decimals(&self, token: Address) -> Option<u8> {
		self.tokens.get(&token).map(|t| t.decimals)
	}

	pub fn pair_count(&self) -> usize {
		self.pairs.len()
	}

	pub fn token_count(&self) -> usize {
		self.tokens.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lookup_is_case_free() {
		// The same address parsed from lowercase and checksummed strings
		// must hit the same entry.
		let lower: Address = "0xdeadbeef00000000000000000000000000000001"
			.parse()
			.unwrap();
		let upper: Address = "0xDEADBEEF00000000000000000000000000000001"
			.parse()
			.unwrap();

		let mut meta = ExchangeMetadata::new();
		meta.insert_token(TokenMetadata {
			address: lower,
			symbol: "TEST".to_string(),
			decimals: 6,
		});

		assert_eq!(meta.decimals(upper), Some(6));
	}
}
