//! Exchange REST API client for metadata bootstrap.
//!
//! Fetches listed pairs and tokens, the source of the decimal counts the
//! encoder and mapper need. The response payloads carry far more fields than
//! the SDK uses; only identity and decimals are deserialized.

use crate::error::{ExchangeError, Result};
use serde::Deserialize;
use standard_types::{Address, ExchangeMetadata, PairMetadata, TokenMetadata};

const PAGE_LIMIT: u32 = 100;

/// Termination is based on pages fetched, not entries stored: listings with
/// duplicate ids collapse into one map entry, so a stored-count comparison
/// against `total_count` could never be satisfied.
fn is_last_page(page: u32, fetched: usize, total_count: u64) -> bool {
	fetched == 0 || u64::from(page) * u64::from(PAGE_LIMIT) >= total_count
}

#[derive(Debug, Deserialize)]
struct TokenRef {
	id: Address,
}

#[derive(Debug, Deserialize)]
struct PairPayload {
	id: Address,
	symbol: String,
	base: TokenRef,
	quote: TokenRef,
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
	id: Address,
	symbol: String,
	decimals: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairsResponse {
	pairs: Vec<PairPayload>,
	total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokensResponse {
	tokens: Vec<TokenPayload>,
	total_count: u64,
}

/// HTTP client for the exchange metadata endpoints.
pub struct MetadataClient {
	http: reqwest::Client,
	base_url: String,
	api_key: Option<String>,
}

impl MetadataClient {
	pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
			api_key,
		}
	}

	async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = format!("{}{}", self.base_url, path);
		let mut request = self
			.http
			.get(&url)
			.header("Content-Type", "application/json");
		if let Some(key) = &self.api_key {
			request = request.header("x-api-key", key);
		}

		let response = request
			.send()
			.await
			.map_err(|e| ExchangeError::Api(format!("Request to {} failed: {}", url, e)))?;

		let status = response.status();
		if !status.is_success() {
			return Err(ExchangeError::Api(format!(
				"{} returned HTTP {}",
				url, status
			)));
		}

		response
			.json()
			.await
			.map_err(|e| ExchangeError::Api(format!("Malformed response from {}: {}", url, e)))
	}

	async fn fetch_pairs(&self, limit: u32, page: u32) -> Result<PairsResponse> {
		self.get_json(&format!("/api/pairs/{}/{}", limit, page)).await
	}

	async fn fetch_tokens(&self, limit: u32, page: u32) -> Result<TokensResponse> {
		self.get_json(&format!("/api/tokens/{}/{}", limit, page)).await
	}

	/// Fetches all listed pairs and tokens into one metadata snapshot.
	pub async fn fetch_metadata(&self) -> Result<ExchangeMetadata> {
		let mut metadata = ExchangeMetadata::new();

		let mut page = 1;
		loop {
			let response = self.fetch_pairs(PAGE_LIMIT, page).await?;
			let fetched = response.pairs.len();
			for pair in response.pairs {
				metadata.insert_pair(PairMetadata {
					address: pair.id,
					symbol: pair.symbol,
					base: pair.base.id,
					quote: pair.quote.id,
				});
			}
			if is_last_page(page, fetched, response.total_count) {
				break;
			}
			page += 1;
		}

		let mut page = 1;
		loop {
			let response = self.fetch_tokens(PAGE_LIMIT, page).await?;
			let fetched = response.tokens.len();
			for token in response.tokens {
				metadata.insert_token(TokenMetadata {
					address: token.id,
					symbol: token.symbol,
					decimals: token.decimals,
				});
			}
			if is_last_page(page, fetched, response.total_count) {
				break;
			}
			page += 1;
		}

		tracing::info!(
			pairs = metadata.pair_count(),
			tokens = metadata.token_count(),
			"Fetched exchange metadata"
		);
		Ok(metadata)
	}
}
