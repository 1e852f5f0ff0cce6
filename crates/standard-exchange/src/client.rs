//! The exchange client: intent in, execution result out.
//!
//! One call runs the whole pipeline: encode the intent, build a transaction
//! with a fresh nonce, sign, submit, wait for confirmation, then decode the
//! receipt's logs into order outcomes. A per-client lock serializes the
//! build-to-confirm window so concurrent calls from one account cannot race
//! on the nonce.

use crate::api::MetadataClient;
use crate::config::ClientConfig;
use crate::encode::{self, EncodedCall};
use crate::error::{ExchangeError, Result};
use crate::{events, mapper};
use standard_account::{LocalWallet, TransactionSigner};
use standard_delivery::{DeliveryInterface, HttpDelivery};
use standard_types::{
	Address, BatchOrder, Decimal, ExchangeMetadata, ExecutionResult, OrderIntent, OrderOutcome,
	Transaction,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Per-call gas overrides. Unset fields fall back to the client defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct GasOverrides {
	pub gas_limit: Option<u64>,
	pub gas_price: Option<u128>,
}

/// Client for one account against one matching engine.
pub struct ExchangeClient {
	signer: Arc<dyn TransactionSigner>,
	delivery: Arc<dyn DeliveryInterface>,
	matching_engine: Address,
	chain_id: u64,
	metadata: ExchangeMetadata,
	default_gas_limit: u64,
	default_gas_price: Option<u128>,
	confirmation_timeout: Duration,
	submission_lock: Mutex<()>,
}

impl ExchangeClient {
	/// Creates a client from configuration and a pre-built metadata snapshot.
	pub fn new(config: &ClientConfig, metadata: ExchangeMetadata) -> Result<Self> {
		let signer = Arc::new(LocalWallet::new(&config.private_key)?);
		let delivery = Arc::new(HttpDelivery::new(&config.rpc_url)?);
		Ok(Self::with_components(signer, delivery, config, metadata))
	}

	/// Creates a client from injected signer and delivery components.
	pub fn with_components(
		signer: Arc<dyn TransactionSigner>,
		delivery: Arc<dyn DeliveryInterface>,
		config: &ClientConfig,
		metadata: ExchangeMetadata,
	) -> Self {
		Self {
			signer,
			delivery,
			matching_engine: config.matching_engine,
			chain_id: config.chain_id,
			metadata,
			default_gas_limit: config.gas_limit,
			default_gas_price: config.gas_price,
			confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
			submission_lock: Mutex::new(()),
		}
	}

	/// Creates a client and bootstraps metadata from the exchange API.
	pub async fn connect(config: &ClientConfig) -> Result<Self> {
		let api_url = config.api_url.as_ref().ok_or_else(|| {
			ExchangeError::Validation("api_url is required to bootstrap metadata".to_string())
		})?;
		let metadata = MetadataClient::new(api_url, config.api_key.clone())
			.fetch_metadata()
			.await?;
		Self::new(config, metadata)
	}

	/// The account address transactions are sent from.
	pub fn address(&self) -> Address {
		self.signer.address()
	}

	pub fn metadata(&self) -> &ExchangeMetadata {
		&self.metadata
	}

	/// Replaces the metadata snapshot, e.g. after new listings.
	pub fn set_metadata(&mut self, metadata: ExchangeMetadata) {
		self.metadata = metadata;
	}

	#[allow(clippy::too_many_arguments)]
	pub async fn market_buy(
		&self,
		base: Address,
		quote: Address,
		quote_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::MarketBuy {
			base,
			quote,
			quote_amount,
			is_maker,
			n,
			recipient,
			slippage_limit,
		})
		.await
	}

	#[allow(clippy::too_many_arguments)]
	pub async fn market_sell(
		&self,
		base: Address,
		quote: Address,
		base_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::MarketSell {
			base,
			quote,
			base_amount,
			is_maker,
			n,
			recipient,
			slippage_limit,
		})
		.await
	}

	#[allow(clippy::too_many_arguments)]
	pub async fn limit_buy(
		&self,
		base: Address,
		quote: Address,
		price: Decimal,
		quote_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::LimitBuy {
			base,
			quote,
			price,
			quote_amount,
			is_maker,
			n,
			recipient,
		})
		.await
	}

	#[allow(clippy::too_many_arguments)]
	pub async fn limit_sell(
		&self,
		base: Address,
		quote: Address,
		price: Decimal,
		base_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::LimitSell {
			base,
			quote,
			price,
			base_amount,
			is_maker,
			n,
			recipient,
		})
		.await
	}

	pub async fn market_buy_eth(
		&self,
		base: Address,
		eth_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::MarketBuyEth {
			base,
			is_maker,
			n,
			recipient,
			slippage_limit,
			eth_amount,
		})
		.await
	}

	pub async fn market_sell_eth(
		&self,
		quote: Address,
		eth_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
		slippage_limit: Decimal,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::MarketSellEth {
			quote,
			is_maker,
			n,
			recipient,
			slippage_limit,
			eth_amount,
		})
		.await
	}

	pub async fn limit_buy_eth(
		&self,
		base: Address,
		price: Decimal,
		eth_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::LimitBuyEth {
			base,
			price,
			is_maker,
			n,
			recipient,
			eth_amount,
		})
		.await
	}

	pub async fn limit_sell_eth(
		&self,
		quote: Address,
		price: Decimal,
		eth_amount: Decimal,
		is_maker: bool,
		n: u32,
		recipient: Address,
	) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::LimitSellEth {
			quote,
			price,
			is_maker,
			n,
			recipient,
			eth_amount,
		})
		.await
	}

	/// Places a batch of orders in one all-or-nothing transaction.
	pub async fn create_orders(&self, orders: Vec<BatchOrder>) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::CreateOrders(orders)).await
	}

	/// Replaces a batch of existing orders in one transaction.
	pub async fn update_orders(&self, orders: Vec<BatchOrder>) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::UpdateOrders(orders)).await
	}

	/// Cancels orders identified by their packed id strings.
	pub async fn cancel_orders(&self, order_ids: Vec<String>) -> Result<ExecutionResult> {
		self.execute(&OrderIntent::CancelOrders(order_ids)).await
	}

	/// Executes an intent with default gas settings.
	pub async fn execute(&self, intent: &OrderIntent) -> Result<ExecutionResult> {
		self.execute_with_gas(intent, GasOverrides::default()).await
	}

	/// Executes an intent with per-call gas overrides.
	pub async fn execute_with_gas(
		&self,
		intent: &OrderIntent,
		gas: GasOverrides,
	) -> Result<ExecutionResult> {
		let encoded = encode::encode_intent(intent, &self.metadata)?;

		tracing::info!(
			function = encoded.function,
			from = %self.signer.address(),
			"Executing intent"
		);

		// Nonce fetch through confirmation happens under the lock; a second
		// intent started before this one is mined would otherwise reuse the
		// nonce.
		let receipt = {
			let _guard = self.submission_lock.lock().await;

			let tx = self.build_transaction(&encoded, gas).await?;
			let signed = self.signer.sign_transaction(&tx).await?;
			let hash = self.delivery.submit(&signed).await?;
			self.delivery
				.wait_for_confirmation(hash, self.confirmation_timeout)
				.await?
		};

		let decoded = events::decode_receipt(&receipt, self.matching_engine);
		mapper::log_summaries(&decoded, &self.metadata);
		let infos = mapper::map_order_infos(&decoded, &self.metadata);

		tracing::info!(
			function = encoded.function,
			block = receipt.block_number,
			gas_used = receipt.gas_used,
			events = decoded.len(),
			orders_placed = infos.len(),
			"Intent executed"
		);

		Ok(ExecutionResult {
			transaction_hash: receipt.hash,
			block_number: receipt.block_number,
			gas_used: receipt.gas_used,
			status: receipt.status,
			events: decoded,
			outcome: OrderOutcome::from_infos(infos),
		})
	}

	async fn build_transaction(
		&self,
		encoded: &EncodedCall,
		gas: GasOverrides,
	) -> Result<Transaction> {
		let nonce = self.delivery.nonce(self.signer.address()).await?;

		let gas_price = match gas.gas_price.or(self.default_gas_price) {
			Some(price) => price,
			None => self.delivery.gas_price().await?,
		};

		// Batches may need more than the configured default.
		let gas_limit = gas
			.gas_limit
			.unwrap_or(self.default_gas_limit)
			.max(encoded.min_gas);

		Ok(Transaction {
			to: self.matching_engine,
			data: encoded.calldata.clone(),
			value: encoded.value,
			chain_id: self.chain_id,
			nonce,
			gas_limit,
			gas_price,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::abi;
	use alloy_sol_types::SolEvent;
	use async_trait::async_trait;
	use standard_delivery::DeliveryError;
	use standard_types::{
		LogEntry, PairMetadata, Receipt, SignedTransaction, TokenMetadata, B256, U256,
	};
	use std::sync::Mutex as StdMutex;

	const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn addr(byte: u8) -> Address {
		Address::from([byte; 20])
	}

	fn engine() -> Address {
		addr(0xee)
	}

	fn test_config() -> ClientConfig {
		ClientConfig {
			rpc_url: "https://rpc.example.com".to_string(),
			chain_id: 8453,
			private_key: DEV_KEY.to_string(),
			matching_engine: engine(),
			api_url: None,
			api_key: None,
			gas_limit: 3_000_000,
			gas_price: Some(6_000_000_000),
			confirmation_timeout_secs: 120,
		}
	}

	fn test_metadata() -> ExchangeMetadata {
		let mut meta = ExchangeMetadata::new();
		meta.insert_token(TokenMetadata {
			address: addr(0x01),
			symbol: "WETH".to_string(),
			decimals: 18,
		});
		meta.insert_token(TokenMetadata {
			address: addr(0x02),
			symbol: "USDC".to_string(),
			decimals: 6,
		});
		meta.insert_pair(PairMetadata {
			address: addr(0x10),
			symbol: "WETH/USDC".to_string(),
			base: addr(0x01),
			quote: addr(0x02),
		});
		meta
	}

	fn placed_log(id: u32) -> LogEntry {
		let data = abi::OrderPlaced {
			pair: addr(0x10),
			id,
			owner: addr(0x99),
			isBid: true,
			price: U256::from(250_000_000_000u64),
			placed: U256::from(2_000_000u64),
		}
		.encode_log_data();
		LogEntry {
			address: engine(),
			topics: data.topics().to_vec(),
			data: data.data,
		}
	}

	/// Delivery stub returning a canned receipt and recording submissions.
	struct MockDelivery {
		receipt: Receipt,
		reverted: bool,
		submitted: StdMutex<Vec<SignedTransaction>>,
	}

	impl MockDelivery {
		fn confirming(logs: Vec<LogEntry>) -> Self {
			Self {
				receipt: Receipt {
					hash: B256::from([0x42; 32]),
					block_number: 777,
					gas_used: 150_000,
					status: true,
					logs,
				},
				reverted: false,
				submitted: StdMutex::new(Vec::new()),
			}
		}

		fn reverting() -> Self {
			let mut mock = Self::confirming(vec![]);
			mock.reverted = true;
			mock
		}
	}

	#[async_trait]
	impl DeliveryInterface for MockDelivery {
		async fn nonce(&self, _address: Address) -> std::result::Result<u64, DeliveryError> {
			Ok(7)
		}

		async fn gas_price(&self) -> std::result::Result<u128, DeliveryError> {
			Ok(1_000_000_000)
		}

		async fn submit(&self, tx: &SignedTransaction) -> std::result::Result<B256, DeliveryError> {
			self.submitted.lock().unwrap().push(tx.clone());
			Ok(self.receipt.hash)
		}

		async fn wait_for_confirmation(
			&self,
			hash: B256,
			_timeout: Duration,
		) -> std::result::Result<Receipt, DeliveryError> {
			if self.reverted {
				return Err(DeliveryError::Reverted {
					hash,
					gas_used: self.receipt.gas_used,
				});
			}
			Ok(self.receipt.clone())
		}

		async fn receipt(&self, _hash: B256) -> std::result::Result<Option<Receipt>, DeliveryError> {
			Ok(Some(self.receipt.clone()))
		}
	}

	fn client_with(delivery: Arc<MockDelivery>) -> ExchangeClient {
		let signer = Arc::new(LocalWallet::new(DEV_KEY).unwrap());
		ExchangeClient::with_components(signer, delivery, &test_config(), test_metadata())
	}

	#[tokio::test]
	async fn test_limit_buy_pipeline() {
		let delivery = Arc::new(MockDelivery::confirming(vec![placed_log(5)]));
		let client = client_with(delivery.clone());

		let result = client
			.limit_buy(
				addr(0x01),
				addr(0x02),
				"2500".parse().unwrap(),
				"2".parse().unwrap(),
				true,
				1,
				addr(0x99),
			)
			.await
			.unwrap();

		assert!(result.status);
		assert_eq!(result.block_number, 777);
		assert_eq!(result.events.len(), 1);
		match &result.outcome {
			OrderOutcome::One(info) => {
				assert_eq!(info.order_id, 5);
				assert_eq!(info.amount_adjusted, "2".parse().unwrap());
			}
			other => panic!("unexpected outcome: {:?}", other),
		}

		// Exactly one raw transaction went out.
		assert_eq!(delivery.submitted.lock().unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_cancel_yields_no_orders() {
		let delivery = Arc::new(MockDelivery::confirming(vec![]));
		let client = client_with(delivery);

		let id = format!("{}_{}_True_5", addr(0x01), addr(0x02));
		let result = client.cancel_orders(vec![id]).await.unwrap();
		assert!(result.outcome.is_empty());
	}

	#[tokio::test]
	async fn test_revert_surfaces_as_error() {
		let delivery = Arc::new(MockDelivery::reverting());
		let client = client_with(delivery.clone());

		let err = client
			.market_buy(
				addr(0x01),
				addr(0x02),
				"1".parse().unwrap(),
				false,
				1,
				addr(0x99),
				"0.1".parse().unwrap(),
			)
			.await
			.unwrap_err();

		assert!(err.is_reverted());
		// The transaction did go out before reverting.
		assert_eq!(delivery.submitted.lock().unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_validation_fails_before_submission() {
		let delivery = Arc::new(MockDelivery::confirming(vec![]));
		let client = client_with(delivery.clone());

		let err = client.cancel_orders(vec![]).await.unwrap_err();
		assert!(matches!(err, ExchangeError::Validation(_)));
		assert!(delivery.submitted.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_batch_outcome_many() {
		let delivery = Arc::new(MockDelivery::confirming(vec![placed_log(1), placed_log(2)]));
		let client = client_with(delivery);

		let order = BatchOrder {
			base: addr(0x01),
			quote: addr(0x02),
			is_bid: true,
			is_limit: true,
			order_id: None,
			price: "2500".parse().unwrap(),
			amount: "2".parse().unwrap(),
			n: 1,
			recipient: addr(0x99),
			is_eth: false,
		};
		let result = client
			.create_orders(vec![order.clone(), order])
			.await
			.unwrap();

		assert_eq!(result.outcome.len(), 2);
		assert!(matches!(result.outcome, OrderOutcome::Many(_)));
	}
}
