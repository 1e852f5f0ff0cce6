//! Client SDK for the Standard on-chain order book.
//!
//! Turns trading intents into signed transactions against the matching
//! engine, submits them, waits for confirmation, and decodes the resulting
//! event logs into typed order outcomes.
//!
//! ```no_run
//! use standard_exchange::{ConfigLoader, ExchangeClient};
//!
//! # async fn run() -> standard_exchange::Result<()> {
//! let config = ConfigLoader::from_file("config.toml")?;
//! let client = ExchangeClient::connect(&config).await?;
//!
//! let result = client
//! 	.limit_buy(
//! 		"0x4200000000000000000000000000000000000006".parse().unwrap(),
//! 		"0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".parse().unwrap(),
//! 		"2500".parse().unwrap(), // price
//! 		"100".parse().unwrap(),  // quote amount
//! 		true,
//! 		1,
//! 		client.address(),
//! 	)
//! 	.await?;
//!
//! if let Some(order) = result.outcome.first() {
//! 	println!("placed order {}", order.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod api;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod events;
pub mod mapper;

pub use api::MetadataClient;
pub use client::{ExchangeClient, GasOverrides};
pub use config::{ClientConfig, ConfigError, ConfigLoader};
pub use error::{ExchangeError, Result};

pub use standard_types as types;
