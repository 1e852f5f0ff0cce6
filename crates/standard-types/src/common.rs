//! Common chain primitives shared across the SDK.

// Re-export commonly used ethereum types
pub use alloy_primitives::{Address, Bytes, B256, U256};

/// Decimal type used for human-unit prices and amounts.
pub use rust_decimal::Decimal;

/// Block number on the target chain.
pub type BlockNumber = u64;

/// Transaction hash.
pub type TxHash = B256;
