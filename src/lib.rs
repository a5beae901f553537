// Library exports for chain_bridge

pub mod chain;
pub mod common;
pub mod config;

// Re-export main types for convenience
pub use chain::{BridgeClient, BridgeError, KeyProvider, LocalKeys, StaticKeys};
pub use common::{Asset, Coin, Coins, Gas, TxId};
pub use config::{BridgeConfig, Config, HttpConfig};
