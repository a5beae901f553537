//! Chain-agnostic primitives shared by the bridge client and transaction builders:
//! assets, coins, multi-asset gas and transaction identifiers.

pub mod asset;
pub mod coin;
pub mod fees;
pub mod gas;
pub mod tx_id;

pub use asset::Asset;
pub use coin::{Coin, CoinError, Coins};
pub use fees::{
    bnb_multi_tx_fee, bnb_single_tx_fee, eth_gas_fee, eth_transfer_fee, make_eth_gas, ONE,
};
pub use gas::Gas;
pub use tx_id::{TxId, TxIdError, TxIds};
