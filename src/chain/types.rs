use serde::{Deserialize, Serialize};

use crate::chain::error::BridgeError;
use crate::common::{Asset, Coin, CoinError, TxId, TxIdError};

/// Response of `/cosmos/base/tendermint/v1beta1/blocks/latest`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastBlockInfo {
    #[serde(default)]
    pub block_id: BlockId,
    pub block: Block,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockId {
    #[serde(default)]
    pub hash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub chain_id: String,
    /// Decimal string, as the gateway encodes 64-bit integers
    pub height: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub proposer_address: String,
}

impl LastBlockInfo {
    pub fn height(&self) -> Result<u64, BridgeError> {
        let raw = &self.block.header.height;
        raw.parse::<u64>()
            .map_err(|_| BridgeError::InvalidHeight(raw.clone()))
    }
}

/// One cross-chain transfer recorded by the bridge module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionData {
    pub index: String,
    pub origin_chain: String,
    pub origin_address: String,
    pub target_chain: String,
    pub target_address: String,
    pub amount: String,
    pub time: String,
    pub creator: String,
    pub status: String,
    pub confirmed_block_hash: String,
    pub signed_key: String,
    pub fee: String,
}

impl TransactionData {
    /// The record index is the origin transaction hash
    pub fn tx_id(&self) -> Result<TxId, TxIdError> {
        TxId::new(&self.index)
    }

    /// Transferred amount as a coin of `asset`
    pub fn amount_coin(&self, asset: Asset) -> Result<Coin, CoinError> {
        Coin::parse(asset, &self.amount)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub next_key: Option<String>,
    #[serde(default)]
    pub total: String,
}

/// Response of the bridge module's `transaction_data` listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDataList {
    #[serde(default)]
    pub transaction_data: Vec<TransactionData>,
    #[serde(default)]
    pub pagination: Option<PageResponse>,
}
