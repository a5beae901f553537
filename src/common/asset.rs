use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CoinError;

/// Identifier of a fungible unit on a specific chain, rendered as `CHAIN.SYMBOL`.
///
/// The default value is the empty ("nil") asset, which never passes coin validation.
/// Symbols are upper-cased, except path denoms such as `ibc/27394FB0...` or
/// `factory/{creator}/{sub}` whose case is part of the on-chain name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    chain: String,
    symbol: String,
}

impl Asset {
    pub fn new(chain: &str, symbol: &str) -> Self {
        Self {
            chain: chain.trim().to_uppercase(),
            symbol: normalize_symbol(symbol.trim()),
        }
    }

    /// Native ether on the EVM-style chain
    pub fn eth() -> Self {
        Self::new("ETH", "ETH")
    }

    /// Native coin of the fixed-fee BNB chain
    pub fn bnb() -> Self {
        Self::new("BNB", "BNB")
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty() && self.symbol.is_empty()
    }

    /// Both chain and symbol are set. A half-filled asset cannot be
    /// rendered and parsed back.
    pub fn is_complete(&self) -> bool {
        !self.chain.is_empty() && !self.symbol.is_empty()
    }

    /// Denomination used by Cosmos bank balances for this asset
    pub fn denom(&self) -> String {
        if is_path_denom(&self.symbol) {
            return self.symbol.clone();
        }
        self.symbol.to_lowercase()
    }
}

fn is_path_denom(symbol: &str) -> bool {
    symbol.contains('/')
}

fn normalize_symbol(symbol: &str) -> String {
    if is_path_denom(symbol) {
        symbol.to_string()
    } else {
        symbol.to_uppercase()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}.{}", self.chain, self.symbol)
    }
}

impl FromStr for Asset {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Asset::default());
        }
        let (chain, symbol) = match s.split_once('.') {
            Some((chain, symbol)) => (chain, symbol),
            None => (s, s),
        };
        if chain.is_empty() || symbol.is_empty() {
            return Err(CoinError::InvalidAsset(s.to_string()));
        }
        Ok(Asset::new(chain, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = CoinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}
