use cosmwasm_std::Uint128;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::Asset;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoinError {
    #[error("invalid asset: {0:?}")]
    InvalidAsset(String),

    #[error("coin has no asset")]
    EmptyAsset,

    #[error("invalid amount {0:?}: must be a non-negative integer")]
    InvalidAmount(String),

    #[error("amount {amount} of {asset} does not fit in 128 bits")]
    Overflow { asset: String, amount: BigUint },
}

/// A quantity of a single asset. Amounts are unbounded and never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub asset: Asset,
    #[serde(with = "amount_string")]
    pub amount: BigUint,
}

impl Coin {
    pub fn new(asset: Asset, amount: impl Into<BigUint>) -> Self {
        Self {
            asset,
            amount: amount.into(),
        }
    }

    /// Build a coin from a decimal amount string such as `"1500000"`
    pub fn parse(asset: Asset, amount: &str) -> Result<Self, CoinError> {
        Ok(Self::new(asset, parse_amount(amount)?))
    }

    pub fn valid(&self) -> Result<(), CoinError> {
        if self.asset.is_empty() {
            return Err(CoinError::EmptyAsset);
        }
        if !self.asset.is_complete() {
            return Err(CoinError::InvalidAsset(self.asset.to_string()));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_zero()
    }

    /// Fixed-width amount for wire formats that carry `Uint128`
    pub fn amount_u128(&self) -> Result<Uint128, CoinError> {
        u128::try_from(&self.amount)
            .map(Uint128::new)
            .map_err(|_| CoinError::Overflow {
                asset: self.asset.to_string(),
                amount: self.amount.clone(),
            })
    }
}

/// `a - b`, or zero when `b` exceeds `a`
pub fn safe_sub(a: &BigUint, b: &BigUint) -> BigUint {
    if a > b {
        a - b
    } else {
        BigUint::zero()
    }
}

pub fn parse_amount(raw: &str) -> Result<BigUint, CoinError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoinError::InvalidAmount(raw.to_string()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| CoinError::InvalidAmount(raw.to_string()))
}

/// Plain balance sequence, the generic counterpart of [`super::Gas`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(pub Vec<Coin>);

impl Coins {
    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to bank coins, failing on any amount wider than 128 bits
    pub fn to_cosmos_coins(&self) -> Result<Vec<cosmwasm_std::Coin>, CoinError> {
        self.0
            .iter()
            .map(|coin| {
                coin.valid()?;
                Ok(cosmwasm_std::Coin {
                    denom: coin.asset.denom(),
                    amount: coin.amount_u128()?,
                })
            })
            .collect()
    }

    /// Read bank coins of `chain`, mapping each denom to `CHAIN.DENOM`
    pub fn from_cosmos_coins(chain: &str, coins: &[cosmwasm_std::Coin]) -> Self {
        Coins(
            coins
                .iter()
                .map(|c| Coin::new(Asset::new(chain, &c.denom), c.amount.u128()))
                .collect(),
        )
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Coins(coins)
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

mod amount_string {
    use super::*;

    pub fn serialize<S: Serializer>(amount: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_amount(&raw).map_err(serde::de::Error::custom)
    }
}
