use serde::{Deserialize, Serialize};

use super::coin::safe_sub;
use super::{Coin, CoinError, Coins};

/// Fee amount across one or more assets.
///
/// Uniqueness of assets is not enforced at rest, but [`Gas::add`] merges into
/// existing entries and only appends assets it has not seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gas(pub Vec<Coin>);

impl Gas {
    pub fn new(coins: Vec<Coin>) -> Self {
        Gas(coins)
    }

    pub fn coins(&self) -> &[Coin] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Surfaces the error of the first invalid coin
    pub fn valid(&self) -> Result<(), CoinError> {
        for coin in &self.0 {
            coin.valid()?;
        }
        Ok(())
    }

    /// True for no coins at all, and also when every coin has a zero amount
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Coin::is_empty)
    }

    /// Merge `other` into this gas, adding amounts of matching assets and
    /// appending the rest.
    pub fn add(mut self, other: Gas) -> Gas {
        for coin in other.0 {
            match self.0.iter_mut().find(|existing| existing.asset == coin.asset) {
                Some(existing) => existing.amount += coin.amount,
                None => self.0.push(coin),
            }
        }
        self
    }

    /// Subtract `other`, saturating each amount at zero. Assets missing from
    /// this gas are ignored rather than recorded as debts.
    pub fn sub(mut self, other: &Gas) -> Gas {
        for coin in &other.0 {
            if let Some(existing) = self.0.iter_mut().find(|existing| existing.asset == coin.asset) {
                existing.amount = safe_sub(&existing.amount, &coin.amount);
            }
        }
        self
    }

    /// Order-insensitive comparison. Both operands are left sorted by asset.
    pub fn equals(&mut self, other: &mut Gas) -> bool {
        self.0.sort_by_cached_key(|coin| coin.asset.to_string());
        other.0.sort_by_cached_key(|coin| coin.asset.to_string());

        self.0.len() == other.0.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }

    pub fn to_coins(&self) -> Coins {
        Coins(
            self.0
                .iter()
                .map(|coin| Coin::new(coin.asset.clone(), coin.amount.clone()))
                .collect(),
        )
    }
}

impl From<Vec<Coin>> for Gas {
    fn from(coins: Vec<Coin>) -> Self {
        Gas(coins)
    }
}
