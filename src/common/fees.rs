//! Chain-specific fee calculators. All arithmetic is done on [`BigUint`] so that
//! realistic gas prices never overflow.

use num_bigint::BigUint;

use super::{Asset, Coin, Gas};

/// Smallest units per whole unit on the bridge's own ledger
pub const ONE: u64 = 100_000_000;

const ETH_TRANSFER_GAS: u64 = 21_000;
const ETH_GAS_PER_BYTE: u64 = 68;
const BNB_SINGLE_TX_FEE: u64 = 37_500;
const BNB_MULTI_TX_FEE: u64 = 30_000;

/// Flat gas of a single-signature ETH transfer, usable as an estimate when no
/// live gas price is at hand.
pub fn eth_transfer_fee() -> Gas {
    Gas::new(vec![Coin::new(Asset::eth(), ETH_TRANSFER_GAS)])
}

/// `(21000 + 68 * msg_len) * gas_price`, in wei
pub fn eth_gas_fee(gas_price: &BigUint, msg_len: u64) -> Gas {
    let gas_units = BigUint::from(ETH_TRANSFER_GAS) + BigUint::from(ETH_GAS_PER_BYTE) * msg_len;
    Gas::new(vec![Coin::new(Asset::eth(), gas_units * gas_price)])
}

/// `gas * gas_price / (100 * ONE)`, truncated like the chain's own fee rounding
pub fn make_eth_gas(gas_price: &BigUint, gas: u64) -> Gas {
    let amount = BigUint::from(gas) * gas_price / (ONE * 100);
    Gas::new(vec![Coin::new(Asset::eth(), amount)])
}

pub fn bnb_single_tx_fee() -> Gas {
    Gas::new(vec![Coin::new(Asset::bnb(), BNB_SINGLE_TX_FEE)])
}

pub fn bnb_multi_tx_fee() -> Gas {
    Gas::new(vec![Coin::new(Asset::bnb(), BNB_MULTI_TX_FEE)])
}
