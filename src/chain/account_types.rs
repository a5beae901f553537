//! Polymorphic account decoding for the Cosmos auth REST endpoint.
//!
//! `/cosmos/auth/v1beta1/accounts/{address}` returns the account wrapped in an
//! `Any` whose concrete shape depends on `@type`. Every supported shape nests a
//! `BaseAccount` somewhere; this module finds it.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope returned by the account endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResp {
    pub account: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaseAccount {
    pub address: String,
    #[serde(default)]
    pub pub_key: Option<Value>,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub account_number: u64,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Base(BaseAccount),
    Module { base: BaseAccount, name: String },
    Eth(BaseAccount),
    BaseVesting(BaseAccount),
    ContinuousVesting(BaseAccount),
    DelayedVesting(BaseAccount),
    PeriodicVesting(BaseAccount),
    PermanentLocked(BaseAccount),

    // Kept so callers can log what the chain sent
    Unsupported { type_url: String, raw_value: Value },
}

/// Common account information extracted from any account type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub address: String,
    pub sequence: u64,
    pub account_number: u64,
}

impl Account {
    /// Decode an `@type`-tagged account object into the matching variant.
    ///
    /// Only the last path segment of the type URL is matched, so
    /// `/ethermint.types.v1.EthAccount` and `/injective.types.v1beta1.EthAccount`
    /// both decode as [`Account::Eth`].
    pub fn decode_json(value: &Value) -> Result<Self, serde_json::Error> {
        let type_url = value
            .get("@type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let kind = type_url.rsplit('.').next().unwrap_or_default();

        let account = match kind {
            "BaseAccount" => Account::Base(BaseAccount::deserialize(value)?),
            "ModuleAccount" => Account::Module {
                base: BaseAccount::deserialize(&value["base_account"])?,
                name: value
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            "EthAccount" => Account::Eth(BaseAccount::deserialize(&value["base_account"])?),
            "BaseVestingAccount" => {
                Account::BaseVesting(BaseAccount::deserialize(&value["base_account"])?)
            }
            "ContinuousVestingAccount" => {
                Account::ContinuousVesting(vesting_base(value)?)
            }
            "DelayedVestingAccount" => Account::DelayedVesting(vesting_base(value)?),
            "PeriodicVestingAccount" => Account::PeriodicVesting(vesting_base(value)?),
            "PermanentLockedAccount" => Account::PermanentLocked(vesting_base(value)?),
            _ => {
                log::warn!("Encountered unsupported account type: {}", type_url);
                Account::Unsupported {
                    type_url: type_url.to_string(),
                    raw_value: value.clone(),
                }
            }
        };

        Ok(account)
    }

    /// `None` for unsupported account types
    pub fn get_account_info(&self) -> Option<AccountInfo> {
        let base = match self {
            Account::Base(base)
            | Account::Module { base, .. }
            | Account::Eth(base)
            | Account::BaseVesting(base)
            | Account::ContinuousVesting(base)
            | Account::DelayedVesting(base)
            | Account::PeriodicVesting(base)
            | Account::PermanentLocked(base) => base,
            Account::Unsupported { .. } => return None,
        };

        Some(AccountInfo {
            address: base.address.clone(),
            sequence: base.sequence,
            account_number: base.account_number,
        })
    }

    pub fn account_type(&self) -> &'static str {
        match self {
            Account::Base(_) => "BaseAccount",
            Account::Module { .. } => "ModuleAccount",
            Account::Eth(_) => "EthAccount",
            Account::BaseVesting(_) => "BaseVestingAccount",
            Account::ContinuousVesting(_) => "ContinuousVestingAccount",
            Account::DelayedVesting(_) => "DelayedVestingAccount",
            Account::PeriodicVesting(_) => "PeriodicVestingAccount",
            Account::PermanentLocked(_) => "PermanentLockedAccount",
            Account::Unsupported { .. } => "UnsupportedAccount",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Account::Unsupported { .. })
    }
}

fn vesting_base(value: &Value) -> Result<BaseAccount, serde_json::Error> {
    BaseAccount::deserialize(&value["base_vesting_account"]["base_account"])
}

/// The gateway renders uint64 as strings; some nodes emit plain numbers
fn u64_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        Raw::Number(n) => Ok(n),
    }
}
