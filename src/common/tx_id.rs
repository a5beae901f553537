use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const HASH_LEN: usize = 64;
const PREFIXED_HASH_LEN: usize = 66;
const BLANK: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxIdError {
    #[error("txid error: must be {expected} characters (got {actual})")]
    Length { expected: usize, actual: usize },

    #[error("txid error: a 66 character hash must start with 0x")]
    MissingPrefix,
}

/// Transaction hash that compares equal across chains with different hash
/// spellings. Always stored upper-cased, so a `0x` prefix becomes `0X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxId(String);

pub type TxIds = Vec<TxId>;

impl TxId {
    pub fn new(hash: &str) -> Result<Self, TxIdError> {
        match hash.len() {
            HASH_LEN => {}
            PREFIXED_HASH_LEN => {
                if !hash.starts_with("0x") {
                    return Err(TxIdError::MissingPrefix);
                }
            }
            actual => {
                return Err(TxIdError::Length {
                    expected: HASH_LEN,
                    actual,
                })
            }
        }
        Ok(TxId(hash.to_ascii_uppercase()))
    }

    /// Sentinel for "no transaction"
    pub fn blank() -> Self {
        TxId(BLANK.to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.0 == BLANK
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TxId {
    type Err = TxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxId::new(s)
    }
}

impl TryFrom<String> for TxId {
    type Error = TxIdError;

    // Also takes the stored `0X` spelling so serialized ids read back
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() == PREFIXED_HASH_LEN && value.starts_with("0X") {
            return TxId::new(&format!("0x{}", &value[2..]));
        }
        TxId::new(&value)
    }
}

impl From<TxId> for String {
    fn from(id: TxId) -> Self {
        id.0
    }
}

impl AsRef<str> for TxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HASH: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

    #[test]
    fn test_plain_hash_is_upper_cased() {
        let id = TxId::new(HASH).unwrap();
        assert_eq!(id.as_str(), HASH.to_uppercase());
        // Normalizing the canonical form again changes nothing
        assert_eq!(TxId::new(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_prefixed_hash() {
        let raw = format!("0x{}", HASH);
        let id = TxId::new(&raw).unwrap();
        assert_eq!(id.as_str(), raw.to_uppercase());
        assert!(id.as_str().starts_with("0X"));

        let no_prefix = format!("ab{}", HASH);
        assert_eq!(TxId::new(&no_prefix), Err(TxIdError::MissingPrefix));

        // The canonical 0X form no longer carries a literal 0x prefix
        assert_eq!(TxId::new(id.as_str()), Err(TxIdError::MissingPrefix));
    }

    #[test]
    fn test_bad_lengths() {
        for len in [0usize, 1, 63, 65, 67, 128] {
            let raw = "a".repeat(len);
            assert_eq!(
                TxId::new(&raw),
                Err(TxIdError::Length { expected: 64, actual: len }),
                "length {}",
                len
            );
        }
        let err = TxId::new("abc").unwrap_err();
        assert_eq!(err.to_string(), "txid error: must be 64 characters (got 3)");
    }

    #[test]
    fn test_blank() {
        assert!(TxId::blank().is_blank());
        assert_eq!(TxId::new(BLANK).unwrap(), TxId::blank());
        assert!(!TxId::new(HASH).unwrap().is_blank());
    }

    #[test]
    fn test_serde() {
        let ids: TxIds = serde_json::from_str(&format!("[\"{}\"]", HASH)).unwrap();
        assert_eq!(ids[0].as_str(), HASH.to_uppercase());
        assert!(serde_json::from_str::<TxId>("\"deadbeef\"").is_err());

        let prefixed = TxId::new(&format!("0x{}", HASH)).unwrap();
        let json = serde_json::to_string(&prefixed).unwrap();
        assert_eq!(serde_json::from_str::<TxId>(&json).unwrap(), prefixed);
    }

    #[test]
    fn test_non_ascii_keeps_byte_length() {
        let raw = format!("\u{df}{}", "a".repeat(62));
        assert_eq!(raw.len(), HASH_LEN);

        let id = TxId::new(&raw).unwrap();
        assert_eq!(id.as_str().len(), HASH_LEN);
        assert_eq!(TxId::new(id.as_str()).unwrap(), id);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in "[0-9a-fA-F]{64}") {
            let id = TxId::new(&raw).unwrap();
            prop_assert_eq!(TxId::new(id.as_str()).unwrap(), id.clone());
            prop_assert_eq!(id.as_str(), raw.to_ascii_uppercase());
        }

        #[test]
        fn prop_any_64_byte_string_is_accepted(head in "\\PC{0,8}") {
            let raw = format!("{}{}", head, "a".repeat(HASH_LEN - head.len()));
            prop_assert_eq!(raw.len(), HASH_LEN);
            let id = TxId::new(&raw).unwrap();
            prop_assert_eq!(TxId::new(id.as_str()).unwrap(), id);
        }

        #[test]
        fn prop_prefixed_hash_is_accepted(hash in "[0-9a-fA-F]{64}") {
            let id = TxId::new(&format!("0x{}", hash)).unwrap();
            prop_assert!(id.as_str().starts_with("0X"));
            prop_assert_eq!(id.as_str().len(), PREFIXED_HASH_LEN);
        }

        #[test]
        fn prop_66_without_prefix_is_rejected(head in "[0-9a-zA-Z]{2}", hash in "[0-9a-f]{64}") {
            prop_assume!(head != "0x");
            prop_assert_eq!(TxId::new(&format!("{}{}", head, hash)), Err(TxIdError::MissingPrefix));
        }

        #[test]
        fn prop_other_lengths_are_rejected(raw in "[0-9a-f]{0,130}") {
            prop_assume!(raw.len() != HASH_LEN && raw.len() != PREFIXED_HASH_LEN);
            prop_assert_eq!(
                TxId::new(&raw),
                Err(TxIdError::Length { expected: HASH_LEN, actual: raw.len() })
            );
        }
    }
}
