use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_TX_DATA_PATH: &str = "/bridge/bridge/transaction_data";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub signer: SignerConfig,
}

/// Connection parameters for one remote chain. Fixed for the lifetime of a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub chain_id: String,
    /// REST host, `host:port` or a full `scheme://host:port`
    pub chain_host: String,
    /// Tendermint RPC endpoint used by transaction builders
    pub chain_rpc: String,
    pub chain_home_folder: PathBuf,
    /// REST path of the bridge module's transaction data listing
    #[serde(default = "default_tx_data_path")]
    pub tx_data_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    // The mnemonic is read from BRIDGE_MNEMONIC, never from this file
    pub name: String,
    /// Bech32 prefix of signer addresses on the remote chain
    pub address_prefix: String,
    #[serde(default)]
    pub pub_key: String,
    #[serde(default)]
    pub voter_address: String,
    #[serde(default = "default_keyring_backend")]
    pub keyring_backend: String,
}

fn default_tx_data_path() -> String {
    DEFAULT_TX_DATA_PATH.to_string()
}

fn default_keyring_backend() -> String {
    "test".to_string()
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bridge")
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            chain_id: "testing".to_string(),
            chain_host: "localhost:1317".to_string(),
            chain_rpc: "localhost:26657".to_string(),
            chain_home_folder: default_home(),
            tx_data_path: default_tx_data_path(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            initial_backoff_ms: 1000,
            max_backoff_ms: 30000,
            timeout_secs: 30,
        }
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            name: "bridge".to_string(),
            address_prefix: "cosmos".to_string(),
            pub_key: String::new(),
            voter_address: String::new(),
            keyring_backend: default_keyring_backend(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
