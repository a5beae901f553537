//! Client for the remote chain's REST API, used by the local signer to observe
//! heights, account state and bridge transaction data.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use url::Url;

use crate::chain::account_types::{Account, AccountResp};
use crate::chain::context::{node_uri, BroadcastContext, BroadcastMode};
use crate::chain::error::BridgeError;
use crate::chain::sequence::{AccountState, SequenceLease};
use crate::chain::transport::{HttpTransport, RetryingHttpClient};
use crate::chain::types::{LastBlockInfo, TransactionDataList};
use crate::chain::wallet::KeyProvider;
use crate::config::{BridgeConfig, HttpConfig};

/// Block time of the remote chain; a cached height younger than this is reused
pub const BLOCK_TIME: Duration = Duration::from_secs(5);

const ACCOUNTS_PATH: &str = "/cosmos/auth/v1beta1/accounts";
const LATEST_BLOCK_PATH: &str = "/cosmos/base/tendermint/v1beta1/blocks/latest";

#[derive(Debug, Default)]
struct HeightCache {
    last_check: Option<Instant>,
    height: u64,
}

pub struct BridgeClient {
    keys: Arc<dyn KeyProvider>,
    cfg: BridgeConfig,
    transport: Arc<dyn HttpTransport>,
    signer_name: String,
    pub_key: String,
    voter_address: String,

    height_cache: RwLock<HeightCache>,
    // Guards the account state for the whole read-sign-submit of a broadcast
    broadcast_lock: Mutex<AccountState>,
}

impl BridgeClient {
    /// Create a client backed by a retrying `reqwest` transport. No network
    /// calls are made here.
    pub fn new(
        keys: Arc<dyn KeyProvider>,
        cfg: &BridgeConfig,
        http: &HttpConfig,
        signer: &str,
        pub_key: &str,
        voter: &str,
    ) -> Result<Self, BridgeError> {
        let transport = RetryingHttpClient::new(http).map_err(BridgeError::HttpClient)?;
        Ok(Self::with_transport(keys, cfg, Arc::new(transport), signer, pub_key, voter))
    }

    pub fn with_transport(
        keys: Arc<dyn KeyProvider>,
        cfg: &BridgeConfig,
        transport: Arc<dyn HttpTransport>,
        signer: &str,
        pub_key: &str,
        voter: &str,
    ) -> Self {
        Self {
            keys,
            cfg: cfg.clone(),
            transport,
            signer_name: signer.to_string(),
            pub_key: pub_key.to_string(),
            voter_address: voter.to_string(),
            height_cache: RwLock::new(HeightCache::default()),
            broadcast_lock: Mutex::new(AccountState::default()),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.cfg
    }

    /// (public key, voter address)
    pub fn voter_info(&self) -> (&str, &str) {
        (&self.pub_key, &self.voter_address)
    }

    pub fn moniker_name(&self) -> &str {
        &self.signer_name
    }

    /// Values a transaction builder needs to sign and broadcast as this signer.
    ///
    /// # Panics
    ///
    /// If the configured RPC endpoint is not a valid URI. That is a startup
    /// configuration fault; use [`BridgeClient::try_context`] to handle it.
    pub fn context(&self) -> BroadcastContext {
        self.try_context()
            .unwrap_or_else(|e| panic!("invalid bridge rpc configuration: {}", e))
    }

    pub fn try_context(&self) -> Result<BroadcastContext, BridgeError> {
        Ok(BroadcastContext {
            keyring: self.keys.keyring().clone(),
            chain_id: self.cfg.chain_id.clone(),
            home_dir: self.cfg.chain_home_folder.clone(),
            from_name: self.signer_name.clone(),
            from_address: self.keys.signer_address().to_string(),
            broadcast_mode: BroadcastMode::Sync,
            node_uri: node_uri(&self.cfg.chain_rpc)?,
        })
    }

    /// `scheme://host/path` against the configured REST host, `http` unless
    /// the host already names a scheme
    fn chain_url(&self, path: &str) -> Result<String, BridgeError> {
        let base = if self.cfg.chain_host.contains("://") {
            self.cfg.chain_host.clone()
        } else {
            format!("http://{}", self.cfg.chain_host)
        };
        let mut url = Url::parse(&base).map_err(|source| BridgeError::InvalidUrl { url: base.clone(), source })?;
        url.set_path(path);
        Ok(url.to_string())
    }

    async fn get_with_path(&self, what: &'static str, path: &str) -> Result<Vec<u8>, BridgeError> {
        let url = self.chain_url(path)?;
        self.get(what, &url).await
    }

    /// Single GET; anything but 200 is an error carrying the status line and body
    async fn get(&self, what: &'static str, url: &str) -> Result<Vec<u8>, BridgeError> {
        let response = self.transport.get(url).await.map_err(|source| {
            log::warn!("Failed to GET {} from remote chain: {}", what, source);
            BridgeError::Transport { what, source }
        })?;

        if response.status != reqwest::StatusCode::OK {
            return Err(BridgeError::Status {
                what,
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(response.body)
    }

    /// Account number and sequence of the signer, straight from the chain.
    /// Nothing is cached here; see [`BridgeClient::lock_sequence`].
    pub async fn account_number_and_sequence(&self) -> Result<(u64, u64), BridgeError> {
        let path = format!("{}/{}", ACCOUNTS_PATH, self.keys.signer_address());
        let body = self.get_with_path("auth accounts", &path).await?;

        let resp: AccountResp = decode("account resp", &body)?;
        let account = Account::decode_json(&resp.account)
            .map_err(|source| BridgeError::Decode { what: "account", source })?;

        let info = account
            .get_account_info()
            .ok_or_else(|| BridgeError::UnsupportedAccount(account.account_type().to_string()))?;
        log::debug!(
            "{} {}: account_number {}, sequence {}",
            account.account_type(),
            info.address,
            info.account_number,
            info.sequence
        );
        Ok((info.account_number, info.sequence))
    }

    /// Current height of the remote chain, reusing the last observation for
    /// up to [`BLOCK_TIME`]. A failed refresh is an error even when an older
    /// height is cached.
    pub async fn block_height(&self) -> Result<u64, BridgeError> {
        {
            let cache = self.height_cache.read().await;
            if let Some(checked) = cache.last_check {
                if checked.elapsed() < BLOCK_TIME && cache.height > 0 {
                    return Ok(cache.height);
                }
            }
        }

        let latest = self.last_block("").await?;
        let height = latest.height()?;

        let mut cache = self.height_cache.write().await;
        cache.last_check = Some(Instant::now());
        cache.height = height;
        Ok(height)
    }

    /// Latest block header, optionally of a sub-chain behind the same gateway
    pub async fn last_block(&self, chain: &str) -> Result<LastBlockInfo, BridgeError> {
        let path = if chain.is_empty() {
            LATEST_BLOCK_PATH.to_string()
        } else {
            format!("{}/{}", LATEST_BLOCK_PATH, chain)
        };
        let body = self.get_with_path("lastblock", &path).await?;
        decode("last block", &body)
    }

    /// Bridge transaction data, optionally scoped to one chain
    pub async fn tx_data_list(&self, chain: &str) -> Result<TransactionDataList, BridgeError> {
        let path = if chain.is_empty() {
            self.cfg.tx_data_path.clone()
        } else {
            format!("{}/{}", self.cfg.tx_data_path, chain)
        };
        let body = self.get_with_path("transaction data", &path).await?;
        decode("transaction data list", &body)
    }

    /// Take the broadcast guard and the signer's next sequence number.
    ///
    /// Hold the returned lease from reading the sequence until the signed
    /// transaction has been submitted. The first lease loads the account from
    /// the chain; later ones continue from the locally confirmed sequence.
    pub async fn lock_sequence(&self) -> Result<SequenceLease<'_>, BridgeError> {
        let mut state = self.broadcast_lock.lock().await;
        if !state.loaded {
            let (account_number, sequence) = self.account_number_and_sequence().await?;
            log::info!("Loaded account {} at sequence {}", account_number, sequence);
            state.account_number = account_number;
            state.sequence = sequence;
            state.loaded = true;
        }
        Ok(SequenceLease::new(self, state))
    }
}

fn decode<T: DeserializeOwned>(what: &'static str, body: &[u8]) -> Result<T, BridgeError> {
    serde_json::from_slice(body).map_err(|source| BridgeError::Decode { what, source })
}
