use std::path::PathBuf;
use url::Url;

use crate::chain::error::BridgeError;
use crate::chain::wallet::Keyring;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastMode {
    Sync,
    Async,
    Block,
}

impl BroadcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastMode::Sync => "sync",
            BroadcastMode::Async => "async",
            BroadcastMode::Block => "block",
        }
    }
}

/// Everything a transaction builder needs to sign and broadcast as the bridge signer
#[derive(Debug, Clone)]
pub struct BroadcastContext {
    pub keyring: Keyring,
    pub chain_id: String,
    pub home_dir: PathBuf,
    pub from_name: String,
    pub from_address: String,
    pub broadcast_mode: BroadcastMode,
    pub node_uri: Url,
}

/// Tendermint RPC address; a bare `host:port` is taken as `tcp://host:port`
pub fn node_uri(rpc: &str) -> Result<Url, BridgeError> {
    let remote = if rpc.contains("://") {
        rpc.to_string()
    } else {
        format!("tcp://{}", rpc)
    };
    Url::parse(&remote).map_err(|source| BridgeError::InvalidUrl { url: remote, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_uri() {
        assert_eq!(node_uri("localhost:26657").unwrap().as_str(), "tcp://localhost:26657");
        assert_eq!(node_uri("http://10.0.0.5:26657").unwrap().as_str(), "http://10.0.0.5:26657/");
        assert!(node_uri("[::1:26657").is_err());
    }

    #[test]
    fn test_broadcast_mode() {
        assert_eq!(BroadcastMode::Sync.as_str(), "sync");
    }
}
