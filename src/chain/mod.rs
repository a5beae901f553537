pub mod account_types;
pub mod bridge_client;
pub mod context;
pub mod error;
pub mod sequence;
pub mod transport;
pub mod types;
pub mod wallet;

pub use account_types::{Account, AccountInfo};
pub use bridge_client::{BridgeClient, BLOCK_TIME};
pub use context::{BroadcastContext, BroadcastMode};
pub use error::{BridgeError, TransportError};
pub use sequence::{parse_sequence_error, SequenceLease};
pub use transport::{HttpResponse, HttpTransport, RetryPolicy, RetryingHttpClient};
pub use types::{LastBlockInfo, TransactionData, TransactionDataList};
pub use wallet::{KeyProvider, Keyring, LocalKeys, StaticKeys};
