use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chain_bridge::chain::{BridgeClient, KeyProvider, Keyring, LocalKeys, StaticKeys};
use chain_bridge::config::Config;

const MNEMONIC_ENV: &str = "BRIDGE_MNEMONIC";

#[derive(Parser)]
#[command(name = "chain-bridge")]
#[command(about = "Bridge client for observing a remote Cosmos chain", version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "bridge.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "bridge.toml")]
        output: String,
    },

    /// Print the remote chain's current height
    Height {
        /// Sub-chain behind the same gateway
        #[arg(long)]
        chain: Option<String>,
    },

    /// Print the signer's account number and sequence
    Account {
        /// Query this address instead of the configured signer
        #[arg(long)]
        address: Option<String>,
    },

    /// List bridge transaction data
    TxData {
        #[arg(long, default_value = "")]
        chain: String,
    },

    /// Derive the signer address from BRIDGE_MNEMONIC
    Address,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chain_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            let config = Config::default();
            config.save(&output)?;
            info!("Configuration file created at: {}", output);
        }
        Commands::Height { chain } => {
            let client = build_client(&cli.config, None, false)?;
            match chain {
                Some(chain) => {
                    let block = client.last_block(&chain).await?;
                    println!("{}", serde_json::to_string_pretty(&block)?);
                }
                None => println!("{}", client.block_height().await?),
            }
        }
        Commands::Account { address } => {
            let client = build_client(&cli.config, address, true)?;
            let (account_number, sequence) = client.account_number_and_sequence().await?;
            println!(
                "{}",
                serde_json::json!({
                    "address": client.try_context()?.from_address,
                    "account_number": account_number,
                    "sequence": sequence,
                })
            );
        }
        Commands::TxData { chain } => {
            let client = build_client(&cli.config, None, false)?;
            let list = client.tx_data_list(&chain).await?;
            info!("Fetched {} transaction data entries", list.transaction_data.len());
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        Commands::Address => {
            let config = load_config(&cli.config)?;
            let keys = local_keys(&config)?
                .with_context(|| format!("{} is not set", MNEMONIC_ENV))?;
            println!("{}", keys.signer_address());
            println!("{}", keys.public_key_hex());
        }
    }

    Ok(())
}

fn load_config(path: &str) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load config from {}", path))
}

fn keyring(config: &Config) -> Keyring {
    Keyring::new(
        &config.signer.keyring_backend,
        config.bridge.chain_home_folder.clone(),
        &config.signer.name,
    )
}

fn local_keys(config: &Config) -> Result<Option<LocalKeys>> {
    let Ok(mnemonic) = std::env::var(MNEMONIC_ENV) else {
        return Ok(None);
    };
    let keys = LocalKeys::from_mnemonic(
        mnemonic.trim(),
        "",
        &config.signer.address_prefix,
        keyring(config),
    )?;
    Ok(Some(keys))
}

/// Height and tx data queries work without a signer; account queries need one
fn build_client(path: &str, address: Option<String>, needs_signer: bool) -> Result<BridgeClient> {
    let config = load_config(path)?;

    let keys: Arc<dyn KeyProvider> = match (address, local_keys(&config)?) {
        (Some(address), _) => Arc::new(StaticKeys::new(&address, keyring(&config))),
        (None, Some(local)) => Arc::new(local),
        (None, None) if !config.signer.voter_address.is_empty() => {
            Arc::new(StaticKeys::new(&config.signer.voter_address, keyring(&config)))
        }
        (None, None) if !needs_signer => Arc::new(StaticKeys::new("", keyring(&config))),
        (None, None) => bail!(
            "No signer address: set {} or signer.voter_address in {}",
            MNEMONIC_ENV,
            path
        ),
    };
    info!("Using signer {} against {}", keys.signer_address(), config.bridge.chain_host);

    let client = BridgeClient::new(
        keys,
        &config.bridge,
        &config.http,
        &config.signer.name,
        &config.signer.pub_key,
        &config.signer.voter_address,
    )?;
    Ok(client)
}
