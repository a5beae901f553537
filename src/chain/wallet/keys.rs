use anyhow::{anyhow, Result};
use bech32::Hrp;
use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;
use ripemd::Ripemd160;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

const COSMOS_HD_PATH: &str = "m/44'/118'/0'/0/0";

/// Handle to the on-disk keyring a transaction builder signs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyring {
    pub backend: String,
    pub home: PathBuf,
    pub key_name: String,
}

impl Keyring {
    pub fn new(backend: &str, home: PathBuf, key_name: &str) -> Self {
        Self {
            backend: backend.to_string(),
            home,
            key_name: key_name.to_string(),
        }
    }
}

/// Signing-key capability the bridge client depends on
pub trait KeyProvider: Send + Sync {
    /// Bech32 address of the current signer on the remote chain
    fn signer_address(&self) -> &str;

    fn keyring(&self) -> &Keyring;
}

/// Watch-only keys: a known address with no key material
#[derive(Debug, Clone)]
pub struct StaticKeys {
    address: String,
    keyring: Keyring,
}

impl StaticKeys {
    pub fn new(address: &str, keyring: Keyring) -> Self {
        Self {
            address: address.to_string(),
            keyring,
        }
    }
}

impl KeyProvider for StaticKeys {
    fn signer_address(&self) -> &str {
        &self.address
    }

    fn keyring(&self) -> &Keyring {
        &self.keyring
    }
}

/// Secp256k1 key derived from a BIP39 mnemonic along the Cosmos HD path.
/// Key bytes are wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct LocalKeys {
    #[zeroize(skip)]
    address: String,
    #[zeroize(skip)]
    keyring: Keyring,

    private_key_bytes: [u8; 32],
    public_key_bytes: [u8; 33],
}

impl LocalKeys {
    pub fn from_mnemonic(
        mnemonic_str: &str,
        passphrase: &str,
        address_prefix: &str,
        keyring: Keyring,
    ) -> Result<Self> {
        let mnemonic = Mnemonic::parse(mnemonic_str)?;
        let seed = mnemonic.to_seed(passphrase);

        let path: DerivationPath = COSMOS_HD_PATH.parse()?;
        let xprv = XPrv::derive_from_path(seed, &path)
            .map_err(|e| anyhow!("Failed to derive key: {}", e))?;
        let mut private_key = xprv.to_bytes();

        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&private_key)?;
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        let address = cosmos_address(&public_key, address_prefix)?;

        let private_key_bytes = private_key;
        private_key.zeroize();

        Ok(Self {
            address,
            keyring,
            private_key_bytes,
            public_key_bytes: public_key.serialize(),
        })
    }

    pub fn private_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(&self.private_key_bytes)
            .map_err(|e| anyhow!("Invalid private key: {}", e))
    }

    /// Compressed public key (33 bytes)
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public_key_bytes
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes)
    }
}

impl std::fmt::Debug for LocalKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalKeys")
            .field("address", &self.address)
            .field("keyring", &self.keyring)
            .finish_non_exhaustive()
    }
}

impl KeyProvider for LocalKeys {
    fn signer_address(&self) -> &str {
        &self.address
    }

    fn keyring(&self) -> &Keyring {
        &self.keyring
    }
}

/// bech32(prefix, ripemd160(sha256(compressed pubkey)))
fn cosmos_address(public_key: &PublicKey, prefix: &str) -> Result<String> {
    let sha = Sha256::digest(public_key.serialize());
    let hash = Ripemd160::digest(sha);

    let hrp = Hrp::parse(prefix)?;
    let encoded = bech32::encode::<bech32::Bech32>(hrp, &hash)?;
    Ok(encoded)
}
