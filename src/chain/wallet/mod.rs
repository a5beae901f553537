mod keys;

pub use keys::{KeyProvider, Keyring, LocalKeys, StaticKeys};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_providers_are_interchangeable() {
        let keyring = Keyring::new("test", PathBuf::from("/tmp/bridge"), "bridge");
        let local = LocalKeys::from_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            "",
            "human",
            keyring.clone(),
        )
        .unwrap();
        let watch_only = StaticKeys::new(local.signer_address(), keyring.clone());

        let providers: Vec<Arc<dyn KeyProvider>> = vec![Arc::new(watch_only), Arc::new(local)];
        assert_eq!(providers[0].signer_address(), providers[1].signer_address());
        assert_eq!(providers[1].keyring(), &keyring);
    }
}
