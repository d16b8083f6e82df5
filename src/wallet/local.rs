use ed25519_dalek::{Signer as _, SigningKey};
use rand::rngs::OsRng;

use crate::errors::AppError;

/// In-process ed25519 wallet. Used by embedders holding a local key and by
/// the test suite; browser/hardware wallets implement [`super::Signer`]
/// against their own transport.
pub struct LocalWallet {
    key: SigningKey,
    address: String,
}

impl LocalWallet {
    pub fn new(key: SigningKey) -> Self {
        let address = format!("0x{}", hex::encode(key.verifying_key().as_bytes()));
        LocalWallet { key, address }
    }

    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Self {
        LocalWallet::new(SigningKey::from_bytes(bytes))
    }

    /// Generate a wallet with a fresh random key.
    pub fn generate() -> Self {
        LocalWallet::new(SigningKey::generate(&mut OsRng))
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl super::Signer for LocalWallet {
    fn is_ready(&self) -> bool {
        true
    }

    fn account(&self) -> Option<String> {
        Some(self.address.clone())
    }

    fn sign_message(&self, message: &str) -> Result<String, AppError> {
        let signature = self.key.sign(message.as_bytes());
        Ok(format!("0x{}", hex::encode(signature.to_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Signer;

    #[test]
    fn deterministic_key_gives_deterministic_signature() {
        let wallet = LocalWallet::from_secret_bytes(&[7u8; 32]);
        let a = wallet.sign_message("hello").unwrap();
        let b = wallet.sign_message("hello").unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("0x"));
        // 64-byte ed25519 signature, hex-encoded
        assert_eq!(a.len(), 2 + 128);
    }

    #[test]
    fn address_is_hex_verifying_key() {
        let wallet = LocalWallet::from_secret_bytes(&[7u8; 32]);
        assert!(wallet.address().starts_with("0x"));
        assert_eq!(wallet.account().as_deref(), Some(wallet.address()));
        assert!(wallet.is_ready());
    }
}
