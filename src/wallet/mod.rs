//! Capability-scoped wallet access. Components that need a signature receive
//! a `Signer` rather than reaching for an ambient wallet singleton, so tests
//! and embedders control exactly what signing capability is available.

mod local;

pub use local::LocalWallet;

use crate::errors::AppError;

/// A signing capability. `is_ready` and `account` let callers short-circuit
/// before any network effect when no wallet is connected.
pub trait Signer: Send + Sync {
    /// Whether the wallet is connected and able to sign.
    fn is_ready(&self) -> bool;

    /// The wallet's account address, if connected.
    fn account(&self) -> Option<String>;

    /// Sign an arbitrary message, returning a hex-encoded signature.
    fn sign_message(&self, message: &str) -> Result<String, AppError>;
}

/// A permanently disconnected wallet. Every mutating proposal action aborts
/// before reaching the network when handed this.
#[derive(Debug, Default)]
pub struct NoWallet;

impl Signer for NoWallet {
    fn is_ready(&self) -> bool {
        false
    }

    fn account(&self) -> Option<String> {
        None
    }

    fn sign_message(&self, _message: &str) -> Result<String, AppError> {
        Err(AppError::Wallet("No wallet connected".to_string()))
    }
}
