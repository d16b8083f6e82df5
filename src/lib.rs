//! Client-side core for the closer governance platform: the proposal
//! lifecycle controller (draft -> ready -> active -> closed with
//! wallet-signed promotion and voting) and the fundraising milestone
//! calculator, layered over the remote REST API. Persistence, vote
//! tallying, and signature verification all live server-side.

pub mod api;
pub mod config;
pub mod errors;
pub mod fundraising;
pub mod proposal;
pub mod wallet;

pub use api::ApiClient;
pub use config::ApiConfig;
pub use errors::AppError;
