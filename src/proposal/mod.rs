//! Governance proposal lifecycle: draft -> ready -> active -> closed, with
//! wallet-signed promotion and voting.

pub mod controller;
pub mod hashing;
pub mod slug;
pub mod types;
pub mod validate;

pub use controller::{EditBuffer, ProposalController};
pub use types::{
    Proposal, ProposalStatus, UserProfile, Viewer, Vote, VoteChoice, VoteTally, VotingDuration,
    vote_percentage,
};
