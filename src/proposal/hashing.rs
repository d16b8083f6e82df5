use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use super::types::VoteChoice;

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash of a proposal description. The author signs this hash string when
/// moving a proposal to ready and again on promotion.
pub fn description_hash(description: &str) -> String {
    sha256_hex(description)
}

/// Hash identifying a single vote submission.
pub fn vote_hash(
    proposal_id: &str,
    user_id: &str,
    choice: VoteChoice,
    timestamp: DateTime<Utc>,
) -> String {
    let input = format!(
        "{proposal_id}:{user_id}:{}:{}",
        choice.as_str(),
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    sha256_hex(&input)
}

/// Human-readable message the wallet signs for a vote. Note this is NOT the
/// vote hash: votes sign a readable message while proposal promotion signs
/// the raw description hash. The server verifies both flows as-is, so the
/// asymmetry must be preserved.
pub fn vote_message(proposal_title: &str, choice: VoteChoice) -> String {
    format!(
        "I vote '{}' on proposal '{proposal_title}'",
        choice.as_str()
    )
}
