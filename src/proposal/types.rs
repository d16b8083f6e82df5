use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a governance proposal. One-directional: there is no
/// path back to `Draft` once a proposal has left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Draft,
    Ready,
    Active,
    Closed,
}

impl ProposalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Ready => "ready",
            ProposalStatus::Active => "active",
            ProposalStatus::Closed => "closed",
        }
    }

    /// Central transition table. `Active -> Closed` exists here for
    /// completeness but is only ever fired server-side when the voting
    /// window elapses.
    pub fn can_transition_to(self, to: ProposalStatus) -> bool {
        matches!(
            (self, to),
            (ProposalStatus::Draft, ProposalStatus::Ready)
                | (ProposalStatus::Ready, ProposalStatus::Active)
                | (ProposalStatus::Active, ProposalStatus::Closed)
        )
    }

    /// Edits are only permitted while still in draft.
    pub fn can_edit(self) -> bool {
        self == ProposalStatus::Draft
    }
}

/// Server-aggregated vote counts. The client never increments these locally;
/// it submits a vote record and re-fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
}

impl VoteTally {
    pub fn total(&self) -> u64 {
        self.yes + self.no + self.abstain
    }

    pub fn count(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::Yes => self.yes,
            VoteChoice::No => self.no,
            VoteChoice::Abstain => self.abstain,
        }
    }
}

/// Whole-number percentage of `count` against `total`; 0 when `total` is 0.
pub fn vote_percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u64
}

/// A governance proposal as stored by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Markdown body. This is what gets hashed and signed on move-to-ready
    /// and promotion.
    pub description: String,
    pub status: ProposalStatus,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(default)]
    pub author_address: Option<String>,
    #[serde(default)]
    pub signature_hash: Option<String>,
    #[serde(default)]
    pub author_signature: Option<String>,
    #[serde(default)]
    pub votes: VoteTally,
}

impl Proposal {
    /// Voting is open while the proposal is active and its end date has not
    /// passed.
    pub fn is_voting_open(&self, now: DateTime<Utc>) -> bool {
        self.status == ProposalStatus::Active
            && self.end_date.map(|end| now < end).unwrap_or(false)
    }

    /// Human countdown to the voting deadline, whole days and hours,
    /// floor-truncated. Empty once the deadline has passed or none is set.
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        let Some(end) = self.end_date else {
            return String::new();
        };
        let remaining = end - now;
        if remaining <= Duration::zero() {
            return String::new();
        }
        let days = remaining.num_days();
        let hours = remaining.num_hours() - days * 24;
        format!("{days}d {hours}h")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl VoteChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteChoice::Yes => "yes",
            VoteChoice::No => "no",
            VoteChoice::Abstain => "abstain",
        }
    }
}

/// A single vote submission. Created once per user interaction, submitted,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub proposal_id: String,
    pub user_id: String,
    pub vote: VoteChoice,
    pub voting_power: f64,
    pub timestamp: DateTime<Utc>,
    pub signature_hash: String,
}

/// Allowed voting window lengths for promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotingDuration {
    OneWeek,
    TwoWeeks,
    FourWeeks,
}

impl VotingDuration {
    pub fn days(self) -> i64 {
        match self {
            VotingDuration::OneWeek => 7,
            VotingDuration::TwoWeeks => 14,
            VotingDuration::FourWeeks => 28,
        }
    }

    pub fn end_from(self, start: DateTime<Utc>) -> DateTime<Utc> {
        start + Duration::days(self.days())
    }
}

/// Creator profile as returned by `GET /user/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub screenname: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// The authenticated user on whose behalf the controller acts.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user_id: String,
    pub roles: Vec<String>,
    pub voting_power: f64,
}

impl Viewer {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Only citizens may vote.
    pub fn is_citizen(&self) -> bool {
        self.has_role("citizen")
    }
}
