use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated fundraising window. Only bounds the date-range query against the
/// external charge ledger; open-ended milestones omit one or both dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Off-ledger contribution (loan or manual adjustment) counted toward a
/// specific milestone, or toward the overall total when untargeted
/// computations run with no active milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffLedgerEntry {
    pub amount: f64,
    #[serde(default)]
    pub counts_toward_milestone: Option<String>,
}

/// Static allocation bucket with a fixed target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub target_amount: f64,
    pub display_amount: String,
}

/// Fundraising configuration: milestones, off-ledger entries, and the fixed
/// phase list evaluated against the raised total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingConfig {
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub loans: Vec<OffLedgerEntry>,
    #[serde(default)]
    pub manual_adjustments: Vec<OffLedgerEntry>,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    Completed,
    Active,
    Pending,
}

/// Derived per-phase state, recomputed from scratch whenever the raised
/// total changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    pub status: PhaseStatus,
    pub raised: f64,
    /// 0–100.
    pub progress: f64,
}
