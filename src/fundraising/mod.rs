//! Fundraising milestone selection and phase waterfall: pick the single most
//! relevant milestone for "now", sum raised funds over its window, and
//! apportion the total across fixed phases.

pub mod milestone;
pub mod phases;
pub mod raised;
pub mod types;

pub use milestone::find_active_milestone;
pub use phases::compute_phase_states;
pub use raised::{RaisedBreakdown, total_raised};
pub use types::{FundraisingConfig, Milestone, OffLedgerEntry, Phase, PhaseState, PhaseStatus};
