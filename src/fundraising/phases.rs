use super::types::{Phase, PhaseState, PhaseStatus};

/// Apportion a single raised total across phases in declared order —
/// sequential bin-filling. Fully covered phases are completed; the first
/// uncovered phase absorbs the remainder and becomes active (even at zero
/// funds); everything after it is pending. Pure function, recomputed from
/// scratch on every input change.
pub fn compute_phase_states(phases: &[Phase], total_raised: f64) -> Vec<PhaseState> {
    let mut remaining = total_raised.max(0.0);
    let mut active_seen = false;

    phases
        .iter()
        .map(|phase| {
            if active_seen {
                return PhaseState {
                    status: PhaseStatus::Pending,
                    raised: 0.0,
                    progress: 0.0,
                };
            }
            if remaining >= phase.target_amount {
                remaining -= phase.target_amount;
                return PhaseState {
                    status: PhaseStatus::Completed,
                    raised: phase.target_amount,
                    progress: 100.0,
                };
            }
            active_seen = true;
            let raised = remaining;
            remaining = 0.0;
            let progress = if phase.target_amount > 0.0 {
                (raised * 100.0 / phase.target_amount).min(100.0)
            } else {
                100.0
            };
            PhaseState {
                status: PhaseStatus::Active,
                raised,
                progress,
            }
        })
        .collect()
}
