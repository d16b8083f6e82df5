use chrono::{DateTime, TimeZone, Utc};

use crate::api::{ApiClient, ChargeQuery, DateWindow};

use super::types::{FundraisingConfig, Milestone, OffLedgerEntry};

pub const CHARGE_TYPE_CRYPTO: &str = "tokenSale";
pub const CHARGE_TYPE_FIAT: &str = "tokenSaleFiat";
const CHARGE_STATUS_PAID: &str = "paid";

/// Upper query bound when the active milestone has no end date.
fn far_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Raised funds split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaisedBreakdown {
    pub crypto: f64,
    pub fiat: f64,
    pub loans: f64,
    pub adjustments: f64,
}

impl RaisedBreakdown {
    pub fn total(&self) -> f64 {
        self.crypto + self.fiat + self.loans + self.adjustments
    }
}

fn sum_off_ledger(entries: &[OffLedgerEntry], active_id: Option<&str>) -> f64 {
    entries
        .iter()
        .filter(|entry| match active_id {
            Some(id) => entry.counts_toward_milestone.as_deref() == Some(id),
            // No active milestone: count everything.
            None => true,
        })
        .map(|entry| entry.amount)
        .sum()
}

/// Sum all raised-fund sources for the given milestone window: two
/// concurrent ledger aggregates (on-chain and fiat token-sale charges,
/// paid only) plus configured loans and manual adjustments. Either ledger
/// query failing contributes zero and is logged — partial failure is never
/// surfaced as a hard error.
pub async fn total_raised(
    api: &ApiClient,
    config: &FundraisingConfig,
    active: Option<&Milestone>,
) -> RaisedBreakdown {
    let window = DateWindow {
        gte: active.and_then(|m| m.start_date),
        lte: active.and_then(|m| m.end_date).unwrap_or_else(far_future),
    };
    let crypto_query = ChargeQuery {
        charge_type: CHARGE_TYPE_CRYPTO,
        status: CHARGE_STATUS_PAID,
        date: window.clone(),
    };
    let fiat_query = ChargeQuery {
        charge_type: CHARGE_TYPE_FIAT,
        status: CHARGE_STATUS_PAID,
        date: window,
    };

    let (crypto, fiat) = tokio::join!(
        api.sum_charge_amount(&crypto_query),
        api.sum_charge_amount(&fiat_query),
    );
    let crypto = crypto.unwrap_or_else(|e| {
        log::warn!("On-chain charge sum failed, counting 0: {e}");
        0.0
    });
    let fiat = fiat.unwrap_or_else(|e| {
        log::warn!("Fiat charge sum failed, counting 0: {e}");
        0.0
    });

    let active_id = active.map(|m| m.id.as_str());
    RaisedBreakdown {
        crypto,
        fiat,
        loans: sum_off_ledger(&config.loans, active_id),
        adjustments: sum_off_ledger(&config.manual_adjustments, active_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: f64, milestone: Option<&str>) -> OffLedgerEntry {
        OffLedgerEntry {
            amount,
            counts_toward_milestone: milestone.map(String::from),
        }
    }

    #[test]
    fn off_ledger_entries_filter_by_milestone() {
        let entries = vec![
            entry(100.0, Some("m1")),
            entry(50.0, Some("m2")),
            entry(25.0, None),
        ];
        assert_eq!(sum_off_ledger(&entries, Some("m1")), 100.0);
        assert_eq!(sum_off_ledger(&entries, Some("m2")), 50.0);
        // No active milestone: everything counts.
        assert_eq!(sum_off_ledger(&entries, None), 175.0);
    }

    #[test]
    fn breakdown_totals_all_sources() {
        let breakdown = RaisedBreakdown {
            crypto: 1.0,
            fiat: 2.0,
            loans: 3.0,
            adjustments: 4.0,
        };
        assert_eq!(breakdown.total(), 10.0);
    }
}
