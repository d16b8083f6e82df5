use std::cmp::Reverse;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use super::types::Milestone;

fn day_start(dt: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&dt.date_naive().and_time(NaiveTime::MIN))
}

fn day_end(dt: DateTime<Utc>) -> DateTime<Utc> {
    day_start(dt) + Duration::seconds(86_399)
}

/// Milestone windows are day-granular: `[start 00:00:00, end 23:59:59]`, or
/// open-ended when no end date is set.
fn window_contains(milestone: &Milestone, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    if now < day_start(start) {
        return false;
    }
    match milestone.end_date {
        Some(end) => now <= day_end(end),
        None => true,
    }
}

/// Select the single most relevant milestone for "now":
/// the most-recently-started milestone whose window is currently open, else
/// the soonest upcoming one, else the latest-starting one overall. Never
/// `None` for a non-empty list.
pub fn find_active_milestone(milestones: &[Milestone], now: DateTime<Utc>) -> Option<&Milestone> {
    if milestones.is_empty() {
        return None;
    }

    // Latest-starting first; undated entries sort as epoch start, i.e. last.
    let mut sorted: Vec<&Milestone> = milestones.iter().collect();
    sorted.sort_by_key(|m| Reverse(m.start_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)));

    // Currently open window, first match wins.
    for &milestone in &sorted {
        if let Some(start) = milestone.start_date {
            if window_contains(milestone, start, now) {
                return Some(milestone);
            }
        }
    }

    // Soonest upcoming.
    sorted
        .iter()
        .filter(|m| m.start_date.map(|s| day_start(s) > now).unwrap_or(false))
        .min_by_key(|m| m.start_date)
        .copied()
        // Fallback: latest-starting overall, even if its window has closed.
        .or_else(|| sorted.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn milestone(id: &str, start: Option<&str>, end: Option<&str>) -> Milestone {
        let parse = |s: &str| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
                .and_utc()
        };
        Milestone {
            id: id.to_string(),
            start_date: start.map(parse),
            end_date: end.map(parse),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_list_yields_none() {
        assert!(find_active_milestone(&[], now()).is_none());
    }

    #[test]
    fn non_empty_list_never_yields_none() {
        // Every window closed long ago.
        let list = vec![
            milestone("old-a", Some("2020-01-01"), Some("2020-02-01")),
            milestone("old-b", Some("2021-01-01"), Some("2021-02-01")),
        ];
        let found = find_active_milestone(&list, now()).unwrap();
        // Latest-starting overall wins as the fallback.
        assert_eq!(found.id, "old-b");
    }

    #[test]
    fn open_window_beats_closed_window() {
        // First started 10 days ago and closed yesterday; second started 5
        // days ago and is still open.
        let list = vec![
            milestone("closed", Some("2026-06-05"), Some("2026-06-14")),
            milestone("open", Some("2026-06-10"), Some("2026-06-20")),
        ];
        let found = find_active_milestone(&list, now()).unwrap();
        assert_eq!(found.id, "open");
    }

    #[test]
    fn latest_started_open_window_wins() {
        let list = vec![
            milestone("earlier", Some("2026-06-01"), None),
            milestone("later", Some("2026-06-10"), None),
        ];
        let found = find_active_milestone(&list, now()).unwrap();
        assert_eq!(found.id, "later");
    }

    #[test]
    fn only_future_milestones_selects_soonest() {
        let list = vec![
            milestone("far", Some("2026-09-01"), Some("2026-10-01")),
            milestone("soon", Some("2026-07-01"), Some("2026-08-01")),
        ];
        let found = find_active_milestone(&list, now()).unwrap();
        assert_eq!(found.id, "soon");
    }

    #[test]
    fn window_is_day_granular() {
        // Ends "today" at 23:59:59, so noon today is still inside.
        let list = vec![milestone("today", Some("2026-06-01"), Some("2026-06-15"))];
        let found = find_active_milestone(&list, now()).unwrap();
        assert_eq!(found.id, "today");

        // Starts "today" at 00:00:00, so noon today is already inside.
        let list = vec![milestone("starts-today", Some("2026-06-15"), None)];
        let found = find_active_milestone(&list, now()).unwrap();
        assert_eq!(found.id, "starts-today");
    }

    #[test]
    fn undated_milestones_sort_last() {
        let list = vec![
            milestone("undated", None, None),
            milestone("dated", Some("2026-06-01"), None),
        ];
        let found = find_active_milestone(&list, now()).unwrap();
        assert_eq!(found.id, "dated");
    }
}
