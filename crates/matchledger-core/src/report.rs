//! Read-only projections over registry state: per-person totals and the
//! weekly histogram.

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::warn;

use crate::registry::Registry;

const DAY_MS: i64 = 24 * 3600 * 1000;
/// Fixed seven-day week; no calendar or DST adjustment.
const WEEK_MS: i64 = 7 * DAY_MS;

/// One row of the per-person totals report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TotalRow {
    /// First name as loaded from the tracker.
    pub first_name: String,
    /// Preferred first name.
    pub preferred_name: String,
    /// Last name.
    pub last_name: String,
    /// Messages assigned to this person.
    pub count: usize,
}

/// Per-person message totals, sorted ascending by last name,
/// case-insensitive. Roster insertion order breaks ties (the sort is
/// stable). The catch-all bucket is not part of this report.
#[must_use]
pub fn total_counts(registry: &Registry) -> Vec<TotalRow> {
    let mut rows: Vec<TotalRow> = registry
        .iter_assigned()
        .map(|(_, person, messages)| TotalRow {
            first_name: person.first_name.clone(),
            preferred_name: person.preferred_name.clone(),
            last_name: person.last_name.clone(),
            count: messages.len(),
        })
        .collect();
    rows.sort_by_key(|row| row.last_name.to_lowercase());
    rows
}

/// Aligns a start date forward to Monday and converts to epoch
/// milliseconds UTC. A date that already is a Monday is unchanged;
/// anything else shifts to the next Monday, so the partial first week is
/// absorbed into bucket 0 rather than given its own bucket.
fn aligned_start_ms(start: NaiveDate) -> i64 {
    let days_past_monday = i64::from(start.weekday().num_days_from_monday());
    let mut ms = start.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    if days_past_monday != 0 {
        ms += (7 - days_past_monday) * DAY_MS;
    }
    ms
}

/// Weekly message histogram: `num_weeks` buckets of fixed seven-day
/// width starting at the Monday of `start`'s week.
///
/// Messages before the window fold into bucket 0; messages past the
/// window are dropped with a diagnostic. Includes the catch-all bucket
/// when the registry carries one. Bucketing depends only on the message
/// timestamps, the start date, and the bucket count, never on iteration
/// order.
#[must_use]
pub fn weekly_counts(registry: &Registry, start: NaiveDate, num_weeks: usize) -> Vec<u64> {
    let start_ms = aligned_start_ms(start);
    let mut counts = vec![0_u64; num_weeks];
    for record in registry.all_messages() {
        let offset = record.received_at_ms - start_ms;
        let week = if offset < 0 {
            0
        } else {
            usize::try_from(offset / WEEK_MS).unwrap_or(usize::MAX)
        };
        if week >= num_weeks {
            warn!(
                week,
                received_at_ms = record.received_at_ms,
                "message outside the reporting window, dropping"
            );
            continue;
        }
        counts[week] += 1;
    }
    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::message::MessageRecord;
    use crate::roster::Person;

    fn ms(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
    }

    fn message(address: &str, received_at_ms: i64) -> MessageRecord {
        MessageRecord::new("Ann Lee", &format!("From: <{address}>"), received_at_ms, None)
    }

    fn loaded_registry(timestamps: &[i64]) -> Registry {
        let mut registry = Registry::new(false);
        registry.add_people([Person::new("Ann", "Annie", "Lee", ["ann@x.com"])]);
        let unknown =
            registry.resolve_batch(timestamps.iter().map(|&at| message("ann@x.com", at)));
        assert!(unknown.is_empty());
        registry
    }

    #[test]
    fn test_two_week_histogram() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let registry = loaded_registry(&[ms(monday) + 3 * DAY_MS, ms(monday) + 10 * DAY_MS]);
        assert_eq!(weekly_counts(&registry, monday, 2), vec![1, 1]);
    }

    #[test]
    fn test_non_monday_start_aligns_forward() {
        // 2024-05-22 is a Wednesday; the window starts 2024-05-27.
        let wednesday = NaiveDate::from_ymd_opt(2024, 5, 22).unwrap();
        let next_monday = NaiveDate::from_ymd_opt(2024, 5, 27).unwrap();
        let registry = loaded_registry(&[ms(next_monday), ms(next_monday) + 7 * DAY_MS]);
        assert_eq!(weekly_counts(&registry, wednesday, 2), vec![1, 1]);
    }

    #[test]
    fn test_messages_before_window_fold_into_first_bucket() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let registry = loaded_registry(&[ms(monday) - 30 * DAY_MS, ms(monday) + 1]);
        assert_eq!(weekly_counts(&registry, monday, 2), vec![2, 0]);
    }

    #[test]
    fn test_messages_past_window_are_dropped() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let registry = loaded_registry(&[ms(monday) + 1, ms(monday) + 20 * DAY_MS]);
        assert_eq!(weekly_counts(&registry, monday, 2), vec![1, 0]);
    }

    #[test]
    fn test_bucket_sum_matches_in_window_volume() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let timestamps: Vec<i64> = (0_i64..20).map(|day| ms(monday) + day * DAY_MS).collect();
        let registry = loaded_registry(&timestamps);
        let counts = weekly_counts(&registry, monday, 3);
        assert_eq!(counts.iter().sum::<u64>(), 20);
        assert_eq!(counts, vec![7, 7, 6]);
    }

    #[test]
    fn test_weekly_includes_catch_all_bucket() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let mut registry = Registry::new(true);
        registry.add_people([Person::new("Ann", "Annie", "Lee", ["ann@x.com"])]);
        let unknown = registry.resolve_batch([
            message("ann@x.com", ms(monday) + DAY_MS),
            message("stranger@y.org", ms(monday) + DAY_MS),
        ]);
        assert_eq!(unknown.len(), 1);
        assert_eq!(weekly_counts(&registry, monday, 1), vec![2]);
    }

    #[test]
    fn test_totals_sorted_by_last_name_case_insensitive() {
        let mut registry = Registry::new(false);
        registry.add_people([
            Person::new("Ann", "Annie", "lee", ["ann@x.com"]),
            Person::new("Bea", "Bea", "Kim", ["bea@x.com"]),
            Person::new("Cal", "Cal", "LEE", ["cal@x.com"]),
        ]);
        let unknown = registry.resolve_batch([message("ann@x.com", 10)]);
        assert!(unknown.is_empty());

        let rows = total_counts(&registry);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].last_name, "Kim");
        // Equal keys keep roster insertion order.
        assert_eq!(rows[1].last_name, "lee");
        assert_eq!(rows[2].last_name, "LEE");
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows[0].count, 0);
    }
}
