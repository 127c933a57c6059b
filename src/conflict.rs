//! Day-level trade conflict detection.
//!
//! Given every dated item considered "real" — all schedule rows plus
//! non-overlay manual tasks — finds each calendar day on which two or
//! more distinct trades are active at once. A pure, order-independent
//! reduction with no phase-specific exceptions: overlay tasks are the
//! only exclusion, since they represent work explicitly allowed to run
//! alongside anything.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{ManualTask, ScheduleItem};

/// A calendar day with two or more distinct trades active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The contested day.
    pub date: NaiveDate,
    /// Distinct trades active that day, sorted.
    pub trades: Vec<String>,
}

/// Finds every day with at least two distinct trades active.
///
/// Results are ordered by date; each conflict's trade list is sorted
/// and deduplicated. Two items of the same trade never conflict.
pub fn detect_conflicts(items: &[ScheduleItem], manual_tasks: &[ManualTask]) -> Vec<Conflict> {
    let mut trades_by_day: BTreeMap<NaiveDate, BTreeSet<&str>> = BTreeMap::new();

    for item in items {
        mark_span(&mut trades_by_day, &item.trade_type, item.start_date, item.end_date);
    }
    for task in manual_tasks {
        if task.is_overlay {
            continue;
        }
        mark_span(&mut trades_by_day, &task.trade_type, task.start_date, task.end_date());
    }

    trades_by_day
        .into_iter()
        .filter(|(_, trades)| trades.len() >= 2)
        .map(|(date, trades)| Conflict {
            date,
            trades: trades.into_iter().map(String::from).collect(),
        })
        .collect()
}

fn mark_span<'a>(
    trades_by_day: &mut BTreeMap<NaiveDate, BTreeSet<&'a str>>,
    trade: &'a str,
    start: NaiveDate,
    end: NaiveDate,
) {
    let mut day = start;
    while day <= end {
        trades_by_day.entry(day).or_default().insert(trade);
        day += Duration::days(1);
    }
}
