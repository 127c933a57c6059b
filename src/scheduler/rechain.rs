//! Dependency-aware re-chaining.
//!
//! When a row's dates move, every later row must be re-derived so each
//! phase still starts one business day after its predecessor ends.
//! Rows the user pinned (`is_manual_date`) keep their dates; they
//! still push the chain cursor forward when they end later than it,
//! so no phase is ever scheduled underneath a pinned row.

use crate::calendar::{next_business_day, span_end};
use crate::models::ScheduleItem;

/// Re-derives the dates of every row after `from_index`.
///
/// `items` must be in schedule order. Durations use the real duration
/// when set (`actual_days`), the estimate otherwise. Returns the
/// indices of rows whose dates actually changed.
pub fn rechain_following(items: &mut [ScheduleItem], from_index: usize) -> Vec<usize> {
    let mut changed = Vec::new();
    if from_index >= items.len() {
        return changed;
    }

    let mut cursor = items[from_index].end_date;
    for i in (from_index + 1)..items.len() {
        if items[i].is_manual_date {
            cursor = cursor.max(items[i].end_date);
            continue;
        }
        let start = next_business_day(cursor);
        let end = span_end(start, items[i].display_days());
        if items[i].start_date != start || items[i].end_date != end {
            items[i].start_date = start;
            items[i].end_date = end;
            changed.push(i);
        }
        cursor = end;
    }
    changed
}
