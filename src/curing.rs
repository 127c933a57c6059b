//! Mandatory-delay (curing) resolution.
//!
//! Curing rules name a phase pair and a minimum calendar-day gap
//! (e.g. structure may only start 21 days after the foundations are
//! poured). The rules are evaluated against an already dated schedule:
//! the result is an advisory window for display, telling the owner
//! whether the chained dates leave enough drying time. The forward
//! pass never inserts the gap itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::PhaseCatalog;
use crate::models::ScheduleItem;

/// A resolved curing window between two scheduled phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuringWindow {
    /// Phase that must wait.
    pub phase_id: String,
    /// Phase whose end starts the clock.
    pub after_phase_id: String,
    /// End of the earlier phase.
    pub previous_end: NaiveDate,
    /// Start of the waiting phase.
    pub next_start: NaiveDate,
    /// Calendar days strictly between the two.
    pub gap_days: i64,
    /// Required minimum calendar-day gap.
    pub minimum_days: u32,
    /// Whether the scheduled dates already honor the minimum.
    pub satisfied: bool,
    /// Why the delay exists.
    pub reason: String,
}

/// Evaluates every curing rule of the catalog against a dated schedule.
///
/// Rules whose phases are absent from `items` (e.g. a schedule sliced
/// at a later stage) produce no window.
pub fn resolve_curing_windows(
    catalog: &PhaseCatalog,
    items: &[ScheduleItem],
) -> Vec<CuringWindow> {
    let mut windows = Vec::new();
    for rule in catalog.curing_rules() {
        let earlier = items.iter().find(|i| i.step_id == rule.after_phase_id);
        let later = items.iter().find(|i| i.step_id == rule.phase_id);
        let (Some(earlier), Some(later)) = (earlier, later) else {
            continue;
        };
        let gap_days = (later.start_date - earlier.end_date).num_days() - 1;
        windows.push(CuringWindow {
            phase_id: rule.phase_id.clone(),
            after_phase_id: rule.after_phase_id.clone(),
            previous_end: earlier.end_date,
            next_start: later.start_date,
            gap_days,
            minimum_days: rule.minimum_days,
            satisfied: gap_days >= i64::from(rule.minimum_days),
            reason: rule.reason.clone(),
        });
    }
    windows
}
