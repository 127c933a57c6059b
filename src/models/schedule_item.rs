//! Scheduled phase row.
//!
//! One `ScheduleItem` per phase instance per project. Rows are created
//! by generation, updated by the user or by re-chaining when an earlier
//! item shifts, and replaced wholesale when the schedule is regenerated.
//!
//! # Invariant
//! `start_date <= end_date`, with `end_date` computed as
//! `start_date + (duration - 1)` business days, inclusive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Progress state of a scheduled row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Dated by the generator, not yet started.
    Scheduled,
    /// Waiting on an external prerequisite.
    Pending,
    /// Work underway.
    InProgress,
    /// Done; `actual_days` should be set.
    Completed,
}

/// One dated phase row of a project schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Storage identifier. `None` until the row is persisted.
    pub id: Option<i64>,
    /// Owning project.
    pub project_id: String,
    /// Catalog phase this row instantiates.
    pub step_id: String,
    /// Display name, copied from the catalog title at generation time.
    pub step_name: String,
    /// Trade working this row (conflict-detection key).
    pub trade_type: String,
    /// Display color for the trade.
    pub trade_color: String,
    /// Planned duration in business days.
    pub estimated_days: u32,
    /// Real duration, set on completion. Overrides `estimated_days`
    /// for display width.
    pub actual_days: Option<u32>,
    /// First working day, inclusive.
    pub start_date: NaiveDate,
    /// Last working day, inclusive.
    pub end_date: NaiveDate,
    /// Progress state.
    pub status: ScheduleStatus,
    /// Supplier call lead, copied from the catalog.
    pub supplier_schedule_lead_days: Option<u32>,
    /// Fabrication lead, copied from the catalog.
    pub fabrication_lead_days: Option<u32>,
    /// Whether on-site measurements are needed for this row.
    pub measurement_required: bool,
    /// Phase after which to measure, when `measurement_required`.
    pub measurement_after_step_id: Option<String>,
    /// What to measure.
    pub measurement_notes: Option<String>,
    /// User pinned this row to its dates; auto re-chaining must not
    /// move it.
    pub is_manual_date: bool,
}

impl ScheduleItem {
    /// Duration used for display and re-chaining: the real duration
    /// when known, the estimate otherwise.
    #[inline]
    pub fn display_days(&self) -> u32 {
        self.actual_days.unwrap_or(self.estimated_days)
    }

    /// Whether the row's inclusive date span covers `date`.
    #[inline]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Whether two rows share at least one calendar day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;

    fn item(start: &str, end: &str) -> ScheduleItem {
        ScheduleItem {
            id: None,
            project_id: "p1".into(),
            step_id: "structure".into(),
            step_name: "Structure et charpente".into(),
            trade_type: "charpente".into(),
            trade_color: "#8d6e63".into(),
            estimated_days: 10,
            actual_days: None,
            start_date: parse_date(start).unwrap(),
            end_date: parse_date(end).unwrap(),
            status: ScheduleStatus::Scheduled,
            supplier_schedule_lead_days: None,
            fabrication_lead_days: None,
            measurement_required: false,
            measurement_after_step_id: None,
            measurement_notes: None,
            is_manual_date: false,
        }
    }

    #[test]
    fn test_covers_inclusive_bounds() {
        let it = item("2025-07-01", "2025-07-05");
        assert!(it.covers(parse_date("2025-07-01").unwrap()));
        assert!(it.covers(parse_date("2025-07-05").unwrap()));
        assert!(!it.covers(parse_date("2025-06-30").unwrap()));
        assert!(!it.covers(parse_date("2025-07-06").unwrap()));
    }

    #[test]
    fn test_overlaps() {
        let a = item("2025-07-01", "2025-07-05");
        let b = item("2025-07-05", "2025-07-09");
        let c = item("2025-07-06", "2025-07-09");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_display_days_prefers_actual() {
        let mut it = item("2025-07-01", "2025-07-05");
        assert_eq!(it.display_days(), 10);
        it.actual_days = Some(13);
        assert_eq!(it.display_days(), 13);
    }

    #[test]
    fn test_dates_serialize_as_iso_strings() {
        let it = item("2025-07-01", "2025-07-05");
        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["start_date"], "2025-07-01");
        assert_eq!(json["end_date"], "2025-07-05");
        assert_eq!(json["status"], "scheduled");
    }
}
