//! Bidirectional schedule planner.
//!
//! # Algorithm
//!
//! 1. Backward pass: preparation phases are processed in reverse
//!    catalog order. The segment closest to the target start ends one
//!    business day before it; each earlier phase ends one business day
//!    before its successor starts. Output is restored to catalog order.
//! 2. Forward pass: construction phases are walked in catalog order,
//!    each starting one business day after its predecessor's end.
//!
//! Durations are inclusive business-day spans: a phase of `k` days
//! starting on `d` ends on `d + (k - 1)` business days. Measurement
//! requirements are carried as row metadata and never shift dates.

use chrono::NaiveDate;

use crate::calendar::{next_business_day, previous_business_day, span_end, subtract_business_days};
use crate::catalog::PhaseCatalog;
use crate::models::{Phase, ScheduleItem, ScheduleStatus};

/// Plans a project schedule from a phase catalog and a target start
/// date.
#[derive(Debug, Clone)]
pub struct SchedulePlanner<'a> {
    catalog: &'a PhaseCatalog,
}

impl<'a> SchedulePlanner<'a> {
    /// Creates a planner over a catalog.
    pub fn new(catalog: &'a PhaseCatalog) -> Self {
        Self { catalog }
    }

    /// Produces the full dated schedule for a project.
    ///
    /// With no `current_stage`, preparation phases are scheduled
    /// backward so they finish exactly when construction begins, then
    /// construction phases forward from `target_start`. With a stage,
    /// the project is already underway: only construction phases from
    /// that stage onward are produced. A stage the catalog does not
    /// know falls back to the full construction list.
    pub fn plan(
        &self,
        project_id: &str,
        target_start: NaiveDate,
        current_stage: Option<&str>,
    ) -> Vec<ScheduleItem> {
        let mut items = match current_stage {
            None => self.backward(project_id, target_start),
            Some(_) => Vec::new(),
        };
        items.extend(self.forward(project_id, target_start, current_stage));
        items
    }

    /// Forward pass: construction phases chained from `target_start`.
    pub fn forward(
        &self,
        project_id: &str,
        target_start: NaiveDate,
        current_stage: Option<&str>,
    ) -> Vec<ScheduleItem> {
        let phases = self.catalog.construction_from(current_stage);
        let mut items = Vec::with_capacity(phases.len());
        let mut current = target_start;
        for phase in phases {
            let start = current;
            let end = span_end(start, phase.duration_days);
            items.push(self.row(project_id, phase, start, end));
            current = next_business_day(end);
        }
        items
    }

    /// Backward pass: preparation phases ending one business day
    /// before `target_start`.
    ///
    /// The reversal is a computation device only; rows come back in
    /// catalog order, earliest phase first.
    pub fn backward(&self, project_id: &str, target_start: NaiveDate) -> Vec<ScheduleItem> {
        let phases = self.catalog.preparation_phases();
        let mut items = Vec::with_capacity(phases.len());
        let mut segment_end = previous_business_day(target_start);
        for &phase in phases.iter().rev() {
            let start = subtract_business_days(segment_end, phase.duration_days.saturating_sub(1));
            items.push(self.row(project_id, phase, start, segment_end));
            segment_end = previous_business_day(start);
        }
        items.reverse();
        items
    }

    fn row(&self, project_id: &str, phase: &Phase, start: NaiveDate, end: NaiveDate) -> ScheduleItem {
        ScheduleItem {
            id: None,
            project_id: project_id.to_string(),
            step_id: phase.id.clone(),
            step_name: phase.title.clone(),
            trade_type: phase.trade.clone(),
            trade_color: self.catalog.color_for_trade(&phase.trade).to_string(),
            estimated_days: phase.duration_days,
            actual_days: None,
            start_date: start,
            end_date: end,
            status: ScheduleStatus::Scheduled,
            supplier_schedule_lead_days: phase.supplier_lead_days,
            fabrication_lead_days: phase.fabrication_lead_days,
            measurement_required: phase.measurement.is_some(),
            measurement_after_step_id: phase
                .measurement
                .as_ref()
                .map(|m| m.after_phase_id.clone()),
            measurement_notes: phase.measurement.as_ref().map(|m| m.notes.clone()),
            is_manual_date: false,
        }
    }
}
