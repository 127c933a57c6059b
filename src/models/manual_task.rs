//! User-created ad-hoc tasks.
//!
//! Manual tasks merge into the schedule alongside generated phases but
//! are always anchored to the date the user chose — re-chaining never
//! moves them. Tasks flagged `is_overlay` are visual-only: they are
//! excluded from conflict detection and never shift other items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{self, DateParseError};
use crate::catalog::PhaseCatalog;
use crate::models::{ScheduleItem, ScheduleStatus};

/// Step id recorded on materialized tasks with no linked phase.
pub const MANUAL_STEP_ID: &str = "tache-manuelle";

/// A user-created task, parsed and validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualTask {
    /// What the task is.
    pub description: String,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Duration in business days (≥ 1).
    pub estimated_days: u32,
    /// Catalog phase this task relates to, for color and grouping only.
    pub linked_step_id: Option<String>,
    /// Visual-only: runs alongside anything, never conflicts.
    pub is_overlay: bool,
    /// Trade working the task.
    pub trade_type: String,
    /// Display color.
    pub trade_color: String,
}

/// Raw form submission for a manual task.
///
/// Dates arrive as ISO `yyyy-MM-dd` strings; [`ManualTaskInput::parse`]
/// is the validation point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualTaskInput {
    pub description: String,
    pub start_date: String,
    pub estimated_days: u32,
    pub linked_step_id: Option<String>,
    pub is_overlay: bool,
    pub trade_type: String,
    pub trade_color: String,
}

/// Rejection reasons for a manual task submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManualTaskError {
    /// Start date is not ISO `yyyy-MM-dd`.
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
    /// Duration must be at least one day.
    #[error("estimated_days must be >= 1, got {0}")]
    InvalidDuration(u32),
}

impl ManualTaskInput {
    /// Validates the submission and produces a [`ManualTask`].
    pub fn parse(self) -> Result<ManualTask, ManualTaskError> {
        if self.estimated_days == 0 {
            return Err(ManualTaskError::InvalidDuration(self.estimated_days));
        }
        let start_date = calendar::parse_date(&self.start_date)?;
        Ok(ManualTask {
            description: self.description,
            start_date,
            estimated_days: self.estimated_days,
            linked_step_id: self.linked_step_id,
            is_overlay: self.is_overlay,
            trade_type: self.trade_type,
            trade_color: self.trade_color,
        })
    }
}

impl ManualTask {
    /// Last day of the task, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        calendar::span_end(self.start_date, self.estimated_days)
    }

    /// Materializes the task as a [`ScheduleItem`]-shaped row so the
    /// calendar and Gantt views can treat it uniformly.
    ///
    /// The row is pinned (`is_manual_date = true`): re-chaining leaves
    /// it where the user put it. Empty trade or color fall back to the
    /// linked phase's defaults, then to the catalog's unknown-phase
    /// defaults.
    pub fn materialize(&self, catalog: &PhaseCatalog, project_id: &str) -> ScheduleItem {
        let linked_phase = self
            .linked_step_id
            .as_deref()
            .and_then(|id| catalog.phase(id));
        let trade_type = if self.trade_type.is_empty() {
            linked_phase
                .map(|p| p.trade.clone())
                .unwrap_or_else(|| catalog.default_trade().to_string())
        } else {
            self.trade_type.clone()
        };
        let trade_color = if self.trade_color.is_empty() {
            catalog.color_for_trade(&trade_type).to_string()
        } else {
            self.trade_color.clone()
        };

        ScheduleItem {
            id: None,
            project_id: project_id.to_string(),
            step_id: self
                .linked_step_id
                .clone()
                .unwrap_or_else(|| MANUAL_STEP_ID.to_string()),
            step_name: self.description.clone(),
            trade_type,
            trade_color,
            estimated_days: self.estimated_days,
            actual_days: None,
            start_date: self.start_date,
            end_date: self.end_date(),
            status: ScheduleStatus::Scheduled,
            supplier_schedule_lead_days: None,
            fabrication_lead_days: None,
            measurement_required: false,
            measurement_after_step_id: None,
            measurement_notes: None,
            is_manual_date: true,
        }
    }
}
