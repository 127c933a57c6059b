//! Lead-time reminder alerts.
//!
//! Alerts are derived from persisted schedule rows (they reference the
//! row's storage id) and tell the owner when to call a supplier or
//! start off-site fabrication. Dismissed alerts stay dismissed unless
//! the owning row's dates change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the reminder is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Call the supplier to book delivery.
    SupplierCall,
    /// Off-site fabrication must begin.
    FabricationStart,
}

/// A dated reminder attached to a schedule row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAlert {
    /// Storage identifier. `None` until persisted.
    pub id: Option<i64>,
    /// Owning project.
    pub project_id: String,
    /// Persisted schedule row this alert belongs to.
    pub schedule_id: i64,
    /// Kind of reminder.
    pub alert_type: AlertType,
    /// Day the reminder is due.
    pub alert_date: NaiveDate,
    /// User-facing reminder text.
    pub message: String,
    /// User dismissed this alert.
    pub is_dismissed: bool,
}

impl ScheduleAlert {
    /// Creates a supplier-call alert.
    pub fn supplier_call(
        project_id: impl Into<String>,
        schedule_id: i64,
        alert_date: NaiveDate,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            project_id: project_id.into(),
            schedule_id,
            alert_type: AlertType::SupplierCall,
            alert_date,
            message: message.into(),
            is_dismissed: false,
        }
    }

    /// Creates a fabrication-start alert.
    pub fn fabrication_start(
        project_id: impl Into<String>,
        schedule_id: i64,
        alert_date: NaiveDate,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            project_id: project_id.into(),
            schedule_id,
            alert_type: AlertType::FabricationStart,
            alert_date,
            message: message.into(),
            is_dismissed: false,
        }
    }

    /// Identity used to avoid re-creating an alert the store already
    /// has: same row, same kind, same due date.
    pub fn identity(&self) -> (i64, AlertType, NaiveDate) {
        (self.schedule_id, self.alert_type, self.alert_date)
    }
}
