//! Construction phase model.
//!
//! A phase is one named step of a residential build (e.g. "Structure et
//! charpente") with a default trade and duration. Phases are catalog
//! data: defined once, never mutated at runtime. Their position in the
//! catalog defines the build order.

use serde::{Deserialize, Serialize};

/// Stage of the project a phase belongs to.
///
/// Preparation phases (plans, permits, financing) are scheduled
/// backward from the target start date; everything else is scheduled
/// forward from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseGroup {
    /// Plans, permits, financing, contractor selection.
    Preparation,
    /// Earthworks, foundations, structure, roof.
    GrosOeuvre,
    /// Joinery, electrical, plumbing, insulation, partitions.
    SecondOeuvre,
    /// Coverings, paint, fittings.
    Finitions,
}

impl PhaseGroup {
    /// Whether phases of this group are scheduled backward from the
    /// target start date.
    #[inline]
    pub fn is_preparation(self) -> bool {
        matches!(self, PhaseGroup::Preparation)
    }
}

/// A measurement requirement attached to a phase.
///
/// Some phases (exterior joinery, kitchen) need on-site measurements
/// taken once an earlier phase is done. This is advisory metadata
/// carried on the scheduled row; it never shifts dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementSpec {
    /// Phase that must be complete before measuring.
    pub after_phase_id: String,
    /// What to measure and why.
    pub notes: String,
}

/// A catalog phase: one named construction step with its defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Unique phase identifier (e.g. `"excavation-fondation"`).
    pub id: String,
    /// Display title (e.g. `"Excavation et fondations"`).
    pub title: String,
    /// Project stage this phase belongs to.
    pub group: PhaseGroup,
    /// Trade responsible by default (e.g. `"plomberie"`).
    pub trade: String,
    /// Default duration in business days. Catalog data keeps this ≥ 1.
    pub duration_days: u32,
    /// Days ahead of the phase start by which the supplier must be
    /// called. `None` = no supplier coordination needed.
    pub supplier_lead_days: Option<u32>,
    /// Days ahead of the phase start by which fabrication must begin.
    /// `None` = nothing is fabricated off-site.
    pub fabrication_lead_days: Option<u32>,
    /// Measurement requirement, if any.
    pub measurement: Option<MeasurementSpec>,
}

impl Phase {
    /// Creates a phase with the given id, group, trade, and duration.
    pub fn new(
        id: impl Into<String>,
        group: PhaseGroup,
        trade: impl Into<String>,
        duration_days: u32,
    ) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            group,
            trade: trade.into(),
            duration_days,
            supplier_lead_days: None,
            fabrication_lead_days: None,
            measurement: None,
        }
    }

    /// Sets the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the supplier call lead time (days before start).
    pub fn with_supplier_lead(mut self, days: u32) -> Self {
        self.supplier_lead_days = Some(days);
        self
    }

    /// Sets the fabrication lead time (days before start).
    pub fn with_fabrication_lead(mut self, days: u32) -> Self {
        self.fabrication_lead_days = Some(days);
        self
    }

    /// Attaches a measurement requirement.
    pub fn with_measurement(
        mut self,
        after_phase_id: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        self.measurement = Some(MeasurementSpec {
            after_phase_id: after_phase_id.into(),
            notes: notes.into(),
        });
        self
    }

    /// Whether this phase carries any lead-time requirement.
    pub fn has_lead_times(&self) -> bool {
        self.supplier_lead_days.is_some() || self.fabrication_lead_days.is_some()
    }
}
