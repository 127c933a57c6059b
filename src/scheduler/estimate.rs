//! Pre-generation duration totals.
//!
//! Aggregates the catalog's default durations into the
//! preparation/construction split shown to the owner before any
//! schedule exists.

use serde::{Deserialize, Serialize};

use crate::catalog::PhaseCatalog;

/// Business-day totals derived from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEstimate {
    /// Sum of preparation phase durations.
    pub preparation_days: u32,
    /// Sum of construction phase durations.
    pub construction_days: u32,
    /// Full project span, preparation included.
    pub total_days: u32,
}

impl ProjectEstimate {
    /// Computes totals from the catalog's default durations.
    pub fn from_catalog(catalog: &PhaseCatalog) -> Self {
        let preparation_days = catalog
            .preparation_phases()
            .iter()
            .map(|p| p.duration_days)
            .sum();
        let construction_days = catalog
            .construction_phases()
            .iter()
            .map(|p| p.duration_days)
            .sum();
        Self {
            preparation_days,
            construction_days,
            total_days: preparation_days + construction_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, PhaseGroup};

    #[test]
    fn test_standard_catalog_totals() {
        let estimate = ProjectEstimate::from_catalog(&PhaseCatalog::standard());
        assert_eq!(estimate.preparation_days, 80);
        assert_eq!(estimate.construction_days, 124);
        assert_eq!(estimate.total_days, 204);
    }

    #[test]
    fn test_empty_catalog() {
        let estimate = ProjectEstimate::from_catalog(&PhaseCatalog::new());
        assert_eq!(estimate.total_days, 0);
    }

    #[test]
    fn test_split_follows_phase_groups() {
        let catalog = PhaseCatalog::new()
            .with_phase(Phase::new("plans", PhaseGroup::Preparation, "architecte", 10))
            .with_phase(Phase::new("murs", PhaseGroup::GrosOeuvre, "maconnerie", 20));
        let estimate = ProjectEstimate::from_catalog(&catalog);
        assert_eq!(estimate.preparation_days, 10);
        assert_eq!(estimate.construction_days, 20);
        assert_eq!(estimate.total_days, 30);
    }
}
