//! Catalog integrity checks.
//!
//! Validates an injected phase catalog before it is handed to the
//! planner. Detects:
//! - Duplicate phase ids
//! - Zero durations (minimum phase length is one day)
//! - Measurement references to unknown phases
//! - Curing rules naming unknown phases or a zero minimum
//! - A catalog with nothing to build

use crate::catalog::PhaseCatalog;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two phases share the same id.
    DuplicateId,
    /// A phase or curing rule has a zero duration.
    InvalidDuration,
    /// A measurement or curing rule references an unknown phase.
    InvalidReference,
    /// The catalog has no construction phases.
    NoConstructionPhases,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a phase catalog.
///
/// Checks:
/// 1. No duplicate phase ids
/// 2. Every phase lasts at least one day
/// 3. Measurement `after_phase_id` references exist
/// 4. Curing rules reference existing phases and a positive minimum
/// 5. At least one construction phase exists
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &PhaseCatalog) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for phase in catalog.phases() {
        if !ids.insert(phase.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate phase id: {}", phase.id),
            ));
        }
        if phase.duration_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Phase '{}' has a zero duration", phase.id),
            ));
        }
        if let Some(m) = &phase.measurement {
            if !catalog.phases().iter().any(|p| p.id == m.after_phase_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!(
                        "Phase '{}' measures after unknown phase '{}'",
                        phase.id, m.after_phase_id
                    ),
                ));
            }
        }
    }

    for rule in catalog.curing_rules() {
        for referenced in [&rule.phase_id, &rule.after_phase_id] {
            if !ids.contains(referenced.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Curing rule references unknown phase '{referenced}'"),
                ));
            }
        }
        if rule.minimum_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Curing rule for '{}' has a zero minimum", rule.phase_id),
            ));
        }
    }

    if catalog.construction_phases().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoConstructionPhases,
            "Catalog has no construction phases",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, PhaseGroup};

    fn construction(id: &str, days: u32) -> Phase {
        Phase::new(id, PhaseGroup::GrosOeuvre, "maconnerie", days)
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        assert!(validate_catalog(&PhaseCatalog::standard()).is_ok());
    }

    #[test]
    fn test_duplicate_phase_id() {
        let catalog = PhaseCatalog::new()
            .with_phase(construction("murs", 10))
            .with_phase(construction("murs", 12));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_zero_duration() {
        let catalog = PhaseCatalog::new().with_phase(construction("murs", 0));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_unknown_measurement_reference() {
        let catalog = PhaseCatalog::new().with_phase(
            construction("cuisine", 5).with_measurement("cloisons-disparues", "cotes"),
        );
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_curing_rule_unknown_phase() {
        let catalog = PhaseCatalog::new()
            .with_phase(construction("murs", 10))
            .with_curing_rule("murs", "fondations-disparues", 21, "séchage");
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidReference
                && e.message.contains("fondations-disparues")));
    }

    #[test]
    fn test_curing_rule_zero_minimum() {
        let catalog = PhaseCatalog::new()
            .with_phase(construction("fondations", 15))
            .with_phase(construction("murs", 10))
            .with_curing_rule("murs", "fondations", 0, "séchage");
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_empty_catalog_has_nothing_to_build() {
        let errors = validate_catalog(&PhaseCatalog::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoConstructionPhases));
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let catalog = PhaseCatalog::new()
            .with_phase(construction("murs", 0))
            .with_phase(construction("murs", 10))
            .with_curing_rule("murs", "inconnue", 21, "séchage");
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
