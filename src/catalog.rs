//! Phase catalog: the injected, immutable configuration the schedulers
//! read from.
//!
//! A catalog carries the ordered phase list, the mandatory-delay
//! (curing) rule table, and the trade color palette. It is passed into
//! the engine rather than living as module-level constants, so tests
//! run against synthetic catalogs and several catalog versions can
//! coexist.
//!
//! # Unknown Keys
//! Lookups by phase id never fail: an unknown id resolves to
//! [`DEFAULT_DURATION_DAYS`] and [`DEFAULT_TRADE`], an unknown trade to
//! [`DEFAULT_TRADE_COLOR`]. The defaults are deliberate — a typo in a
//! stored `step_id` degrades to a visible generic row instead of a
//! silent wrong duration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Phase, PhaseGroup};

/// Duration assumed for a phase id the catalog does not know.
pub const DEFAULT_DURATION_DAYS: u32 = 5;

/// Trade assumed for a phase id the catalog does not know.
pub const DEFAULT_TRADE: &str = "autre";

/// Color used for a trade the palette does not know.
pub const DEFAULT_TRADE_COLOR: &str = "#9e9e9e";

/// A mandatory non-working delay between two phases.
///
/// Evaluated post-hoc against an already dated schedule to compute a
/// display band; the forward pass never inserts the gap itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuringRule {
    /// Phase that must wait (e.g. `"structure"`).
    pub phase_id: String,
    /// Phase whose end starts the clock (e.g. `"excavation-fondation"`).
    pub after_phase_id: String,
    /// Minimum calendar days between the two.
    pub minimum_days: u32,
    /// Why the delay exists.
    pub reason: String,
}

/// Ordered phase list plus lookup tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseCatalog {
    phases: Vec<Phase>,
    curing_rules: Vec<CuringRule>,
    trade_palette: HashMap<String, String>,
}

impl PhaseCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a phase. Catalog order is build order.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Adds a curing rule.
    pub fn with_curing_rule(
        mut self,
        phase_id: impl Into<String>,
        after_phase_id: impl Into<String>,
        minimum_days: u32,
        reason: impl Into<String>,
    ) -> Self {
        self.curing_rules.push(CuringRule {
            phase_id: phase_id.into(),
            after_phase_id: after_phase_id.into(),
            minimum_days,
            reason: reason.into(),
        });
        self
    }

    /// Maps a trade to its display color.
    pub fn with_trade_color(mut self, trade: impl Into<String>, color: impl Into<String>) -> Self {
        self.trade_palette.insert(trade.into(), color.into());
        self
    }

    /// All phases in build order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Looks up a phase by id.
    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Position of a phase in build order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.id == id)
    }

    /// Preparation phases, in build order.
    pub fn preparation_phases(&self) -> Vec<&Phase> {
        self.phases
            .iter()
            .filter(|p| p.group.is_preparation())
            .collect()
    }

    /// Construction phases, in build order.
    pub fn construction_phases(&self) -> Vec<&Phase> {
        self.phases
            .iter()
            .filter(|p| !p.group.is_preparation())
            .collect()
    }

    /// Construction phases starting at `stage`.
    ///
    /// `None` or an id the catalog does not know both yield the full
    /// list, so a stale stored stage falls back to scheduling from the
    /// first phase instead of failing.
    pub fn construction_from(&self, stage: Option<&str>) -> Vec<&Phase> {
        let all = self.construction_phases();
        match stage {
            Some(id) => match all.iter().position(|p| p.id == id) {
                Some(idx) => all[idx..].to_vec(),
                None => all,
            },
            None => all,
        }
    }

    /// Duration of a phase, or [`DEFAULT_DURATION_DAYS`] for unknown ids.
    pub fn duration_of(&self, id: &str) -> u32 {
        self.phase(id)
            .map(|p| p.duration_days)
            .unwrap_or(DEFAULT_DURATION_DAYS)
    }

    /// Trade of a phase, or [`DEFAULT_TRADE`] for unknown ids.
    pub fn trade_of(&self, id: &str) -> &str {
        self.phase(id).map(|p| p.trade.as_str()).unwrap_or(DEFAULT_TRADE)
    }

    /// The unknown-phase trade.
    pub fn default_trade(&self) -> &str {
        DEFAULT_TRADE
    }

    /// Display color for a trade, or [`DEFAULT_TRADE_COLOR`].
    pub fn color_for_trade(&self, trade: &str) -> &str {
        self.trade_palette
            .get(trade)
            .map(String::as_str)
            .unwrap_or(DEFAULT_TRADE_COLOR)
    }

    /// All curing rules.
    pub fn curing_rules(&self) -> &[CuringRule] {
        &self.curing_rules
    }

    /// The standard self-build catalog: four preparation phases
    /// scheduled backward from the target start, thirteen construction
    /// phases scheduled forward from it, concrete curing rules for the
    /// foundations and the screed.
    pub fn standard() -> Self {
        let mut catalog = Self::new()
            // Préparation
            .with_phase(
                Phase::new("conception-plans", PhaseGroup::Preparation, "architecte", 20)
                    .with_title("Conception et plans"),
            )
            .with_phase(
                Phase::new("plans-permis", PhaseGroup::Preparation, "administratif", 30)
                    .with_title("Dépôt et instruction du permis"),
            )
            .with_phase(
                Phase::new("financement", PhaseGroup::Preparation, "administratif", 15)
                    .with_title("Financement et assurances"),
            )
            .with_phase(
                Phase::new("choix-artisans", PhaseGroup::Preparation, "coordination", 15)
                    .with_title("Consultation et choix des artisans"),
            )
            // Gros œuvre
            .with_phase(
                Phase::new("excavation-fondation", PhaseGroup::GrosOeuvre, "terrassement", 15)
                    .with_title("Excavation et fondations"),
            )
            .with_phase(
                Phase::new("structure", PhaseGroup::GrosOeuvre, "charpente", 25)
                    .with_title("Structure et charpente"),
            )
            .with_phase(
                Phase::new("toiture", PhaseGroup::GrosOeuvre, "couverture", 10)
                    .with_title("Couverture et zinguerie"),
            )
            .with_phase(
                Phase::new("menuiseries-ext", PhaseGroup::SecondOeuvre, "menuiserie", 5)
                    .with_title("Menuiseries extérieures")
                    .with_supplier_lead(30)
                    .with_fabrication_lead(45)
                    .with_measurement("structure", "Cotes des baies après élévation des murs"),
            )
            // Second œuvre
            .with_phase(
                Phase::new("electricite", PhaseGroup::SecondOeuvre, "electricite", 10)
                    .with_title("Électricité")
                    .with_supplier_lead(15),
            )
            .with_phase(
                Phase::new("plomberie", PhaseGroup::SecondOeuvre, "plomberie", 10)
                    .with_title("Plomberie et chauffage")
                    .with_supplier_lead(15),
            )
            .with_phase(
                Phase::new("isolation", PhaseGroup::SecondOeuvre, "isolation", 8)
                    .with_title("Isolation"),
            )
            .with_phase(
                Phase::new("cloisons", PhaseGroup::SecondOeuvre, "platrerie", 10)
                    .with_title("Cloisons et plâtrerie"),
            )
            .with_phase(
                Phase::new("chape", PhaseGroup::SecondOeuvre, "maconnerie", 3).with_title("Chape"),
            )
            // Finitions
            .with_phase(
                Phase::new("revetements-sols", PhaseGroup::Finitions, "carrelage", 8)
                    .with_title("Revêtements de sols"),
            )
            .with_phase(
                Phase::new("peinture", PhaseGroup::Finitions, "peinture", 10)
                    .with_title("Peinture et finitions murales"),
            )
            .with_phase(
                Phase::new("cuisine-sdb", PhaseGroup::Finitions, "agencement", 5)
                    .with_title("Cuisine et salle de bain")
                    .with_fabrication_lead(60)
                    .with_measurement("cloisons", "Cotes définitives après cloisonnement"),
            )
            .with_phase(
                Phase::new("finitions", PhaseGroup::Finitions, "coordination", 5)
                    .with_title("Finitions et réception"),
            )
            .with_curing_rule(
                "structure",
                "excavation-fondation",
                21,
                "Séchage des fondations avant élévation",
            )
            .with_curing_rule(
                "revetements-sols",
                "chape",
                14,
                "Séchage de la chape avant pose des revêtements",
            );

        let palette = [
            ("architecte", "#455a64"),
            ("administratif", "#78909c"),
            ("coordination", "#6d4c41"),
            ("terrassement", "#795548"),
            ("charpente", "#8d6e63"),
            ("couverture", "#5d4037"),
            ("menuiserie", "#ef6c00"),
            ("electricite", "#fbc02d"),
            ("plomberie", "#1976d2"),
            ("isolation", "#7b1fa2"),
            ("platrerie", "#9e9d24"),
            ("maconnerie", "#616161"),
            ("carrelage", "#00838f"),
            ("peinture", "#c2185b"),
            ("agencement", "#2e7d32"),
        ];
        for (trade, color) in palette {
            catalog = catalog.with_trade_color(trade, color);
        }
        catalog
    }
}
