//! The closed set of container variants and their per-variant rules.

use serde::{Deserialize, Serialize};

use super::constants::{GAS_RESIDUE_RATIO, HAZARDOUS_FILL_RATIO, STANDARD_FILL_RATIO};

/// Variant of a container, carrying the fields only that variant needs.
///
/// Every load and unload goes through [`Container`](super::Container), which
/// dispatches on this enum; there is no variant-less path that skips these rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContainerKind {
    /// Plain container with only the base capacity rule.
    Standard,
    /// Liquid cargo; crossing the fill threshold raises a hazard notice.
    Liquid {
        #[serde(default)]
        hazardous: bool,
    },
    /// Pressurised gas; unloading leaves a residue behind.
    Gas {
        /// Descriptive only; no rule reads it.
        #[serde(default)]
        pressure: f64,
    },
    /// Temperature-controlled cargo validated against the product catalog.
    Refrigerated { product: String, temperature: f64 },
}

impl ContainerKind {
    /// Tag used in serial numbers when no explicit tag is supplied.
    pub fn default_tag(&self) -> &'static str {
        match self {
            ContainerKind::Standard => "S",
            ContainerKind::Liquid { .. } => "L",
            ContainerKind::Gas { .. } => "G",
            ContainerKind::Refrigerated { .. } => "C",
        }
    }

    /// Human-readable label shown in textual renderings.
    pub fn label(&self) -> &'static str {
        match self {
            ContainerKind::Standard => "standard",
            ContainerKind::Liquid { .. } => "liquid",
            ContainerKind::Gas { .. } => "gas",
            ContainerKind::Refrigerated { .. } => "refrigerated",
        }
    }

    /// Whether this variant can emit hazard notices.
    pub fn is_hazard_notifier(&self) -> bool {
        matches!(
            self,
            ContainerKind::Liquid { .. } | ContainerKind::Gas { .. }
        )
    }

    /// Cargo weight above which a load raises a hazard notice, if this variant has one.
    pub fn fill_threshold(&self, max_load: f64) -> Option<f64> {
        match self {
            ContainerKind::Liquid { hazardous: true } => Some(max_load * HAZARDOUS_FILL_RATIO),
            ContainerKind::Liquid { hazardous: false } => Some(max_load * STANDARD_FILL_RATIO),
            _ => None,
        }
    }

    /// Cargo weight left behind after unloading `cargo_weight`.
    pub fn residue_after_unload(&self, cargo_weight: f64) -> f64 {
        match self {
            ContainerKind::Gas { .. } => cargo_weight * GAS_RESIDUE_RATIO,
            _ => 0.0,
        }
    }
}
