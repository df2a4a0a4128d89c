//! Container construction.
//!
//! [`ContainerFactory`] owns the serial sequence and the product catalog used
//! to validate refrigerated containers. Containers built by the same factory
//! share one numbering, whatever their variant.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::kind::ContainerKind;
use super::model::Container;
use super::products::ProductCatalog;
use super::serial::{validate_tag, SerialNumber, SerialSequence};

/// Everything needed to build one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    #[serde(flatten)]
    pub kind: ContainerKind,
    pub max_load: f64,
    pub own_weight: f64,
    #[serde(default)]
    pub depth: f64,
    /// Overrides the variant's default serial tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl ContainerSpec {
    pub fn new(kind: ContainerKind, max_load: f64, own_weight: f64, depth: f64) -> Self {
        Self {
            kind,
            max_load,
            own_weight,
            depth,
            tag: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Validate dimensions and variant fields that do not need the catalog.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (self.max_load, "max_load"),
            (self.own_weight, "own_weight"),
            (self.depth, "depth"),
        ];
        for (value, field) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidContainer {
                    message: format!("{field} must be a finite non-negative number"),
                });
            }
        }
        if self.max_load <= 0.0 {
            return Err(Error::InvalidContainer {
                message: "max_load must be positive".to_string(),
            });
        }
        if self.own_weight > self.max_load {
            return Err(Error::InvalidContainer {
                message: format!(
                    "own_weight {} exceeds max_load {}",
                    self.own_weight, self.max_load
                ),
            });
        }

        match &self.kind {
            ContainerKind::Gas { pressure } if !pressure.is_finite() || *pressure < 0.0 => {
                Err(Error::InvalidContainer {
                    message: "pressure must be a finite non-negative number".to_string(),
                })
            }
            ContainerKind::Refrigerated { temperature, .. } if !temperature.is_finite() => {
                Err(Error::InvalidContainer {
                    message: "temperature must be finite".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn resolved_tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(self.kind.default_tag())
    }
}

/// Builds containers and hands out their serial numbers.
///
/// Factories draw from [`SerialSequence::process_wide`] unless given their
/// own sequence with [`with_sequence`](Self::with_sequence), so two default
/// factories never issue the same serial.
#[derive(Debug)]
pub struct ContainerFactory {
    sequence: Arc<SerialSequence>,
    catalog: ProductCatalog,
}

impl ContainerFactory {
    /// Factory backed by the built-in product catalog.
    pub fn new() -> Self {
        Self::with_catalog(ProductCatalog::builtin().clone())
    }

    /// Factory backed by `catalog`.
    pub fn with_catalog(catalog: ProductCatalog) -> Self {
        Self {
            sequence: SerialSequence::process_wide(),
            catalog,
        }
    }

    /// Factory backed by the built-in catalog with a private sequence starting at 1.
    pub fn isolated() -> Self {
        Self::new().with_sequence(Arc::new(SerialSequence::new()))
    }

    /// Draw serials from `sequence` instead of the process-wide one.
    #[must_use]
    pub fn with_sequence(mut self, sequence: Arc<SerialSequence>) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Sequence value the next successful build will use.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.peek()
    }

    /// Build a container from `spec`.
    ///
    /// Validation happens before a sequence value is drawn, so a rejected
    /// spec leaves the numbering untouched.
    pub fn build(&self, spec: &ContainerSpec) -> Result<Container> {
        spec.validate()?;
        let tag = spec.resolved_tag();
        validate_tag(tag)?;

        if let ContainerKind::Refrigerated {
            product,
            temperature,
        } = &spec.kind
        {
            let requirement = self.catalog.require(product)?;
            if *temperature < requirement.min_temperature {
                return Err(Error::TemperatureTooHigh {
                    product: requirement.name.clone(),
                    temperature: *temperature,
                    minimum: requirement.min_temperature,
                });
            }
        }

        let serial = SerialNumber::new(tag, self.sequence.advance());
        debug!(%serial, kind = spec.kind.label(), "built container");
        Ok(Container::new(
            serial,
            spec.kind.clone(),
            spec.max_load,
            spec.own_weight,
            spec.depth,
        ))
    }

    pub fn standard(&self, max_load: f64, own_weight: f64, depth: f64) -> Result<Container> {
        self.build(&ContainerSpec::new(ContainerKind::Standard, max_load, own_weight, depth))
    }

    pub fn liquid(
        &self,
        max_load: f64,
        own_weight: f64,
        depth: f64,
        hazardous: bool,
    ) -> Result<Container> {
        self.build(&ContainerSpec::new(
            ContainerKind::Liquid { hazardous },
            max_load,
            own_weight,
            depth,
        ))
    }

    pub fn gas(
        &self,
        max_load: f64,
        own_weight: f64,
        depth: f64,
        pressure: f64,
    ) -> Result<Container> {
        self.build(&ContainerSpec::new(
            ContainerKind::Gas { pressure },
            max_load,
            own_weight,
            depth,
        ))
    }

    pub fn refrigerated(
        &self,
        max_load: f64,
        own_weight: f64,
        depth: f64,
        product: &str,
        temperature: f64,
    ) -> Result<Container> {
        self.build(&ContainerSpec::new(
            ContainerKind::Refrigerated {
                product: product.to_string(),
                temperature,
            },
            max_load,
            own_weight,
            depth,
        ))
    }
}

impl Default for ContainerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_dimensions() {
        let factory = ContainerFactory::isolated();
        for (max_load, own_weight, depth) in [
            (0.0, 0.0, 1.0),
            (-5.0, 0.0, 1.0),
            (100.0, 200.0, 1.0),
            (100.0, 10.0, f64::INFINITY),
        ] {
            let err = factory
                .standard(max_load, own_weight, depth)
                .expect_err("invalid dimensions");
            assert!(matches!(err, Error::InvalidContainer { .. }));
        }
        assert_eq!(factory.next_sequence(), 1);
    }

    #[test]
    fn tag_override_is_used_in_serial() {
        let factory = ContainerFactory::isolated();
        let spec = ContainerSpec::new(ContainerKind::Gas { pressure: 2.0 }, 1_500.0, 250.0, 5.0)
            .with_tag("GX");
        let container = factory.build(&spec).expect("valid spec");
        assert_eq!(container.serial().to_string(), "KON-GX-1");
    }

    #[test]
    fn rejects_bad_tag_override() {
        let factory = ContainerFactory::new();
        let mut spec = ContainerSpec::new(ContainerKind::Standard, 100.0, 10.0, 1.0);
        spec.tag = Some("a b".to_string());
        assert!(matches!(factory.build(&spec), Err(Error::InvalidContainer { .. })));
    }

    #[test]
    fn default_factories_share_one_sequence() {
        let a = ContainerFactory::new();
        let b = ContainerFactory::with_catalog(ProductCatalog::builtin().clone());
        let first = a.standard(100.0, 10.0, 1.0).expect("valid");
        let second = b.standard(100.0, 10.0, 1.0).expect("valid");
        assert_ne!(first.serial(), second.serial());
        assert!(second.serial().sequence() > first.serial().sequence());
    }

    #[test]
    fn with_sequence_shares_numbering_between_factories() {
        let sequence = Arc::new(SerialSequence::starting_at(40));
        let a = ContainerFactory::new().with_sequence(Arc::clone(&sequence));
        let b = ContainerFactory::new().with_sequence(Arc::clone(&sequence));
        let first = a.liquid(100.0, 10.0, 1.0, false).expect("valid");
        let second = b.liquid(100.0, 10.0, 1.0, false).expect("valid");
        assert_eq!(first.serial().to_string(), "KON-L-40");
        assert_eq!(second.serial().to_string(), "KON-L-41");
        assert_eq!(sequence.peek(), 42);
    }

    #[test]
    fn spec_deserializes_with_flattened_kind() {
        let spec: ContainerSpec = serde_json::from_str(
            r#"{"kind":"refrigerated","product":"Fish","temperature":21,"max_load":1800,"own_weight":280,"depth":20,"tag":"F"}"#,
        )
        .expect("parses");
        assert_eq!(spec.tag.as_deref(), Some("F"));
        assert!(matches!(spec.kind, ContainerKind::Refrigerated { .. }));
    }
}
