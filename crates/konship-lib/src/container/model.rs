//! The container itself: identity, capacity, and weight accounting.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::hazard::{HazardNotice, HazardNotifier, TracingNotifier};
use super::kind::ContainerKind;
use super::serial::SerialNumber;

/// A cargo container of any variant.
///
/// Containers are created through [`ContainerFactory`](super::ContainerFactory),
/// which validates the dimensions and assigns the serial number. Only
/// [`load`](Self::load) and [`unload`](Self::unload) change `cargo_weight`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    serial: SerialNumber,
    #[serde(flatten)]
    kind: ContainerKind,
    max_load: f64,
    own_weight: f64,
    depth: f64,
    cargo_weight: f64,
}

impl Container {
    pub(crate) fn new(
        serial: SerialNumber,
        kind: ContainerKind,
        max_load: f64,
        own_weight: f64,
        depth: f64,
    ) -> Self {
        Self {
            serial,
            kind,
            max_load,
            own_weight,
            depth,
            cargo_weight: 0.0,
        }
    }

    pub fn serial(&self) -> &SerialNumber {
        &self.serial
    }

    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    /// Maximum combined weight (own + cargo) in kilograms.
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// Tare weight in kilograms.
    pub fn own_weight(&self) -> f64 {
        self.own_weight
    }

    /// Physical depth in centimetres.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn cargo_weight(&self) -> f64 {
        self.cargo_weight
    }

    /// Own weight plus cargo weight.
    pub fn gross_weight(&self) -> f64 {
        self.own_weight + self.cargo_weight
    }

    /// Cargo weight that can still be added before reaching `max_load`.
    pub fn available_capacity(&self) -> f64 {
        (self.max_load - self.gross_weight()).max(0.0)
    }

    /// Load cargo, sending any hazard notice to the `tracing` log.
    pub fn load(&mut self, weight: f64) -> Result<()> {
        self.load_with(weight, &mut TracingNotifier)
    }

    /// Load cargo, sending any hazard notice to `notifier`.
    ///
    /// The variant's fill threshold is checked against `cargo_weight + weight`
    /// first; crossing it raises a notice but does not stop the load. The
    /// capacity rule then applies and, on failure, leaves `cargo_weight`
    /// unchanged.
    pub fn load_with(&mut self, weight: f64, notifier: &mut dyn HazardNotifier) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { weight });
        }

        let projected = self.cargo_weight + weight;
        if let Some(threshold) = self.kind.fill_threshold(self.max_load) {
            if projected > threshold {
                notifier.notify(&HazardNotice {
                    serial: self.serial.to_string(),
                    message: format!(
                        "fill limit exceeded: {projected} kg of cargo over the {threshold} kg threshold"
                    ),
                    projected_cargo: Some(projected),
                    threshold: Some(threshold),
                });
            }
        }

        if self.own_weight + projected > self.max_load {
            return Err(Error::OverCapacity {
                serial: self.serial.to_string(),
                requested: weight,
                available: self.available_capacity(),
                max_load: self.max_load,
            });
        }

        self.cargo_weight = projected;
        debug!(serial = %self.serial, weight, cargo_weight = self.cargo_weight, "loaded cargo");
        Ok(())
    }

    /// Empty the container. Gas containers keep a residue of their cargo.
    pub fn unload(&mut self) {
        let before = self.cargo_weight;
        self.cargo_weight = self.kind.residue_after_unload(before);
        debug!(
            serial = %self.serial,
            before,
            cargo_weight = self.cargo_weight,
            "unloaded cargo"
        );
    }

    /// Emit an ad-hoc hazard notice if this variant is a hazard notifier.
    ///
    /// Returns `false` without emitting anything for variants that cannot notify.
    pub fn notify_hazard(&self, message: &str, notifier: &mut dyn HazardNotifier) -> bool {
        if !self.kind.is_hazard_notifier() {
            return false;
        }
        notifier.notify(&HazardNotice {
            serial: self.serial.to_string(),
            message: message.to_string(),
            projected_cargo: None,
            threshold: None,
        });
        true
    }

    /// Human-readable summary of serial, load, own weight and depth.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} kg (Own weight: {} kg, Depth: {} cm)",
            self.serial, self.cargo_weight, self.max_load, self.own_weight, self.depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::hazard::HazardLog;

    fn container(kind: ContainerKind, max_load: f64, own_weight: f64) -> Container {
        Container::new(
            SerialNumber::new(kind.default_tag(), 1),
            kind,
            max_load,
            own_weight,
            100.0,
        )
    }

    #[test]
    fn load_accumulates_until_capacity() {
        let mut c = container(ContainerKind::Standard, 1_000.0, 200.0);
        c.load(300.0).expect("fits");
        c.load(500.0).expect("fits exactly");
        assert_eq!(c.cargo_weight(), 800.0);
        assert_eq!(c.available_capacity(), 0.0);

        let err = c.load(0.5).expect_err("over capacity");
        assert!(matches!(err, Error::OverCapacity { .. }));
        assert_eq!(c.cargo_weight(), 800.0);
    }

    #[test]
    fn negative_and_nan_weights_are_rejected() {
        let mut c = container(ContainerKind::Standard, 1_000.0, 0.0);
        assert!(matches!(c.load(-1.0), Err(Error::InvalidWeight { .. })));
        assert!(matches!(c.load(f64::NAN), Err(Error::InvalidWeight { .. })));
        assert_eq!(c.cargo_weight(), 0.0);
    }

    #[test]
    fn over_threshold_liquid_load_notifies_even_when_rejected() {
        let mut c = container(ContainerKind::Liquid { hazardous: true }, 1_000.0, 800.0);
        let mut log = HazardLog::new();
        let err = c.load_with(600.0, &mut log).expect_err("over capacity");
        assert!(matches!(err, Error::OverCapacity { .. }));
        assert_eq!(log.notices().len(), 1);
        assert_eq!(c.cargo_weight(), 0.0);
    }

    #[test]
    fn standard_unload_zeroes_and_gas_keeps_residue() {
        let mut plain = container(ContainerKind::Standard, 1_000.0, 0.0);
        plain.load(400.0).expect("fits");
        plain.unload();
        assert_eq!(plain.cargo_weight(), 0.0);

        let mut gas = container(ContainerKind::Gas { pressure: 5.0 }, 1_000.0, 0.0);
        gas.load(400.0).expect("fits");
        gas.unload();
        assert_eq!(gas.cargo_weight(), 400.0 * 0.05);
    }

    #[test]
    fn gas_load_never_notifies() {
        let mut gas = container(ContainerKind::Gas { pressure: 5.0 }, 1_000.0, 0.0);
        let mut log = HazardLog::new();
        gas.load_with(999.0, &mut log).expect("fits");
        assert!(log.is_empty());

        assert!(gas.notify_hazard("valve check", &mut log));
        assert_eq!(log.notices()[0].message, "valve check");
    }

    #[test]
    fn refrigerated_cannot_notify() {
        let c = container(
            ContainerKind::Refrigerated {
                product: "Fish".to_string(),
                temperature: 2.0,
            },
            1_000.0,
            0.0,
        );
        let mut log = HazardLog::new();
        assert!(!c.notify_hazard("door open", &mut log));
        assert!(log.is_empty());
    }

    #[test]
    fn describe_matches_summary_format() {
        let kind = ContainerKind::Liquid { hazardous: false };
        let mut c = container(kind, 10_000.0, 2_000.0);
        c.load(1_500.0).expect("fits");
        assert_eq!(
            c.describe(),
            "KON-L-1: 1500/10000 kg (Own weight: 2000 kg, Depth: 100 cm)"
        );
    }
}
