//! Ships and the containers boarded onto them.
//!
//! A ship enforces two ceilings when a container boards: a maximum container
//! count and a maximum aggregate weight (own + cargo across every container).
//!
//! The weight ceiling is checked against the container's cargo at the moment
//! it boards. Mutating a boarded container through
//! [`Ship::container_mut`] is not re-validated against the ship; use
//! [`Ship::load_aboard`] when the fleet ceiling must keep holding.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::container::{Container, HazardNotifier};
use crate::error::{Error, Result};

/// A boarding attempt that failed, handing the container back to the caller.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct BoardingRejected {
    pub container: Container,
    #[source]
    pub error: Error,
}

impl From<BoardingRejected> for Error {
    fn from(rejected: BoardingRejected) -> Self {
        rejected.error
    }
}

/// A ship carrying containers in boarding order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    name: String,
    max_containers: usize,
    max_weight: f64,
    containers: Vec<Container>,
}

impl Ship {
    /// Create an empty ship.
    pub fn new(name: impl Into<String>, max_containers: usize, max_weight: f64) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidShip {
                message: "ship name must not be empty".to_string(),
            });
        }
        if !max_weight.is_finite() || max_weight < 0.0 {
            return Err(Error::InvalidShip {
                message: "max_weight must be a finite non-negative number".to_string(),
            });
        }

        Ok(Self {
            name,
            max_containers,
            max_weight,
            containers: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_containers(&self) -> usize {
        self.max_containers
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Boarded containers in boarding order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Sum of own weight plus cargo weight over every boarded container.
    pub fn total_weight(&self) -> f64 {
        self.containers.iter().map(Container::gross_weight).sum()
    }

    /// Check whether `container` could board right now without boarding it.
    pub fn check_boarding(&self, container: &Container) -> Result<()> {
        if self.containers.len() >= self.max_containers {
            return Err(Error::FleetFull {
                ship: self.name.clone(),
                max_containers: self.max_containers,
            });
        }

        let attempted = self.total_weight() + container.gross_weight();
        if attempted > self.max_weight {
            return Err(Error::OverweightFleet {
                ship: self.name.clone(),
                attempted,
                max_weight: self.max_weight,
            });
        }

        Ok(())
    }

    /// Board a container, appending it to the boarding order.
    ///
    /// On failure the ship is unchanged and the container is returned inside
    /// the [`BoardingRejected`].
    #[allow(clippy::result_large_err)]
    pub fn board(&mut self, container: Container) -> std::result::Result<(), BoardingRejected> {
        if let Err(error) = self.check_boarding(&container) {
            return Err(BoardingRejected { container, error });
        }

        info!(
            ship = %self.name,
            serial = %container.serial(),
            gross_weight = container.gross_weight(),
            "container boarded"
        );
        self.containers.push(container);
        Ok(())
    }

    /// Remove every container whose serial matches, returning them.
    ///
    /// Serials are compared as exact strings; one that matches nothing is a no-op.
    pub fn disembark(&mut self, serial: &str) -> Vec<Container> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.containers)
            .into_iter()
            .partition(|c| c.serial().to_string() == serial);
        self.containers = kept;

        for container in &removed {
            info!(ship = %self.name, serial = %container.serial(), "container disembarked");
        }
        removed
    }

    pub fn container(&self, serial: &str) -> Option<&Container> {
        let index = self.position(serial)?;
        self.containers.get(index)
    }

    /// Mutable access to a boarded container.
    ///
    /// Loads made through this reference are not checked against the ship's
    /// weight ceiling.
    pub fn container_mut(&mut self, serial: &str) -> Option<&mut Container> {
        let index = self.position(serial)?;
        self.containers.get_mut(index)
    }

    /// Load cargo into a boarded container, keeping the ship within `max_weight`.
    ///
    /// The container must be aboard. The fleet ceiling is then checked before
    /// the container's own rules run, so a load refused by the ship raises no
    /// hazard notice.
    pub fn load_aboard(
        &mut self,
        serial: &str,
        weight: f64,
        notifier: &mut dyn HazardNotifier,
    ) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { weight });
        }
        let index = self.position(serial).ok_or_else(|| Error::NotAboard {
            ship: self.name.clone(),
            serial: serial.to_string(),
        })?;

        let attempted = self.total_weight() + weight;
        if attempted > self.max_weight {
            return Err(Error::OverweightFleet {
                ship: self.name.clone(),
                attempted,
                max_weight: self.max_weight,
            });
        }

        self.containers[index].load_with(weight, notifier)
    }

    /// Unload a boarded container.
    pub fn unload_aboard(&mut self, serial: &str) -> Result<()> {
        let index = self.position(serial).ok_or_else(|| Error::NotAboard {
            ship: self.name.clone(),
            serial: serial.to_string(),
        })?;
        self.containers[index].unload();
        debug!(ship = %self.name, serial, "unloaded container aboard");
        Ok(())
    }

    /// Index of the boarded container whose serial is exactly `serial`.
    fn position(&self, serial: &str) -> Option<usize> {
        self.containers
            .iter()
            .position(|c| c.serial().to_string() == serial)
    }

    /// Human-readable summary of occupancy and weight utilisation.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Structured snapshot of the ship for serialisation.
    pub fn summary(&self) -> ShipSummary {
        ShipSummary::from_ship(self)
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {}: {}/{} containers, {}/{} kg",
            self.name,
            self.containers.len(),
            self.max_containers,
            self.total_weight(),
            self.max_weight
        )
    }
}

/// Serialisable view of a ship and its manifest.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShipSummary {
    pub name: String,
    pub container_count: usize,
    pub max_containers: usize,
    pub total_weight: f64,
    pub max_weight: f64,
    /// Fraction of `max_weight` in use; 0 when the ship has no weight allowance.
    pub weight_utilization: f64,
    pub description: String,
    pub containers: Vec<Container>,
}

impl ShipSummary {
    pub fn from_ship(ship: &Ship) -> Self {
        let total_weight = ship.total_weight();
        let weight_utilization = if ship.max_weight > 0.0 {
            total_weight / ship.max_weight
        } else {
            0.0
        };

        Self {
            name: ship.name.clone(),
            container_count: ship.len(),
            max_containers: ship.max_containers,
            total_weight,
            max_weight: ship.max_weight,
            weight_utilization,
            description: ship.describe(),
            containers: ship.containers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerFactory, HazardLog};

    #[test]
    fn rejects_invalid_ship_parameters() {
        assert!(matches!(Ship::new("  ", 1, 10.0), Err(Error::InvalidShip { .. })));
        assert!(matches!(
            Ship::new("Aurora", 1, f64::NAN),
            Err(Error::InvalidShip { .. })
        ));
    }

    #[test]
    fn rejected_boarding_returns_the_container() {
        let factory = ContainerFactory::isolated();
        let mut ship = Ship::new("Aurora", 5, 1_000.0).expect("valid ship");
        let mut heavy = factory.standard(2_000.0, 500.0, 10.0).expect("valid");
        heavy.load(600.0).expect("fits");

        let rejected = ship.board(heavy).expect_err("too heavy");
        assert!(matches!(rejected.error, Error::OverweightFleet { .. }));
        assert_eq!(rejected.container.cargo_weight(), 600.0);
        assert!(ship.is_empty());
    }

    #[test]
    fn load_aboard_respects_fleet_ceiling() {
        let factory = ContainerFactory::isolated();
        let mut ship = Ship::new("Aurora", 5, 1_000.0).expect("valid ship");
        let c = factory.standard(2_000.0, 500.0, 10.0).expect("valid");
        let serial = c.serial().to_string();
        ship.board(c).expect("boards");

        let mut log = HazardLog::new();
        ship.load_aboard(&serial, 400.0, &mut log).expect("within ceiling");
        let err = ship
            .load_aboard(&serial, 200.0, &mut log)
            .expect_err("fleet ceiling");
        assert!(matches!(err, Error::OverweightFleet { .. }));
        assert_eq!(ship.total_weight(), 900.0);

        assert!(matches!(
            ship.load_aboard("KON-S-99", 1.0, &mut log),
            Err(Error::NotAboard { .. })
        ));
    }

    #[test]
    fn load_aboard_reports_missing_container_before_weight() {
        let mut ship = Ship::new("Aurora", 5, 1_000.0).expect("valid ship");
        let mut log = HazardLog::new();
        let err = ship
            .load_aboard("KON-S-1", 50_000.0, &mut log)
            .expect_err("nothing aboard");
        assert!(matches!(err, Error::NotAboard { .. }));
        assert_eq!(err.code(), "not_aboard");
    }

    #[test]
    fn serial_lookups_require_the_exact_spelling() {
        let factory = ContainerFactory::isolated();
        let mut ship = Ship::new("Aurora", 5, 10_000.0).expect("valid ship");
        ship.board(factory.standard(500.0, 100.0, 1.0).expect("valid"))
            .expect("boards");

        for lookalike in ["kon-S-1", "KON-S-+01", "KON-S-01", " KON-S-1"] {
            assert!(ship.container(lookalike).is_none());
            assert!(ship.disembark(lookalike).is_empty());
        }
        assert_eq!(ship.len(), 1);
        assert!(ship.container("KON-S-1").is_some());
        assert_eq!(ship.disembark("KON-S-1").len(), 1);
    }

    #[test]
    fn container_mut_loads_bypass_fleet_ceiling() {
        let factory = ContainerFactory::isolated();
        let mut ship = Ship::new("Aurora", 5, 1_000.0).expect("valid ship");
        let c = factory.standard(2_000.0, 500.0, 10.0).expect("valid");
        let serial = c.serial().to_string();
        ship.board(c).expect("boards");

        ship.container_mut(&serial)
            .expect("aboard")
            .load(1_000.0)
            .expect("container has room");
        assert!(ship.total_weight() > ship.max_weight());
    }

    #[test]
    fn summary_reports_utilisation() {
        let factory = ContainerFactory::isolated();
        let mut ship = Ship::new("Aurora", 2, 1_000.0).expect("valid ship");
        ship.board(factory.standard(500.0, 250.0, 1.0).expect("valid"))
            .expect("boards");

        let summary = ship.summary();
        assert_eq!(summary.container_count, 1);
        assert_eq!(summary.weight_utilization, 0.25);
        assert_eq!(
            summary.description,
            "Ship Aurora: 1/2 containers, 250/1000 kg"
        );
    }
}
