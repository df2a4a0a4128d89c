//! Declarative loading plans.
//!
//! A plan names a ship and an ordered list of containers, each with the cargo
//! loads to apply before boarding. Executing a plan never stops at the first
//! rule violation: every outcome is recorded in a [`PlanReport`] so callers
//! can show what was accepted and what was refused.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::container::{
    Container, ContainerFactory, ContainerKind, ContainerSpec, HazardLog, HazardNotice,
};
use crate::error::Result;
use crate::ship::{Ship, ShipSummary};

/// Ship parameters in a loading plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub name: String,
    pub max_containers: usize,
    pub max_weight: f64,
}

/// One container in a loading plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(flatten)]
    pub spec: ContainerSpec,
    /// Cargo weights loaded in order before boarding.
    #[serde(default)]
    pub loads: Vec<f64>,
    /// Whether to board the container once loaded.
    #[serde(default = "default_board")]
    pub board: bool,
}

fn default_board() -> bool {
    true
}

/// A ship and the containers to build, load and board onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingPlan {
    pub ship: ShipSpec,
    #[serde(default)]
    pub containers: Vec<PlanEntry>,
}

impl LoadingPlan {
    /// Load a plan from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a plan from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// The reference scenario: one hazardous liquid tank, one gas cylinder and
    /// one refrigerated fish container bound for the same ship.
    pub fn demo() -> Self {
        Self {
            ship: ShipSpec {
                name: "Titanic".to_string(),
                max_containers: 5,
                max_weight: 50_000.0,
            },
            containers: vec![
                PlanEntry {
                    spec: ContainerSpec::new(
                        ContainerKind::Liquid { hazardous: true },
                        10_000.0,
                        2_000.0,
                        300.0,
                    ),
                    loads: vec![5_000.0],
                    board: true,
                },
                PlanEntry {
                    spec: ContainerSpec::new(
                        ContainerKind::Gas { pressure: 100.0 },
                        1_500.0,
                        250.0,
                        5.0,
                    ),
                    loads: vec![3_000.0],
                    board: true,
                },
                PlanEntry {
                    spec: ContainerSpec::new(
                        ContainerKind::Refrigerated {
                            product: "Fish".to_string(),
                            temperature: 21.0,
                        },
                        1_800.0,
                        280.0,
                        20.0,
                    )
                    .with_tag("F"),
                    loads: vec![4_000.0],
                    board: true,
                },
            ],
        }
    }

    /// Run the plan with containers built by `factory`.
    ///
    /// Only an invalid ship aborts execution; container-level failures are
    /// recorded as steps.
    pub fn execute(&self, factory: &ContainerFactory) -> Result<PlanReport> {
        let mut ship = Ship::new(
            self.ship.name.clone(),
            self.ship.max_containers,
            self.ship.max_weight,
        )?;
        let mut steps = Vec::new();
        let mut ashore = Vec::new();
        let mut hazards = HazardLog::new();

        for (entry_index, entry) in self.containers.iter().enumerate() {
            let mut container = match factory.build(&entry.spec) {
                Ok(container) => container,
                Err(err) => {
                    warn!(entry = entry_index, error = %err, "container rejected at construction");
                    steps.push(PlanStep::BuildRejected {
                        entry: entry_index,
                        code: err.code().to_string(),
                        error: err.to_string(),
                    });
                    continue;
                }
            };
            let serial = container.serial().to_string();
            steps.push(PlanStep::Built {
                entry: entry_index,
                serial: serial.clone(),
                description: container.describe(),
            });

            for &weight in &entry.loads {
                steps.push(load_step(&mut container, weight, &mut hazards));
            }

            if !entry.board {
                ashore.push(container);
                continue;
            }

            match ship.board(container) {
                Ok(()) => steps.push(PlanStep::Boarded {
                    serial,
                    total_weight: ship.total_weight(),
                }),
                Err(rejected) => {
                    warn!(serial = %serial, error = %rejected.error, "boarding rejected");
                    steps.push(PlanStep::BoardingRejected {
                        serial,
                        code: rejected.error.code().to_string(),
                        error: rejected.error.to_string(),
                    });
                    ashore.push(rejected.container);
                }
            }
        }

        info!(
            ship = %ship.name(),
            boarded = ship.len(),
            ashore = ashore.len(),
            "loading plan finished"
        );

        Ok(PlanReport {
            steps,
            hazards: hazards.drain(),
            ship: ship.summary(),
            ashore,
        })
    }
}

fn load_step(container: &mut Container, weight: f64, hazards: &mut HazardLog) -> PlanStep {
    let serial = container.serial().to_string();
    match container.load_with(weight, hazards) {
        Ok(()) => PlanStep::Loaded {
            serial,
            weight,
            cargo_weight: container.cargo_weight(),
        },
        Err(err) => {
            warn!(serial = %serial, weight, error = %err, "load rejected");
            PlanStep::LoadRejected {
                serial,
                weight,
                code: err.code().to_string(),
                error: err.to_string(),
            }
        }
    }
}

/// Outcome of one action taken while executing a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanStep {
    Built {
        entry: usize,
        serial: String,
        description: String,
    },
    BuildRejected {
        entry: usize,
        code: String,
        error: String,
    },
    Loaded {
        serial: String,
        weight: f64,
        cargo_weight: f64,
    },
    LoadRejected {
        serial: String,
        weight: f64,
        code: String,
        error: String,
    },
    Boarded {
        serial: String,
        total_weight: f64,
    },
    BoardingRejected {
        serial: String,
        code: String,
        error: String,
    },
}

impl PlanStep {
    /// Whether this step records a refused action.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PlanStep::BuildRejected { .. }
                | PlanStep::LoadRejected { .. }
                | PlanStep::BoardingRejected { .. }
        )
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStep::Built { description, .. } => write!(f, "built {description}"),
            PlanStep::BuildRejected { entry, error, .. } => {
                write!(f, "entry #{entry} rejected: {error}")
            }
            PlanStep::Loaded {
                serial,
                weight,
                cargo_weight,
            } => write!(
                f,
                "{serial} loaded {weight} kg (cargo now {cargo_weight} kg)"
            ),
            PlanStep::LoadRejected { error, .. } => write!(f, "load rejected: {error}"),
            PlanStep::Boarded {
                serial,
                total_weight,
            } => write!(f, "{serial} boarded (ship total {total_weight} kg)"),
            PlanStep::BoardingRejected { error, .. } => write!(f, "boarding rejected: {error}"),
        }
    }
}

/// Everything that happened while executing a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub steps: Vec<PlanStep>,
    pub hazards: Vec<HazardNotice>,
    pub ship: ShipSummary,
    /// Containers built but not aboard: refused at boarding or never meant to board.
    pub ashore: Vec<Container>,
}

impl PlanReport {
    pub fn rejections(&self) -> impl Iterator<Item = &PlanStep> {
        self.steps.iter().filter(|step| step.is_rejection())
    }
}
