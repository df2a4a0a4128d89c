//! konship library entry points.
//!
//! This crate models cargo containers and the ships that carry them. It
//! exposes the container variants and their loading rules, the ship with its
//! count and weight ceilings, and declarative loading plans. Higher-level
//! consumers (the CLI) should only depend on the items exported here instead of
//! reimplementing the rules.

#![deny(warnings)]

pub mod container;
pub mod error;
pub mod plan;
pub mod ship;

pub use container::{
    Container, ContainerFactory, ContainerKind, ContainerSpec, HazardLog, HazardNotice,
    HazardNotifier, ProductCatalog, ProductRequirement, SerialNumber, SerialSequence,
    TracingNotifier,
};
pub use error::{Error, Result};
pub use plan::{LoadingPlan, PlanEntry, PlanReport, PlanStep, ShipSpec};
pub use ship::{BoardingRejected, Ship, ShipSummary};
