//! Containers, their variants, and the rules governing how they accept cargo.
//!
//! This module is organized into focused submodules:
//!
//! - [`model`] - The container type and its load/unload accounting
//! - [`kind`] - The container variants and their per-variant rules
//! - [`factory`] - Validated construction and serial assignment
//! - [`serial`] - Serial numbers and the shared sequence
//! - [`products`] - Refrigerated product catalog
//! - [`hazard`] - Hazard notification sinks
//! - [`constants`] - Shared ratios and prefixes
//!
//! # Example
//!
//! ```
//! use konship_lib::container::{ContainerFactory, HazardLog};
//!
//! let factory = ContainerFactory::new();
//! let mut tank = factory.liquid(10_000.0, 0.0, 300.0, true).unwrap();
//!
//! let mut log = HazardLog::new();
//! tank.load_with(5_001.0, &mut log).unwrap();
//!
//! assert_eq!(tank.cargo_weight(), 5_001.0);
//! assert_eq!(log.notices().len(), 1);
//! ```

pub mod constants;
pub mod factory;
pub mod hazard;
pub mod kind;
pub mod model;
pub mod products;
pub mod serial;

pub use constants::{GAS_RESIDUE_RATIO, HAZARDOUS_FILL_RATIO, STANDARD_FILL_RATIO};
pub use factory::{ContainerFactory, ContainerSpec};
pub use hazard::{HazardLog, HazardNotice, HazardNotifier, TracingNotifier};
pub use kind::ContainerKind;
pub use model::Container;
pub use products::{ProductCatalog, ProductRequirement};
pub use serial::{SerialNumber, SerialSequence};
