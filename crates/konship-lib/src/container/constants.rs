//! Container-related constants used across the loading rules.

/// Fraction of `max_load` a hazardous liquid may reach before a hazard notice is raised.
pub const HAZARDOUS_FILL_RATIO: f64 = 0.5;

/// Fraction of `max_load` a non-hazardous liquid may reach before a hazard notice is raised.
pub const STANDARD_FILL_RATIO: f64 = 0.9;

/// Fraction of the cargo weight a gas container retains after unloading.
///
/// Pressurised containers cannot be fully purged, so a residue stays behind.
pub const GAS_RESIDUE_RATIO: f64 = 0.05;

/// Prefix shared by every container serial number.
pub const SERIAL_PREFIX: &str = "KON";

/// First value handed out by a fresh serial sequence.
pub const FIRST_SEQUENCE: u64 = 1;
