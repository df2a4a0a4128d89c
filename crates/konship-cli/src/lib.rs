//! konship CLI library.
//!
//! Command handlers, output formatting and terminal styling for the
//! `konship` binary.

pub mod commands;
pub mod output;
pub mod terminal;
