//! Workflow logic for building, proving against and verifying the DSC tree.

pub mod commands;
pub mod common;
mod stats;

pub use stats::BuildStats;
