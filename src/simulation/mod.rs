//! Reference driver for the tree: owns the bodies and the tree, runs
//! `rebuild → evaluate → integrate` once per step.
mod simulation_config;
mod simulator;
mod scenarios;
mod diagnostics;

pub use simulation_config::*;
pub use simulator::*;
pub use scenarios::*;
pub use diagnostics::*;

#[cfg(test)]
mod diagnostics_tests;
