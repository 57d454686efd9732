//! # Simulation Tests

/// Whole-run results: registers, counts, CPI.
pub mod simulator;

/// Cycle counts for hazard-free and hazard-bearing sequences.
pub mod timing;
