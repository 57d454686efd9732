//! Simulation driver and program loading.
//!
//! Provides the loader that places a decoded program in memory and the
//! simulator that runs it through the pipeline.

/// Program image loader.
pub mod loader;

/// Top-level simulator and run loop.
pub mod simulator;

pub use simulator::Simulator;
