//! Shared test utilities.

/// Simulator wrapper used by the pipeline tests.
pub mod harness;
