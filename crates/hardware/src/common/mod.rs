//! Common types and constants used throughout the simulator.
//!
//! This module provides the building blocks shared by the ISA, the machine state
//! and the pipeline:
//! 1. **Constants:** Register count, word size, base address, pipeline depth.
//! 2. **Error Handling:** The crate-wide [`SimError`] taxonomy.
//! 3. **Register Indices:** The validated [`Reg`] index type.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error taxonomy for decode and simulation faults.
pub mod error;

/// Validated register index type.
pub mod reg;

pub use error::{Result, SimError};
pub use reg::Reg;
