//! Instruction pipeline implementation.
//!
//! This module contains the five-stage pipeline. It includes the following components:
//! 1. **Latches:** Per-stage slots and produced results.
//! 2. **Engine:** The per-cycle advance/stall/flush state machine.
//! 3. **Hazards:** Data hazard detection and operand forwarding.
//! 4. **Stages:** Fetch, Decode, Execute, Memory and Writeback callbacks.

/// Per-cycle pipeline state machine.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Per-stage slots and results.
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

pub use engine::Pipeline;
pub use latches::Stage;
