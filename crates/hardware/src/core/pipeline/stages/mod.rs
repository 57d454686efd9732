//! Pipeline stage implementations.
//!
//! This module contains the callbacks for the five stages of the pipeline:
//! 1. **Fetch:** Reads the instruction at the PC.
//! 2. **Decode:** Runs the decode hook.
//! 3. **Execute:** ALU work and branch/jump resolution.
//! 4. **Memory:** Loads and stores.
//! 5. **Writeback:** Commits results to the register file.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
