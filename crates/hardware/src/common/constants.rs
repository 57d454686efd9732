//! Global Simulator Constants.
//!
//! This module defines the fixed architectural parameters shared across the simulator:
//! 1. **Register File:** Register count and the hard-wired zero register.
//! 2. **Memory:** Word width and the conventional program load address.
//! 3. **Pipeline:** Stage count and fill/drain overhead.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Index of the hard-wired zero register (`$zero`, `$r0`).
pub const ZERO_REG: usize = 0;

/// Size of a memory word (and of every instruction) in bytes.
pub const WORD_BYTES: u32 = 4;

/// Shift converting a byte address to a word index.
pub const WORD_SHIFT: u32 = 2;

/// Conventional load address of the program image.
pub const DEFAULT_BASE_ADDRESS: u32 = 0x1000;

/// Number of pipeline stages (fetch, decode, execute, memory, write).
pub const PIPELINE_DEPTH: usize = 5;

/// Shift applied to a branch displacement to turn words into bytes.
pub const BRANCH_DISPLACEMENT_SHIFT: u32 = 2;
