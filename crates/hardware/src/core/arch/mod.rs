//! Architectural state.
//!
//! The only architectural register state in this instruction set is the
//! general-purpose register file; there are no CSRs, FP registers or privilege modes.

/// General-Purpose Register file implementation.
pub mod gpr;
