//! Core processor implementation.
//!
//! This module contains the machine state (register file and memory), the
//! arithmetic unit, and the five-stage pipeline that drives them.

/// Architectural register state.
pub mod arch;

/// Machine state: registers, flat memory and run statistics.
pub mod cpu;

/// Instruction pipeline implementation (latches, engine, hazards, stages).
pub mod pipeline;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::Cpu;
