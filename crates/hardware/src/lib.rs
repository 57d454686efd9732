//! MIPS pipeline simulator library.
//!
//! This crate implements a cycle-level simulator for a MIPS-like instruction subset
//! on a classic five-stage pipeline with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), register file, and memory.
//! 2. **Hazards:** Data-hazard stalls, operand forwarding, and branch/jump flushes.
//! 3. **ISA:** Register names, operand parsing, and mnemonic decoding for the supported set.
//! 4. **Simulation:** Loader, configuration, and statistics collection (cycles, CPI).

/// Common types and constants (registers, error taxonomy).
pub mod common;
/// Simulator configuration (defaults and JSON-deserializable structures).
pub mod config;
/// CPU core (register file, memory, ALU, pipeline).
pub mod core;
/// Instruction set (ABI names, operands, instructions, decoder).
pub mod isa;
/// Program loader and run loop.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Machine state: registers, memory and stats.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
