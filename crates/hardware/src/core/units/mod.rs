//! Execution units.
//!
//! The only functional unit this instruction set needs is the integer ALU;
//! branches compare through it and loads/stores compute addresses with its add.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;
