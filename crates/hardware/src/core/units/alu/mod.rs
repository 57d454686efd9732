//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. All
//! operations are 32-bit signed with wraparound; nothing here can fault.

use serde::Serialize;

/// Operation selected by the instruction variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise NOR.
    Nor,
    /// Set on signed less-than.
    Slt,
}

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand (`rs`)
    /// * `b`  - Second operand (`rt` or the immediate)
    ///
    /// # Examples
    ///
    /// ```
    /// use mipsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    /// assert_eq!(Alu::execute(AluOp::Nor, 0, 0), -1);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5, 10), 1);
    /// ```
    pub fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Nor => !(a | b),
            AluOp::Slt => i32::from(a < b),
        }
    }
}
