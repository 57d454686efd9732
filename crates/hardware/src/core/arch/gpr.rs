//! MIPS General-Purpose Register File.
//!
//! This module implements the 32-entry integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 signed 32-bit registers (`$0`-`$31`).
//! 2. **Invariant Enforcement:** Register `$zero` always reads 0; writes to it are dropped.
//! 3. **Debugging:** Formats the complete register state with ABI names.

use std::fmt;

use crate::common::constants::NUM_REGS;
use crate::common::{Reg, Result};
use crate::isa::abi::ABI_NAMES;

/// General-Purpose Register file.
///
/// Only the write-back stage commits into this file. Forwarded values never
/// land here; they are supplied per read by the hazard unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. `$zero` always returns 0.
    #[inline(always)]
    pub fn read(&self, reg: Reg) -> i32 {
        if reg.is_zero() { 0 } else { self.regs[reg.idx()] }
    }

    /// Writes a register. Writes to `$zero` are silently discarded.
    #[inline(always)]
    pub fn write(&mut self, reg: Reg, val: i32) {
        if !reg.is_zero() {
            self.regs[reg.idx()] = val;
        }
    }

    /// Reads a register by raw index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`](crate::common::SimError::InvalidRegister)
    /// for an index outside `[0, 32)`.
    pub fn read_index(&self, idx: usize) -> Result<i32> {
        Reg::new(idx).map(|reg| self.read(reg))
    }

    /// Writes a register by raw index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`](crate::common::SimError::InvalidRegister)
    /// for an index outside `[0, 32)`.
    pub fn write_index(&mut self, idx: usize, val: i32) -> Result<()> {
        let reg = Reg::new(idx)?;
        self.write(reg, val);
        Ok(())
    }

    /// Returns a copy of all register values, `$zero` included.
    pub fn snapshot(&self) -> [i32; NUM_REGS] {
        self.regs
    }
}

impl fmt::Display for Gpr {
    /// Dumps registers four to a line with their ABI names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..NUM_REGS).step_by(4) {
            for i in row..row + 4 {
                write!(f, "${:<4}={:>11} ", ABI_NAMES[i], self.regs[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
