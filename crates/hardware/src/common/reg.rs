//! Register index type.
//!
//! `Reg` is a validated general-purpose register index. Construction is the only
//! place the `[0, 32)` bound is checked, so every `Reg` held by an operand or an
//! instruction is known to address a real register.

use std::fmt;

use serde::Serialize;

use super::constants::{NUM_REGS, ZERO_REG};
use super::error::{Result, SimError};

/// A general-purpose register index in `[0, 32)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Reg(u8);

impl Reg {
    /// The hard-wired zero register.
    pub const ZERO: Self = Self(0);

    /// Creates a register index, rejecting anything outside `[0, 32)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] when `idx >= 32`.
    pub fn new(idx: usize) -> Result<Self> {
        if idx < NUM_REGS {
            Ok(Self(idx as u8))
        } else {
            Err(SimError::InvalidRegister(idx))
        }
    }

    /// Returns the raw index.
    #[inline(always)]
    pub fn idx(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the hard-wired zero register.
    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.idx() == ZERO_REG
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
