//! MIPS register names.
//!
//! Resolves the register spellings an assembler front end hands over:
//! 1. **Canonical:** `r0`..`r31`, and bare indices such as `5`.
//! 2. **ABI:** The conventional MIPS calling-convention names (`zero`, `t0`, `sp`, ...).
//! 3. **User aliases:** Extra names registered at run time; an alias may point at
//!    another alias, and resolution follows the chain to a register.

use std::collections::HashMap;

use crate::common::constants::NUM_REGS;
use crate::common::{Reg, Result, SimError};

/// Register `$zero`, hard-wired to 0.
pub const REG_ZERO: usize = 0;
/// Register `$at`, assembler temporary.
pub const REG_AT: usize = 1;
/// Register `$v0`, first return value.
pub const REG_V0: usize = 2;
/// Register `$a0`, first argument.
pub const REG_A0: usize = 4;
/// Register `$t0`, first caller-saved temporary.
pub const REG_T0: usize = 8;
/// Register `$s0`, first callee-saved register.
pub const REG_S0: usize = 16;
/// Register `$sp`, stack pointer.
pub const REG_SP: usize = 29;
/// Register `$ra`, return address.
pub const REG_RA: usize = 31;

/// ABI names indexed by register number.
pub const ABI_NAMES: [&str; NUM_REGS] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", //
    "t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7", //
    "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", //
    "t8", "t9", "k0", "k1", "gp", "sp", "fp", "ra",
];

/// Register name table: built-in spellings plus user aliases.
#[derive(Clone, Debug, Default)]
pub struct RegisterNames {
    aliases: HashMap<String, String>,
}

impl RegisterNames {
    /// Creates a table holding only the built-in names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` as another spelling of `target`.
    ///
    /// `target` may itself be an alias. Re-aliasing an existing name replaces it.
    /// The chain is checked eagerly so a bad alias is reported where it is defined.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AliasCycle`] if the new alias would resolve to itself,
    /// or the resolution error of `target` if it names no register.
    pub fn alias(&mut self, name: impl Into<String>, target: impl Into<String>) -> Result<Reg> {
        let name = name.into();
        let previous = self.aliases.insert(name.clone(), target.into());
        match self.resolve(&name) {
            Ok(reg) => Ok(reg),
            Err(err) => {
                match previous {
                    Some(prev) => {
                        let _ = self.aliases.insert(name, prev);
                    }
                    None => {
                        let _ = self.aliases.remove(&name);
                    }
                }
                Err(err)
            }
        }
    }

    /// Resolves a register name (without the leading `$`) to its index.
    ///
    /// # Errors
    ///
    /// * [`SimError::AliasCycle`] - the alias chain loops.
    /// * [`SimError::InvalidRegister`] - a numeric spelling is 32 or above.
    /// * [`SimError::UnknownRegister`] - the name matches nothing.
    pub fn resolve(&self, name: &str) -> Result<Reg> {
        let mut current = name;
        let mut hops = 0;
        while let Some(next) = self.aliases.get(current) {
            hops += 1;
            if hops > self.aliases.len() {
                return Err(SimError::AliasCycle(name.to_string()));
            }
            current = next;
        }
        builtin(current).ok_or_else(|| SimError::UnknownRegister(name.to_string()))?
    }

    /// Returns the ABI name of a register.
    pub fn abi_name(reg: Reg) -> &'static str {
        ABI_NAMES[reg.idx()]
    }
}

/// Looks up a built-in spelling. `None` means the name is not a register at all;
/// `Some(Err(..))` means it is numeric but out of range.
fn builtin(name: &str) -> Option<Result<Reg>> {
    let numeric = name.strip_prefix('r').unwrap_or(name);
    if !numeric.is_empty() && numeric.bytes().all(|b| b.is_ascii_digit()) {
        return Some(
            numeric
                .parse::<usize>()
                .map_err(|_| SimError::UnknownRegister(name.to_string()))
                .and_then(Reg::new),
        );
    }
    if name == "s8" {
        return Some(Reg::new(30));
    }
    ABI_NAMES
        .iter()
        .position(|abi| *abi == name)
        .map(Reg::new)
}
