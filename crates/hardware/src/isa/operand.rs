//! Instruction operands.
//!
//! An operand is one of three addressing modes:
//! 1. **Register:** `$t0`, `$r8`, `$8`.
//! 2. **Immediate:** Signed decimal (`-12`) or hexadecimal (`0x1000`) constant.
//! 3. **Offset:** `imm(base)`, an immediate displacement from a base register.
//!
//! Operands are immutable. Reading one goes through an explicit [`Forwarding`]
//! context so the hazard unit can substitute an in-flight value for a register
//! without the instruction semantics knowing about it.

use std::fmt;

use serde::Serialize;

use crate::common::{Reg, Result, SimError};
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::Forwarding;
use crate::isa::abi::RegisterNames;

/// The addressing mode of an operand, used in decode diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OperandKind {
    /// A register reference.
    Register,
    /// An immediate constant.
    Immediate,
    /// A displacement from a base register.
    Offset,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Register => "register",
            Self::Immediate => "immediate",
            Self::Offset => "offset",
        };
        f.write_str(s)
    }
}

/// An instruction operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// A general-purpose register.
    Register(Reg),
    /// A signed 32-bit constant.
    Immediate(i32),
    /// `immediate(base)`: the value is `immediate + base`.
    Offset {
        /// Signed displacement.
        immediate: i32,
        /// Base register.
        base: Reg,
    },
}

impl Operand {
    /// Returns the addressing mode.
    pub fn kind(&self) -> OperandKind {
        match self {
            Self::Register(_) => OperandKind::Register,
            Self::Immediate(_) => OperandKind::Immediate,
            Self::Offset { .. } => OperandKind::Offset,
        }
    }

    /// Returns the register this operand reads, if any.
    ///
    /// For an offset this is the base register.
    pub fn register(&self) -> Option<Reg> {
        match *self {
            Self::Register(reg) | Self::Offset { base: reg, .. } => Some(reg),
            Self::Immediate(_) => None,
        }
    }

    /// Reads the operand's current value.
    ///
    /// A register read returns the forwarded value when `fwd` holds one for
    /// that register, and the committed register file cell otherwise.
    ///
    /// # Arguments
    ///
    /// * `regs` - The committed register file.
    /// * `fwd` - Forwarded values valid for this single read.
    pub fn value(&self, regs: &Gpr, fwd: &Forwarding) -> i32 {
        match *self {
            Self::Register(reg) => fwd.get(reg).unwrap_or_else(|| regs.read(reg)),
            Self::Immediate(value) => value,
            Self::Offset { immediate, base } => {
                let base = fwd.get(base).unwrap_or_else(|| regs.read(base));
                immediate.wrapping_add(base)
            }
        }
    }

    /// Writes `value` into the register this operand names.
    ///
    /// # Errors
    ///
    /// Immediates and offsets are not writable; they report
    /// [`SimError::InvalidOperand`].
    pub fn write(&self, regs: &mut Gpr, value: i32) -> Result<()> {
        match *self {
            Self::Register(reg) => {
                regs.write(reg, value);
                Ok(())
            }
            _ => Err(SimError::InvalidOperand(format!(
                "cannot write to {} operand {self}",
                self.kind()
            ))),
        }
    }

    /// Parses one operand token as produced by an assembler front end.
    ///
    /// Accepted forms are `$name`, signed decimal, `0x` hexadecimal, and
    /// `imm(base)` where base is a register or a hexadecimal address. The
    /// address form folds into the displacement with `$zero` as the base.
    ///
    /// # Errors
    ///
    /// * [`SimError::InvalidOperand`] - the token has none of the accepted forms.
    /// * Register resolution errors from [`RegisterNames::resolve`].
    pub fn parse(token: &str, names: &RegisterNames) -> Result<Self> {
        let token = token.trim();
        if let Some(name) = token.strip_prefix('$') {
            return names.resolve(name).map(Self::Register);
        }
        if let Some((disp, rest)) = token.split_once('(') {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| SimError::InvalidOperand(token.to_string()))?
                .trim();
            let disp = disp.trim();
            let immediate = if disp.is_empty() {
                0
            } else {
                parse_integer(disp).ok_or_else(|| SimError::InvalidOperand(token.to_string()))?
            };
            if let Some(name) = inner.strip_prefix('$') {
                let base = names.resolve(name)?;
                return Ok(Self::Offset { immediate, base });
            }
            let address =
                parse_integer(inner).ok_or_else(|| SimError::InvalidOperand(token.to_string()))?;
            return Ok(Self::Offset {
                immediate: immediate.wrapping_add(address),
                base: Reg::ZERO,
            });
        }
        parse_integer(token)
            .map(Self::Immediate)
            .ok_or_else(|| SimError::InvalidOperand(token.to_string()))
    }
}

/// Parses a signed decimal or `0x` hexadecimal literal into a 32-bit word.
///
/// Hex literals cover the full unsigned range and wrap, so `0xffffffff` is `-1`.
fn parse_integer(text: &str) -> Option<i32> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).ok()? as i32
    } else {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let wide: i64 = digits.parse().ok()?;
        let wide = if negative { -wide } else { wide };
        return i32::try_from(wide).ok();
    };
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Self::Register(reg)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{reg}"),
            Self::Immediate(value) => write!(f, "{value}"),
            Self::Offset { immediate, base } => write!(f, "{immediate}({base})"),
        }
    }
}
