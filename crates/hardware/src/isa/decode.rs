//! Instruction Decoder.
//!
//! This module turns a mnemonic plus parsed operands into an [`Instruction`].
//! It performs the following:
//! 1. **Lookup:** Maps the case-insensitive mnemonic to an operand shape.
//! 2. **Validation:** Checks the operand count, then each operand's kind.
//! 3. **Construction:** Builds the instruction variant from the validated operands.
//!
//! Programs arrive as [`SourceLine`] records (mnemonic plus operand tokens), the
//! output of an assembler front end; [`decode_program`] decodes a whole listing.

use serde::Deserialize;

use crate::common::{Reg, Result, SimError};
use crate::isa::abi::RegisterNames;
use crate::isa::instruction::{Branch, IType, Instruction, MemAccess, RType};
use crate::isa::operand::{Operand, OperandKind};

/// Operand shape of a mnemonic, with the variant constructor.
#[derive(Clone, Copy)]
enum Shape {
    /// `rd, rs, rt`
    R(fn(RType) -> Instruction),
    /// `rt, rs, imm`
    I(fn(IType) -> Instruction),
    /// `rs, rt, displacement`
    Branch(fn(Branch) -> Instruction),
    /// `rt, imm(base)`
    Mem(fn(MemAccess) -> Instruction),
    /// `rt`
    JumpReg,
    /// `target`
    Jump,
}

impl Shape {
    /// Operand kinds in order.
    fn kinds(self) -> &'static [OperandKind] {
        use OperandKind::{Immediate, Offset, Register};
        match self {
            Self::R(_) => &[Register, Register, Register],
            Self::I(_) | Self::Branch(_) => &[Register, Register, Immediate],
            Self::Mem(_) => &[Register, Offset],
            Self::JumpReg => &[Register],
            Self::Jump => &[Immediate],
        }
    }
}

/// Looks up the operand shape of a lower-case mnemonic.
fn shape(mnemonic: &str) -> Option<Shape> {
    Some(match mnemonic {
        "add" => Shape::R(Instruction::Add),
        "sub" => Shape::R(Instruction::Sub),
        "and" => Shape::R(Instruction::And),
        "or" => Shape::R(Instruction::Or),
        "nor" => Shape::R(Instruction::Nor),
        "slt" => Shape::R(Instruction::Slt),
        "jr" => Shape::JumpReg,
        "addi" => Shape::I(Instruction::AddI),
        "andi" => Shape::I(Instruction::AndI),
        "ori" => Shape::I(Instruction::OrI),
        "slti" => Shape::I(Instruction::SltI),
        "beq" => Shape::Branch(Instruction::Beq),
        "bne" => Shape::Branch(Instruction::Bne),
        "lw" => Shape::Mem(Instruction::Lw),
        "sw" => Shape::Mem(Instruction::Sw),
        "j" => Shape::Jump,
        _ => return None,
    })
}

/// Decodes one instruction from its mnemonic and parsed operands.
///
/// # Arguments
///
/// * `mnemonic` - Instruction name, matched case-insensitively.
/// * `operands` - Parsed operands in source order.
///
/// # Errors
///
/// * [`SimError::UnsupportedInstruction`] - unknown mnemonic.
/// * [`SimError::OperandCount`] - wrong number of operands.
/// * [`SimError::OperandKindMismatch`] - an operand of the wrong kind, reported
///   for the first offending position.
pub fn decode(mnemonic: &str, operands: &[Operand]) -> Result<Instruction> {
    let name = mnemonic.to_ascii_lowercase();
    let form = shape(&name).ok_or_else(|| SimError::UnsupportedInstruction(mnemonic.to_string()))?;

    let kinds = form.kinds();
    if operands.len() != kinds.len() {
        return Err(SimError::OperandCount {
            mnemonic: name,
            expected: kinds.len(),
            found: operands.len(),
        });
    }
    if let Some((position, (op, &expected))) = operands
        .iter()
        .zip(kinds)
        .enumerate()
        .find(|(_, (op, expected))| op.kind() != **expected)
    {
        return Err(SimError::OperandKindMismatch {
            mnemonic: name,
            position,
            expected,
            found: op.kind(),
        });
    }

    let reg = |i: usize| match operands[i] {
        Operand::Register(r) => r,
        _ => Reg::ZERO,
    };
    let imm = |i: usize| match operands[i] {
        Operand::Immediate(v) => v,
        _ => 0,
    };

    Ok(match form {
        Shape::R(build) => build(RType {
            rd: reg(0),
            rs: reg(1),
            rt: reg(2),
        }),
        Shape::I(build) => build(IType {
            rt: reg(0),
            rs: reg(1),
            immediate: imm(2),
        }),
        Shape::Branch(build) => build(Branch {
            rs: reg(0),
            rt: reg(1),
            displacement: imm(2),
        }),
        Shape::Mem(build) => {
            let (immediate, base) = match operands[1] {
                Operand::Offset { immediate, base } => (immediate, base),
                _ => (0, Reg::ZERO),
            };
            build(MemAccess {
                rt: reg(0),
                immediate,
                base,
            })
        }
        Shape::JumpReg => Instruction::Jr { rt: reg(0) },
        Shape::Jump => Instruction::J { target: imm(0) },
    })
}

/// One program record: a mnemonic and its unparsed operand tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceLine {
    /// Instruction name.
    pub mnemonic: String,
    /// Operand tokens, e.g. `["$t0", "4($sp)"]`.
    #[serde(default)]
    pub operands: Vec<String>,
}

impl SourceLine {
    /// Builds a record from a mnemonic and operand tokens.
    pub fn new<S: AsRef<str>>(mnemonic: impl Into<String>, operands: &[S]) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            operands: operands.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }
}

/// Parses the operand tokens of a record and decodes it.
///
/// # Errors
///
/// Operand parse errors ([`Operand::parse`]) or decode errors ([`decode`]).
pub fn decode_tokens(line: &SourceLine, names: &RegisterNames) -> Result<Instruction> {
    let operands = line
        .operands
        .iter()
        .map(|token| Operand::parse(token, names))
        .collect::<Result<Vec<_>>>()?;
    decode(&line.mnemonic, &operands)
}

/// Decodes a whole program, stopping at the first bad record.
///
/// # Errors
///
/// [`SimError::Line`] carrying the zero-based index of the failing record.
pub fn decode_program(lines: &[SourceLine], names: &RegisterNames) -> Result<Vec<Instruction>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| decode_tokens(line, names).map_err(|err| err.on_line(i)))
        .collect()
}
