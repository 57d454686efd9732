//! Instruction variants and their stage semantics.
//!
//! Every supported instruction is a variant of the closed [`Instruction`] enum,
//! grouped by encoding shape:
//! 1. **R-type:** `add sub and or nor slt` (`rd <- rs OP rt`) and `jr rt`.
//! 2. **I-type:** `addi andi ori slti` (`rt <- rs OP imm`), the branches `beq bne`
//!    and the memory accesses `lw sw`.
//! 3. **J-type:** `j target`.
//!
//! Stage behaviour is an exhaustive `match` per stage, so adding a variant
//! without giving it execute and memory semantics does not compile.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{BRANCH_DISPLACEMENT_SHIFT, WORD_BYTES};
use crate::common::{Reg, Result};
use crate::core::arch::gpr::Gpr;
use crate::core::cpu::memory::Memory;
use crate::core::pipeline::hazards::Forwarding;
use crate::core::pipeline::latches::Stage;
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::operand::Operand;

/// Register-register operands: `rd <- rs OP rt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RType {
    /// Destination register.
    pub rd: Reg,
    /// First source register.
    pub rs: Reg,
    /// Second source register.
    pub rt: Reg,
}

/// Register-immediate operands: `rt <- rs OP immediate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IType {
    /// Destination register.
    pub rt: Reg,
    /// Source register.
    pub rs: Reg,
    /// Signed immediate.
    pub immediate: i32,
}

/// Conditional branch operands. The displacement counts words from the
/// instruction after the branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Branch {
    /// First compared register.
    pub rs: Reg,
    /// Second compared register.
    pub rt: Reg,
    /// Signed word displacement.
    pub displacement: i32,
}

/// Load/store operands: `rt` and the `immediate(base)` effective address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemAccess {
    /// Loaded-into (lw) or stored-from (sw) register.
    pub rt: Reg,
    /// Address displacement in bytes.
    pub immediate: i32,
    /// Address base register.
    pub base: Reg,
}

impl MemAccess {
    /// The effective address as an offset operand.
    pub fn address(&self) -> Operand {
        Operand::Offset {
            immediate: self.immediate,
            base: self.base,
        }
    }
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Instruction {
    /// `add rd, rs, rt`
    Add(RType),
    /// `sub rd, rs, rt`
    Sub(RType),
    /// `and rd, rs, rt`
    And(RType),
    /// `or rd, rs, rt`
    Or(RType),
    /// `nor rd, rs, rt`
    Nor(RType),
    /// `slt rd, rs, rt`
    Slt(RType),
    /// `jr rt`
    Jr {
        /// Register holding the jump target.
        rt: Reg,
    },
    /// `addi rt, rs, imm`
    AddI(IType),
    /// `andi rt, rs, imm`
    AndI(IType),
    /// `ori rt, rs, imm`
    OrI(IType),
    /// `slti rt, rs, imm`
    SltI(IType),
    /// `beq rs, rt, displacement`
    Beq(Branch),
    /// `bne rs, rt, displacement`
    Bne(Branch),
    /// `lw rt, imm(base)`
    Lw(MemAccess),
    /// `sw rt, imm(base)`
    Sw(MemAccess),
    /// `j target`
    J {
        /// Absolute byte address of the target.
        target: i32,
    },
}

/// Coarse instruction category, for the instruction-mix statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InstClass {
    /// Register or immediate arithmetic/logic.
    Alu,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    Branch,
    /// Unconditional jump.
    Jump,
}

/// What an instruction's execute step produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Nothing visible (not-taken branch, or work deferred to the memory stage).
    None,
    /// A value for the destination register.
    Value(i32),
    /// Control transfers to this byte address.
    Redirect(u32),
}

impl Instruction {
    /// Lower-case mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Sub(_) => "sub",
            Self::And(_) => "and",
            Self::Or(_) => "or",
            Self::Nor(_) => "nor",
            Self::Slt(_) => "slt",
            Self::Jr { .. } => "jr",
            Self::AddI(_) => "addi",
            Self::AndI(_) => "andi",
            Self::OrI(_) => "ori",
            Self::SltI(_) => "slti",
            Self::Beq(_) => "beq",
            Self::Bne(_) => "bne",
            Self::Lw(_) => "lw",
            Self::Sw(_) => "sw",
            Self::J { .. } => "j",
        }
    }

    /// Instruction-mix category.
    pub fn class(&self) -> InstClass {
        match self {
            Self::Add(_)
            | Self::Sub(_)
            | Self::And(_)
            | Self::Or(_)
            | Self::Nor(_)
            | Self::Slt(_)
            | Self::AddI(_)
            | Self::AndI(_)
            | Self::OrI(_)
            | Self::SltI(_) => InstClass::Alu,
            Self::Lw(_) => InstClass::Load,
            Self::Sw(_) => InstClass::Store,
            Self::Beq(_) | Self::Bne(_) => InstClass::Branch,
            Self::Jr { .. } | Self::J { .. } => InstClass::Jump,
        }
    }

    /// Operands read by this instruction, in order.
    ///
    /// A branch displacement is not a value operand and is not listed.
    pub fn sources(&self) -> impl Iterator<Item = Operand> + use<> {
        let pair: [Option<Operand>; 2] = match *self {
            Self::Add(r) | Self::Sub(r) | Self::And(r) | Self::Or(r) | Self::Nor(r) | Self::Slt(r) => {
                [Some(r.rs.into()), Some(r.rt.into())]
            }
            Self::AddI(i) | Self::AndI(i) | Self::OrI(i) | Self::SltI(i) => {
                [Some(i.rs.into()), Some(Operand::Immediate(i.immediate))]
            }
            Self::Beq(b) | Self::Bne(b) => [Some(b.rs.into()), Some(b.rt.into())],
            Self::Lw(m) => [Some(m.address()), None],
            Self::Sw(m) => [Some(m.rt.into()), Some(m.address())],
            Self::Jr { rt } => [Some(rt.into()), None],
            Self::J { target } => [Some(Operand::Immediate(target)), None],
        };
        pair.into_iter().flatten()
    }

    /// Registers read by this instruction, `$zero` excluded.
    pub fn source_regs(&self) -> impl Iterator<Item = Reg> + use<> {
        self.sources()
            .filter_map(|op| op.register())
            .filter(|reg| !reg.is_zero())
    }

    /// The single register this instruction writes, if any.
    pub fn destination(&self) -> Option<Reg> {
        match *self {
            Self::Add(r) | Self::Sub(r) | Self::And(r) | Self::Or(r) | Self::Nor(r) | Self::Slt(r) => {
                Some(r.rd)
            }
            Self::AddI(i) | Self::AndI(i) | Self::OrI(i) | Self::SltI(i) => Some(i.rt),
            Self::Lw(m) => Some(m.rt),
            Self::Sw(_) | Self::Beq(_) | Self::Bne(_) | Self::Jr { .. } | Self::J { .. } => None,
        }
    }

    /// Stage in which this instruction reads its source registers.
    ///
    /// Loads and stores compute their address in `memory`; everything else
    /// reads in `execute`.
    pub fn operand_stage(&self) -> Stage {
        match self {
            Self::Lw(_) | Self::Sw(_) => Stage::Memory,
            _ => Stage::Execute,
        }
    }

    /// The decode hook. No instruction in this set does work here.
    pub fn decode(&self) {}

    /// Runs the execute stage: ALU work, or branch/jump resolution.
    ///
    /// # Arguments
    ///
    /// * `pc` - Byte address of this instruction.
    /// * `regs` - Committed register file.
    /// * `fwd` - Values forwarded to this instruction for this call.
    pub fn execute(&self, pc: u32, regs: &Gpr, fwd: &Forwarding) -> ExecOutcome {
        let read = |reg: Reg| Operand::Register(reg).value(regs, fwd);
        let alu_r = |op: AluOp, r: RType| ExecOutcome::Value(Alu::execute(op, read(r.rs), read(r.rt)));
        let alu_i = |op: AluOp, i: IType| ExecOutcome::Value(Alu::execute(op, read(i.rs), i.immediate));
        let branch = |b: Branch, taken: bool| {
            if taken {
                let disp = b.displacement.wrapping_shl(BRANCH_DISPLACEMENT_SHIFT) as u32;
                ExecOutcome::Redirect(pc.wrapping_add(WORD_BYTES).wrapping_add(disp))
            } else {
                ExecOutcome::None
            }
        };

        match *self {
            Self::Add(r) => alu_r(AluOp::Add, r),
            Self::Sub(r) => alu_r(AluOp::Sub, r),
            Self::And(r) => alu_r(AluOp::And, r),
            Self::Or(r) => alu_r(AluOp::Or, r),
            Self::Nor(r) => alu_r(AluOp::Nor, r),
            Self::Slt(r) => alu_r(AluOp::Slt, r),
            Self::AddI(i) => alu_i(AluOp::Add, i),
            Self::AndI(i) => alu_i(AluOp::And, i),
            Self::OrI(i) => alu_i(AluOp::Or, i),
            Self::SltI(i) => alu_i(AluOp::Slt, i),
            Self::Beq(b) => branch(b, read(b.rs) == read(b.rt)),
            Self::Bne(b) => branch(b, read(b.rs) != read(b.rt)),
            Self::Jr { rt } => ExecOutcome::Redirect(read(rt) as u32),
            Self::J { target } => ExecOutcome::Redirect(target as u32),
            Self::Lw(_) | Self::Sw(_) => ExecOutcome::None,
        }
    }

    /// Runs the memory stage: loads return the loaded word, stores write memory.
    ///
    /// # Errors
    ///
    /// Propagates memory faults (misaligned, out of bounds, instruction word loaded
    /// as data).
    pub fn memory(&self, regs: &Gpr, fwd: &Forwarding, mem: &mut Memory) -> Result<Option<i32>> {
        match *self {
            Self::Lw(m) => {
                let addr = m.address().value(regs, fwd) as u32;
                mem.read_data(addr).map(Some)
            }
            Self::Sw(m) => {
                let addr = m.address().value(regs, fwd) as u32;
                let value = Operand::Register(m.rt).value(regs, fwd);
                mem.write_word(addr, value)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match self {
            Self::Add(r) | Self::Sub(r) | Self::And(r) | Self::Or(r) | Self::Nor(r) | Self::Slt(r) => {
                write!(f, "{m} {}, {}, {}", r.rd, r.rs, r.rt)
            }
            Self::AddI(i) | Self::AndI(i) | Self::OrI(i) | Self::SltI(i) => {
                write!(f, "{m} {}, {}, {}", i.rt, i.rs, i.immediate)
            }
            Self::Beq(b) | Self::Bne(b) => write!(f, "{m} {}, {}, {}", b.rs, b.rt, b.displacement),
            Self::Lw(a) | Self::Sw(a) => write!(f, "{m} {}, {}", a.rt, a.address()),
            Self::Jr { rt } => write!(f, "{m} {rt}"),
            Self::J { target } => write!(f, "{m} {:#x}", *target as u32),
        }
    }
}
