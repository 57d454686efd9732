//! Simulator error taxonomy.
//!
//! Every fault in this simulator is a programming or input error rather than a
//! transient condition, so nothing here is retried. Errors fall into three groups:
//! 1. **Decode-time:** Unsupported mnemonics, malformed operand tokens, wrong operand
//!    kinds or counts. Raised before simulation begins.
//! 2. **Machine faults:** Invalid registers, misaligned or out-of-bounds memory
//!    accesses. Raised from a stage callback and wrapped with the failing
//!    instruction in [`SimError::Execution`].
//! 3. **Run control:** No program loaded, cycle limit exceeded, CPI of an empty run.

use thiserror::Error;

use crate::isa::operand::OperandKind;

/// Result alias used throughout the crate.
pub type Result<T, E = SimError> = std::result::Result<T, E>;

/// Errors raised while decoding or simulating a program.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Register index outside `[0, 32)`.
    #[error("invalid register index {0} (expected 0..32)")]
    InvalidRegister(usize),

    /// Register name that resolves to no register.
    #[error("${0} does not name a register")]
    UnknownRegister(String),

    /// Register alias chain that loops back on itself.
    #[error("register alias ${0} resolves to itself")]
    AliasCycle(String),

    /// Word access at a byte address that is not a multiple of four.
    #[error("misaligned word access at {addr:#x}")]
    MisalignedAccess {
        /// Faulting byte address.
        addr: u32,
    },

    /// Access beyond the allocated (reads) or permitted (writes) memory.
    #[error("memory access out of bounds at {addr:#x}")]
    OutOfBounds {
        /// Faulting byte address.
        addr: u32,
    },

    /// Data load from a word that holds part of the program image.
    #[error("word at {addr:#x} holds an instruction, not data")]
    NotData {
        /// Byte address of the instruction word.
        addr: u32,
    },

    /// Mnemonic missing from the decoder table.
    #[error("the `{0}` instruction is not supported")]
    UnsupportedInstruction(String),

    /// Operand of the wrong kind for its position.
    #[error("`{mnemonic}` operand {position}: expected {expected}, found {found}")]
    OperandKindMismatch {
        /// Mnemonic being decoded.
        mnemonic: String,
        /// Zero-based operand position.
        position: usize,
        /// Kind the instruction requires at this position.
        expected: OperandKind,
        /// Kind that was supplied.
        found: OperandKind,
    },

    /// Wrong number of operands for the mnemonic.
    #[error("`{mnemonic}` takes {expected} operand(s), found {found}")]
    OperandCount {
        /// Mnemonic being decoded.
        mnemonic: String,
        /// Operand count the instruction requires.
        expected: usize,
        /// Operand count that was supplied.
        found: usize,
    },

    /// Operand token that is none of register, integer, hex or offset.
    #[error("malformed operand `{0}`")]
    InvalidOperand(String),

    /// Decode failure on a specific program line.
    #[error("line {line}: {source}")]
    Line {
        /// Zero-based index of the failing record.
        line: usize,
        /// Underlying decode error.
        #[source]
        source: Box<SimError>,
    },

    /// Fault raised by a stage callback while an instruction was in flight.
    #[error("{source} (while executing `{inst}` at {pc:#x})")]
    Execution {
        /// Address of the failing instruction.
        pc: u32,
        /// Disassembly of the failing instruction.
        inst: String,
        /// Underlying machine fault.
        #[source]
        source: Box<SimError>,
    },

    /// `run` called before `load`.
    #[error("no instructions have been loaded")]
    NoProgram,

    /// CPI requested for a run that retired nothing.
    #[error("no instructions executed, CPI is undefined")]
    NoInstructions,

    /// Run exceeded the configured cycle budget.
    #[error("cycle limit of {0} exceeded")]
    CycleLimitExceeded(u64),
}

impl SimError {
    /// Wraps this error with the address and text of the instruction that raised it.
    pub fn in_instruction(self, pc: u32, inst: impl ToString) -> Self {
        Self::Execution {
            pc,
            inst: inst.to_string(),
            source: Box::new(self),
        }
    }

    /// Wraps this error with the index of the program line that raised it.
    pub fn on_line(self, line: usize) -> Self {
        Self::Line {
            line,
            source: Box::new(self),
        }
    }
}
