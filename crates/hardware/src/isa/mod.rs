//! Instruction Set Definitions.
//!
//! Contains the instruction model and the decoding front end for the supported
//! MIPS subset.
//!
//! # Modules
//!
//! * `abi`: Register names and user aliases.
//! * `operand`: Operand kinds, parsing and evaluation.
//! * `instruction`: The instruction variants and their stage semantics.
//! * `decode`: Mnemonic plus operands to instruction.

/// Register name mappings and aliases.
pub mod abi;

/// Mnemonic and operand decoding.
pub mod decode;

/// Instruction variants and per-stage behaviour.
pub mod instruction;

/// Instruction operands.
pub mod operand;
