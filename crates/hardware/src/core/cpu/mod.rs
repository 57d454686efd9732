//! CPU Machine State.
//!
//! This module defines the `Cpu` structure, the storage the pipeline operates on:
//! 1. **Registers:** The 32-entry general-purpose register file.
//! 2. **Memory:** The flat word-addressable array holding program and data.
//! 3. **Statistics:** Cycle, instruction and hazard counters for the current run.
//!
//! `Cpu` owns no pipeline logic. All timing lives in
//! [`Pipeline`](crate::core::pipeline::engine::Pipeline).

/// Flat word-addressable memory.
pub mod memory;

use crate::common::Result;
use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::stats::SimStats;

pub use self::memory::{Memory, Word};

/// Machine state: registers, memory and run statistics.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Program and data memory.
    pub memory: Memory,
    /// Counters for the current run.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates zeroed machine state sized by `config.memory`.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            memory: Memory::new(config.memory.initial_bytes, config.memory.max_bytes),
            stats: SimStats::default(),
        }
    }

    /// Reads register `idx`; register 0 always reads 0.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegister` for an index outside `[0, 32)`.
    pub fn read_register(&self, idx: usize) -> Result<i32> {
        self.regs.read_index(idx)
    }

    /// Writes register `idx`; writes to register 0 are discarded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegister` for an index outside `[0, 32)`.
    pub fn write_register(&mut self, idx: usize, value: i32) -> Result<()> {
        self.regs.write_index(idx, value)
    }

    /// Reads the word at byte address `addr`.
    ///
    /// # Errors
    ///
    /// `MisalignedAccess` or `OutOfBounds`, see [`Memory::read_word`].
    pub fn read_word(&self, addr: u32) -> Result<Word> {
        self.memory.read_word(addr)
    }

    /// Writes a data value or an instruction at byte address `addr`.
    ///
    /// # Errors
    ///
    /// `MisalignedAccess` or `OutOfBounds`, see [`Memory::write_word`].
    pub fn write_word(&mut self, addr: u32, value: impl Into<Word>) -> Result<()> {
        self.memory.write_word(addr, value)
    }

    /// Current allocated memory size in bytes.
    pub fn memory_size(&self) -> u32 {
        self.memory.memory_size()
    }
}
