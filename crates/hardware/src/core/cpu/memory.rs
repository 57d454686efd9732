//! Flat word-addressable memory.
//!
//! This module implements the single memory array that holds both the program
//! image and data. It performs the following:
//! 1. **Alignment:** Every access must use a byte address that is a multiple of four.
//! 2. **Lazy Growth:** Stores past the end grow the array, zero filling the gap.
//! 3. **Boxed Instructions:** Program words hold decoded [`Instruction`] values
//!    rather than a binary encoding.

use crate::common::constants::{WORD_BYTES, WORD_SHIFT};
use crate::common::{Result, SimError};
use crate::isa::instruction::Instruction;

/// One memory word: plain data or a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Word {
    /// A 32-bit data value.
    Data(i32),
    /// An instruction of the program image.
    Instruction(Instruction),
}

impl Default for Word {
    fn default() -> Self {
        Self::Data(0)
    }
}

impl From<i32> for Word {
    fn from(value: i32) -> Self {
        Self::Data(value)
    }
}

impl From<Instruction> for Word {
    fn from(inst: Instruction) -> Self {
        Self::Instruction(inst)
    }
}

/// Flat memory array. Never shrinks.
#[derive(Clone, Debug)]
pub struct Memory {
    words: Vec<Word>,
    max_bytes: u32,
}

impl Memory {
    /// Creates a memory of `initial_bytes` (rounded down to whole words), zero filled.
    ///
    /// # Arguments
    ///
    /// * `initial_bytes` - Bytes allocated up front; reads within them succeed.
    /// * `max_bytes` - Stores at or beyond this address fault instead of growing.
    pub fn new(initial_bytes: u32, max_bytes: u32) -> Self {
        Self {
            words: vec![Word::default(); (initial_bytes >> WORD_SHIFT) as usize],
            max_bytes,
        }
    }

    /// Current allocated size in bytes.
    pub fn memory_size(&self) -> u32 {
        (self.words.len() as u32) << WORD_SHIFT
    }

    /// Converts an aligned byte address to a word index.
    fn index(addr: u32) -> Result<usize> {
        if addr % WORD_BYTES != 0 {
            return Err(SimError::MisalignedAccess { addr });
        }
        Ok((addr >> WORD_SHIFT) as usize)
    }

    /// Reads the word at a byte address.
    ///
    /// # Errors
    ///
    /// * [`SimError::MisalignedAccess`] - `addr` is not a multiple of four.
    /// * [`SimError::OutOfBounds`] - `addr` lies past the allocated region.
    pub fn read_word(&self, addr: u32) -> Result<Word> {
        let idx = Self::index(addr)?;
        self.words
            .get(idx)
            .copied()
            .ok_or(SimError::OutOfBounds { addr })
    }

    /// Reads a data word, as a load does.
    ///
    /// # Errors
    ///
    /// As [`Memory::read_word`], plus [`SimError::NotData`] if the word holds an
    /// instruction.
    pub fn read_data(&self, addr: u32) -> Result<i32> {
        match self.read_word(addr)? {
            Word::Data(value) => Ok(value),
            Word::Instruction(_) => Err(SimError::NotData { addr }),
        }
    }

    /// Fetches the instruction at `addr`.
    ///
    /// Returns `None` when `addr` lies outside allocated memory or holds data:
    /// the instruction stream is exhausted there.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MisalignedAccess`] for a misaligned program counter.
    pub fn fetch(&self, addr: u32) -> Result<Option<Instruction>> {
        let idx = Self::index(addr)?;
        Ok(match self.words.get(idx) {
            Some(Word::Instruction(inst)) => Some(*inst),
            _ => None,
        })
    }

    /// Writes a word, growing memory with zero fill if `addr` is past the end.
    ///
    /// # Errors
    ///
    /// * [`SimError::MisalignedAccess`] - `addr` is not a multiple of four.
    /// * [`SimError::OutOfBounds`] - `addr` is at or beyond the configured maximum.
    pub fn write_word(&mut self, addr: u32, value: impl Into<Word>) -> Result<()> {
        let idx = Self::index(addr)?;
        if addr >= self.max_bytes {
            return Err(SimError::OutOfBounds { addr });
        }
        if idx >= self.words.len() {
            self.words.resize(idx + 1, Word::default());
        }
        self.words[idx] = value.into();
        Ok(())
    }
}
