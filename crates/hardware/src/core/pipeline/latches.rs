//! Pipeline slot set.
//!
//! This module defines the per-stage bookkeeping of the five-stage pipeline:
//! 1. **Stages:** The linearly ordered stage names `fetch < decode < execute < memory < write`.
//! 2. **Slots:** Which in-flight instruction (if any) occupies each stage this cycle.
//! 3. **Results:** The `(destination, value)` pair most recently produced for each stage,
//!    read by the hazard unit for forwarding and by write-back for the commit.
//!
//! A result travels with its instruction: shifting a slot forward moves its result too.

use std::fmt;

use serde::Serialize;

use crate::common::Reg;
use crate::common::constants::PIPELINE_DEPTH;
use crate::isa::instruction::Instruction;

/// A pipeline stage, ordered from fetch (earliest) to write (latest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Instruction decode.
    Decode,
    /// ALU work and branch resolution.
    Execute,
    /// Loads and stores.
    Memory,
    /// Register write-back.
    Write,
}

impl Stage {
    /// All stages, fetch first.
    pub const ALL: [Self; PIPELINE_DEPTH] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Write,
    ];

    /// Position in [`Stage::ALL`].
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Execute => "execute",
            Self::Memory => "memory",
            Self::Write => "write",
        }
    }

    /// The stage an instruction moves to next, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The stage an instruction arrives from, if any.
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Stages strictly after this one, nearest first.
    pub fn later(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().skip(self.index() + 1)
    }

    /// Stages strictly before this one, fetch first.
    pub fn earlier(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().take(self.index())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An instruction in flight, tagged with the address it was fetched from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InFlight {
    /// Byte address of the instruction.
    pub pc: u32,
    /// The instruction.
    pub inst: Instruction,
}

/// A value produced for a destination register, not yet committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StageResult {
    /// Register the value is destined for.
    pub dest: Reg,
    /// The value.
    pub value: i32,
}

/// Slot and result records keyed by stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    slots: [Option<InFlight>; PIPELINE_DEPTH],
    results: [Option<StageResult>; PIPELINE_DEPTH],
}

impl Latches {
    /// The instruction occupying `stage`.
    #[inline(always)]
    pub fn occupant(&self, stage: Stage) -> Option<InFlight> {
        self.slots[stage.index()]
    }

    /// The result most recently produced for `stage`.
    #[inline(always)]
    pub fn result(&self, stage: Stage) -> Option<StageResult> {
        self.results[stage.index()]
    }

    /// Places an instruction (or a bubble) in `stage`, clearing its result.
    pub fn set(&mut self, stage: Stage, entry: Option<InFlight>) {
        self.slots[stage.index()] = entry;
        self.results[stage.index()] = None;
    }

    /// Publishes a result for `stage`.
    pub fn put_result(&mut self, stage: Stage, result: StageResult) {
        self.results[stage.index()] = Some(result);
    }

    /// Empties `stage`. Returns whether it held an instruction.
    pub fn clear(&mut self, stage: Stage) -> bool {
        let occupied = self.slots[stage.index()].is_some();
        self.set(stage, None);
        occupied
    }

    /// Moves the occupant of the previous stage, with its result, into `stage`.
    ///
    /// The previous stage is left empty until it is refilled.
    pub fn shift_into(&mut self, stage: Stage) {
        if let Some(prev) = stage.prev() {
            self.slots[stage.index()] = self.slots[prev.index()].take();
            self.results[stage.index()] = self.results[prev.index()].take();
        }
    }

    /// Whether every stage is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of occupied stages.
    pub fn occupancy(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Empties every stage.
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Latches {
    /// One-line snapshot: `F[...] D[...] X[...] M[...] W[...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const TAGS: [&str; PIPELINE_DEPTH] = ["F", "D", "X", "M", "W"];
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match slot {
                Some(entry) => write!(f, "{}[{:#x} {}]", TAGS[i], entry.pc, entry.inst)?,
                None => write!(f, "{}[-]", TAGS[i])?,
            }
        }
        Ok(())
    }
}
