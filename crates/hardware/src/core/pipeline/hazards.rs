//! Data Hazard Detection and Forwarding.
//!
//! This module keeps in-flight reads consistent with not-yet-committed writes. It provides:
//! 1. **Hazard Detection:** Finds the nearest in-flight producer of each source register
//!    and decides whether its value is available yet.
//! 2. **Operand Forwarding:** Supplies available values as a per-call [`Forwarding`]
//!    context, bypassing the register file without mutating it.
//!
//! The register file is written only in `write`. A consumer reading in `execute`
//! can receive a value from the instruction one stage ahead (execute→execute)
//! or two stages ahead (memory→execute); a store or load reading in `memory` can
//! receive the value of the instruction one stage ahead (memory→memory). A load's
//! value exists only after its own `memory` callback, which runs after `execute`
//! in the same cycle, so a load immediately followed by a consumer always costs
//! one stall cycle.

use serde::Serialize;

use crate::common::Reg;
use crate::core::pipeline::latches::{Latches, Stage};
use crate::isa::instruction::Instruction;

/// Which bypass path delivered a forwarded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ForwardPath {
    /// Producer one stage ahead of an `execute` consumer.
    ExecuteToExecute,
    /// Producer two stages ahead of an `execute` consumer.
    MemoryToExecute,
    /// Producer one stage ahead of a `memory` consumer.
    ///
    /// Covers the load-to-store bypass and any other result a load or store
    /// reads in `memory`, such as an ALU value feeding a store's data register.
    MemoryToMemory,
}

impl ForwardPath {
    /// Classifies the path between a consumer stage and a producer stage.
    fn between(consumer: Stage, producer: Stage) -> Self {
        match (consumer, producer) {
            (Stage::Execute, Stage::Memory) => Self::ExecuteToExecute,
            (Stage::Execute, _) => Self::MemoryToExecute,
            _ => Self::MemoryToMemory,
        }
    }
}

/// One forwarded register value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forwarded {
    /// The register whose read is overridden.
    pub reg: Reg,
    /// The in-flight value.
    pub value: i32,
    /// Where the value came from.
    pub path: ForwardPath,
}

/// Register values overriding the register file for a single callback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Forwarding {
    entries: Vec<Forwarded>,
}

impl Forwarding {
    /// An empty context: every read goes to the register file.
    pub fn none() -> Self {
        Self::default()
    }

    /// The forwarded value for `reg`, if any.
    pub fn get(&self, reg: Reg) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.reg == reg)
            .map(|entry| entry.value)
    }

    /// Records a forwarded value. The first value recorded for a register wins.
    pub fn insert(&mut self, reg: Reg, value: i32, path: ForwardPath) {
        if self.get(reg).is_none() {
            self.entries.push(Forwarded { reg, value, path });
        }
    }

    /// All forwarded values, in source order.
    pub fn entries(&self) -> &[Forwarded] {
        &self.entries
    }

    /// Whether nothing was forwarded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a hazard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Every source is available; read through this context.
    Ready(Forwarding),
    /// A source is produced by an in-flight instruction that has no value yet.
    Stall {
        /// The register being waited on.
        reg: Reg,
        /// Stage of the producing instruction.
        producer: Stage,
    },
}

/// Checks the sources of `inst`, about to read its operands in `stage`.
///
/// For each non-zero source register the nearest in-flight producer in a later
/// stage decides the outcome: if it has published a result for that register the
/// value is forwarded, otherwise the consumer must stall. A producer in `write`
/// always holds its result, so it never causes a stall. Registers with no
/// in-flight producer are read from the register file.
///
/// # Arguments
///
/// * `latches` - Current pipeline slots and results.
/// * `stage` - Stage `inst` is reading its operands in.
/// * `inst` - The consuming instruction.
pub fn resolve(latches: &Latches, stage: Stage, inst: &Instruction) -> Resolution {
    let mut fwd = Forwarding::none();
    for reg in inst.source_regs() {
        if fwd.get(reg).is_some() {
            continue;
        }
        let producer = stage.later().find(|&later| {
            latches
                .occupant(later)
                .is_some_and(|entry| entry.inst.destination() == Some(reg))
        });
        let Some(producer) = producer else {
            continue;
        };
        match latches.result(producer) {
            Some(result) if result.dest == reg => {
                fwd.insert(reg, result.value, ForwardPath::between(stage, producer));
            }
            _ if producer != Stage::Write => return Resolution::Stall { reg, producer },
            _ => {}
        }
    }
    Resolution::Ready(fwd)
}
