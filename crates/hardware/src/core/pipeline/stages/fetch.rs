//! Instruction Fetch (IF) Stage.
//!
//! Reads the word at the program counter into the `fetch` slot and advances the
//! PC by one word. An address outside allocated memory, or one holding data, ends
//! the instruction stream: the slot stays empty and the pipeline drains.

use tracing::trace;

use crate::common::Result;
use crate::common::constants::WORD_BYTES;
use crate::core::Cpu;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::{InFlight, Stage};

/// Executes the instruction fetch stage.
///
/// Not called on a cycle where a stall froze the front of the pipeline, so a
/// stalled cycle neither refetches nor advances the PC.
///
/// # Errors
///
/// Returns `MisalignedAccess` when the PC is not word aligned. Jumps reject a
/// misaligned target in `execute`, so this only fires for a bad start address.
pub fn fetch_stage(pipe: &mut Pipeline, cpu: &Cpu) -> Result<()> {
    let pc = pipe.pc();
    let fetched = cpu.memory.fetch(pc)?.map(|inst| InFlight { pc, inst });
    if let Some(entry) = &fetched {
        trace!(pc, inst = %entry.inst, "fetch");
    }
    pipe.latches.set(Stage::Fetch, fetched);
    pipe.advance_pc(WORD_BYTES);
    Ok(())
}
