//! Memory Access (MEM) Stage.
//!
//! Loads read their word and publish it as the stage result; stores write memory.
//! Both compute their effective address here, reading the base register (and, for
//! stores, the data register) through the hazard unit, so a store right behind a
//! load receives the loaded value directly.

use tracing::debug;

use crate::common::Result;
use crate::core::Cpu;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::hazards::{self, Resolution};
use crate::core::pipeline::latches::Stage;

/// Executes the instruction in the `memory` slot.
///
/// # Errors
///
/// Memory faults (`MisalignedAccess`, `OutOfBounds`, `NotData`) wrapped with the
/// failing instruction.
pub fn mem_stage(pipe: &mut Pipeline, cpu: &mut Cpu) -> Result<()> {
    let Some(entry) = pipe.occupant(Stage::Memory) else {
        return Ok(());
    };
    if entry.inst.operand_stage() != Stage::Memory {
        return Ok(());
    }

    let fwd = match hazards::resolve(&pipe.latches, Stage::Memory, &entry.inst) {
        Resolution::Ready(fwd) => fwd,
        Resolution::Stall { reg, producer } => {
            debug!(pc = entry.pc, inst = %entry.inst, %reg, %producer, "data hazard");
            pipe.stall(Stage::Memory);
            cpu.stats.stalls_data += 1;
            return Ok(());
        }
    };
    for fwd_entry in fwd.entries() {
        debug!(
            pc = entry.pc,
            reg = %fwd_entry.reg,
            value = fwd_entry.value,
            path = ?fwd_entry.path,
            "forward"
        );
    }
    cpu.stats.record_forwards(&fwd);

    let loaded = entry
        .inst
        .memory(&cpu.regs, &fwd, &mut cpu.memory)
        .map_err(|err| err.in_instruction(entry.pc, entry.inst))?;
    if let Some(value) = loaded {
        pipe.put_result(Stage::Memory, value);
    }
    Ok(())
}
