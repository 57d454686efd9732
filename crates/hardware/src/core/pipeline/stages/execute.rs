//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **Operand Resolution:** Consults the hazard unit; stalls or reads through forwarding.
//! 2. **Arithmetic Execution:** Runs the ALU and publishes the result for forwarding.
//! 3. **Branch Resolution:** Resolves branches and jumps and redirects fetch when taken.

use tracing::debug;

use crate::common::constants::WORD_BYTES;
use crate::common::{Result, SimError};
use crate::core::Cpu;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::hazards::{self, Resolution};
use crate::core::pipeline::latches::Stage;
use crate::isa::instruction::{ExecOutcome, InstClass};

/// Executes the instruction in the `execute` slot.
///
/// Loads and stores have no execute work; their address is computed in `memory`.
/// A taken branch or any jump discards the two younger instructions in `fetch`
/// and `decode` and points fetch at the target, a fixed two-cycle penalty.
///
/// # Arguments
///
/// * `pipe` - The pipeline (slots, stall and PC control).
/// * `cpu` - Machine state; registers are read, statistics updated.
///
/// # Errors
///
/// `MisalignedAccess` wrapped with the jump when its target is not word
/// aligned. Fetch never sees the bad address.
pub fn execute_stage(pipe: &mut Pipeline, cpu: &mut Cpu) -> Result<()> {
    let Some(entry) = pipe.occupant(Stage::Execute) else {
        return Ok(());
    };
    if entry.inst.operand_stage() != Stage::Execute {
        return Ok(());
    }

    let fwd = match hazards::resolve(&pipe.latches, Stage::Execute, &entry.inst) {
        Resolution::Ready(fwd) => fwd,
        Resolution::Stall { reg, producer } => {
            debug!(pc = entry.pc, inst = %entry.inst, %reg, %producer, "data hazard");
            pipe.stall(Stage::Execute);
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

    match entry.inst.execute(entry.pc, &cpu.regs, &fwd) {
        ExecOutcome::Value(value) => pipe.put_result(Stage::Execute, value),
        ExecOutcome::Redirect(target) => {
            if target % WORD_BYTES != 0 {
                return Err(SimError::MisalignedAccess { addr: target }
                    .in_instruction(entry.pc, entry.inst));
            }
            let squashed = pipe.redirect(target);
            cpu.stats.flushes += 1;
            cpu.stats.squashed += squashed as u64;
            if entry.inst.class() == InstClass::Branch {
                cpu.stats.branches_taken += 1;
            }
        }
        ExecOutcome::None => {}
    }
    Ok(())
}
