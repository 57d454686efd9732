//! Writeback (WB) Stage.
//!
//! Commits the result carried by the instruction in `write` to the register file
//! and retires the instruction. This is the only place registers are written.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::Stage;

/// Executes the writeback stage.
pub fn wb_stage(pipe: &Pipeline, cpu: &mut Cpu) {
    let Some(entry) = pipe.occupant(Stage::Write) else {
        return;
    };
    if let Some(result) = pipe.latches.result(Stage::Write) {
        cpu.regs.write(result.dest, result.value);
    }
    cpu.stats.retire(entry.inst.class());
    trace!(pc = entry.pc, inst = %entry.inst, "retire");
}
