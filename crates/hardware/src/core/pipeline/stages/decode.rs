//! Instruction Decode (ID) Stage.
//!
//! Instructions arrive in memory already decoded, so this stage only runs the
//! per-instruction decode hook; operand reads happen later, through the hazard
//! unit, in the stage that consumes them.

use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::Stage;

/// Executes the decode stage.
pub fn decode_stage(pipe: &Pipeline) {
    if let Some(entry) = pipe.occupant(Stage::Decode) {
        entry.inst.decode();
    }
}
