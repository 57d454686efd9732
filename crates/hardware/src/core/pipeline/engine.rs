//! Five-stage pipeline engine.
//!
//! This module owns the per-cycle state machine:
//! 1. **Advance:** Shift every slot one stage toward `write`, tail first, honouring a
//!    pending stall by freezing the stalled stage and everything upstream of it.
//! 2. **Fetch:** Refill `fetch` from the program counter unless frozen.
//! 3. **Callbacks:** Run `decode`, `execute`, `memory`, `write` in program order.
//! 4. **Control:** Record stalls, flush wrong-path stages and redirect the PC.

use tracing::{debug, info, trace};

use crate::common::Result;
use crate::common::constants::PIPELINE_DEPTH;
use crate::core::Cpu;
use crate::core::pipeline::latches::{InFlight, Latches, Stage, StageResult};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};

/// The pipeline: slots, program counter and stall state.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Per-stage slots and results.
    pub latches: Latches,
    pc: u32,
    stall: Option<Stage>,
    trace_info: bool,
}

impl Pipeline {
    /// Creates an empty pipeline that will fetch from `start_pc` first.
    pub fn new(start_pc: u32) -> Self {
        Self {
            latches: Latches::default(),
            pc: start_pc,
            stall: None,
            trace_info: false,
        }
    }

    /// Emits the per-cycle snapshot at `info` instead of `trace` level.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_info = enabled;
    }

    /// Empties every stage and restarts fetch at `start_pc`.
    pub fn reset(&mut self, start_pc: u32) {
        self.latches.flush();
        self.pc = start_pc;
        self.stall = None;
    }

    /// Address the next fetch reads from.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Moves the fetch address forward by `bytes`.
    pub(crate) fn advance_pc(&mut self, bytes: u32) {
        self.pc = self.pc.wrapping_add(bytes);
    }

    /// The instruction occupying `stage`.
    pub fn occupant(&self, stage: Stage) -> Option<InFlight> {
        self.latches.occupant(stage)
    }

    /// The stage frozen on the next cycle, if a stall is pending.
    pub fn pending_stall(&self) -> Option<Stage> {
        self.stall
    }

    /// Whether every stage is empty.
    pub fn is_drained(&self) -> bool {
        self.latches.is_empty()
    }

    /// Runs one clock cycle.
    ///
    /// # Errors
    ///
    /// Any fault raised by a stage callback, wrapped with the failing instruction.
    /// The run cannot continue after an error.
    pub fn cycle(&mut self, cpu: &mut Cpu) -> Result<()> {
        let frozen = self.advance();
        if !frozen {
            fetch_stage(self, cpu)?;
        }

        decode_stage(self);
        execute_stage(self, cpu)?;
        mem_stage(self, cpu)?;
        wb_stage(self, cpu);

        if !self.latches.is_empty() {
            cpu.stats.cycles += 1;
        }
        if self.trace_info {
            info!(cycle = cpu.stats.cycles, pc = self.pc, "{}", self.latches);
        } else {
            trace!(cycle = cpu.stats.cycles, pc = self.pc, "{}", self.latches);
        }
        Ok(())
    }

    /// Shifts every stage forward, tail first.
    ///
    /// A pending stall on stage `S` empties the stage after `S` and stops the
    /// shift, so `S` and everything before it keep their occupants. Returns
    /// whether the front of the pipeline is frozen this cycle.
    fn advance(&mut self) -> bool {
        let stall = self.stall.take();
        for i in (1..PIPELINE_DEPTH).rev() {
            let stage = Stage::ALL[i];
            if stage.prev() == stall {
                let _ = self.latches.clear(stage);
                return true;
            }
            self.latches.shift_into(stage);
        }
        self.latches.set(Stage::Fetch, None);
        false
    }

    /// Freezes `stage` and everything upstream of it for the next cycle.
    ///
    /// Called by a callback whose operands are not available yet; the callback
    /// does nothing this cycle and runs again next cycle.
    pub fn stall(&mut self, stage: Stage) {
        debug!(%stage, "stall");
        self.stall = Some(self.stall.map_or(stage, |pending| pending.max(stage)));
    }

    /// Empties every stage strictly before `stage`. Returns how many held an instruction.
    pub fn flush_before(&mut self, stage: Stage) -> usize {
        stage
            .earlier()
            .filter(|&earlier| self.latches.clear(earlier))
            .count()
    }

    /// Empties every stage strictly after `stage`. Returns how many held an instruction.
    pub fn flush_after(&mut self, stage: Stage) -> usize {
        stage
            .later()
            .filter(|&later| self.latches.clear(later))
            .count()
    }

    /// Redirects fetch to `target` after a branch or jump resolved in `execute`.
    ///
    /// The two instructions fetched behind it are discarded and the next fetch
    /// reads `target`. Returns how many instructions were discarded.
    pub fn redirect(&mut self, target: u32) -> usize {
        let squashed = self.flush_before(Stage::Execute);
        debug!(target, squashed, "redirect");
        self.pc = target;
        squashed
    }

    /// Publishes `value` as the result of the instruction in `stage`.
    ///
    /// Instructions without a destination publish nothing.
    pub fn put_result(&mut self, stage: Stage, value: i32) {
        if let Some(dest) = self
            .latches
            .occupant(stage)
            .and_then(|entry| entry.inst.destination())
        {
            self.latches.put_result(stage, StageResult { dest, value });
        }
    }
}
