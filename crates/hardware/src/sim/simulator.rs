//! Simulator: owns the machine state and the pipeline side-by-side.
//!
//! The pipeline borrows the CPU mutably for each cycle, so neither owns the
//! other. This module provides:
//! 1. **Loading:** Decoded instructions or source records into memory at the base address.
//! 2. **Running:** Cycle the pipeline from a start address until it drains.
//! 3. **Reporting:** Final registers, cycle and instruction counts, and CPI.

use tracing::info;

use crate::common::{Result, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::gpr::Gpr;
use crate::core::cpu::Memory;
use crate::core::pipeline::engine::Pipeline;
use crate::isa::abi::RegisterNames;
use crate::isa::decode::{SourceLine, decode_program};
use crate::isa::instruction::Instruction;
use crate::sim::loader::load_program;
use crate::stats::SimStats;

/// Top-level simulator: machine state + pipeline.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// Registers, memory and run statistics.
    pub cpu: Cpu,
    /// The five-stage pipeline.
    pub pipeline: Pipeline,
    config: Config,
    loaded: usize,
}

impl Simulator {
    /// Creates a simulator with empty memory and zeroed registers.
    pub fn new(config: &Config) -> Self {
        let mut pipeline = Pipeline::new(config.general.base_address);
        pipeline.set_trace(config.general.trace_pipeline);
        Self {
            cpu: Cpu::new(config),
            pipeline,
            config: config.clone(),
            loaded: 0,
        }
    }

    /// Byte address programs are loaded at and run from by default.
    pub fn base_address(&self) -> u32 {
        self.config.general.base_address
    }

    /// Writes `program` into memory at the base address and points fetch at it.
    ///
    /// Memory is rebuilt first, so nothing of a previously loaded image or its
    /// data survives. Registers are kept.
    ///
    /// # Errors
    ///
    /// Memory errors from [`load_program`].
    pub fn load(&mut self, program: &[Instruction]) -> Result<()> {
        let base = self.base_address();
        self.cpu.memory = Memory::new(
            self.config.memory.initial_bytes,
            self.config.memory.max_bytes,
        );
        let _ = load_program(&mut self.cpu.memory, base, program)?;
        self.loaded = program.len();
        self.pipeline.reset(base);
        Ok(())
    }

    /// Decodes source records and loads the result.
    ///
    /// Nothing is written to memory unless the whole program decodes.
    ///
    /// # Errors
    ///
    /// [`SimError::Line`] for the first record that fails to decode, or a
    /// memory error from loading.
    pub fn load_source(&mut self, lines: &[SourceLine], names: &RegisterNames) -> Result<()> {
        let program = decode_program(lines, names)?;
        self.load(&program)
    }

    /// Runs the loaded program from the base address until the pipeline drains.
    ///
    /// # Errors
    ///
    /// See [`Simulator::run_from`].
    pub fn run(&mut self) -> Result<()> {
        self.run_from(self.base_address())
    }

    /// Runs the loaded program from `start_pc` until the pipeline drains.
    ///
    /// Statistics restart from zero; registers and memory keep their contents,
    /// so callers may seed inputs before the run.
    ///
    /// # Errors
    ///
    /// * [`SimError::NoProgram`] - nothing has been loaded.
    /// * [`SimError::CycleLimitExceeded`] - the configured cycle budget ran out.
    /// * [`SimError::Execution`] - a stage faulted; the run is aborted.
    pub fn run_from(&mut self, start_pc: u32) -> Result<()> {
        if self.loaded == 0 {
            return Err(SimError::NoProgram);
        }
        self.pipeline.reset(start_pc);
        self.cpu.stats = SimStats::default();
        info!(start_pc, instructions = self.loaded, "run start");

        loop {
            self.step()?;
            if self.pipeline.is_drained() {
                break;
            }
            if let Some(limit) = self.config.general.max_cycles {
                if self.cpu.stats.cycles > limit {
                    return Err(SimError::CycleLimitExceeded(limit));
                }
            }
        }

        info!(
            cycles = self.cpu.stats.cycles,
            instructions = self.cpu.stats.instructions_retired,
            stalls = self.cpu.stats.stalls_data,
            flushes = self.cpu.stats.flushes,
            "run finished"
        );
        Ok(())
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Errors
    ///
    /// Any stage fault, see [`Pipeline::cycle`].
    pub fn step(&mut self) -> Result<()> {
        self.pipeline.cycle(&mut self.cpu)
    }

    /// The register file.
    pub fn registers(&self) -> &Gpr {
        &self.cpu.regs
    }

    /// Instructions retired by the last run.
    pub fn instructions_executed(&self) -> u64 {
        self.cpu.stats.instructions_retired
    }

    /// Cycles taken by the last run.
    pub fn cycles_executed(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Cycles per instruction of the last run.
    ///
    /// # Errors
    ///
    /// [`SimError::NoInstructions`] if nothing retired.
    pub fn cpi(&self) -> Result<f64> {
        self.cpu.stats.cpi()
    }

    /// All counters of the last run.
    pub fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }
}
