//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for a pipeline run. It provides:
//! 1. **Cycles and CPI:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump).
//! 3. **Hazards:** Data-hazard stall cycles and operands delivered by each forwarding path.
//! 4. **Control flow:** Pipeline flushes, squashed instructions, and taken branches.

use serde::Serialize;

use crate::common::{Result, SimError};
use crate::core::pipeline::hazards::{ForwardPath, Forwarding};
use crate::isa::instruction::InstClass;

/// Simulation statistics structure tracking all performance metrics.
///
/// Reset at the start of every run; valid once the run returns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Cycles in which at least one stage held an instruction.
    pub cycles: u64,
    /// Number of instructions that left the `write` stage.
    pub instructions_retired: u64,

    /// Count of ALU (register and immediate) instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of jumps (`j`, `jr`) retired.
    pub inst_jump: u64,

    /// Stall cycles due to data hazards (RAW dependencies).
    pub stalls_data: u64,
    /// Number of redirects that discarded younger instructions.
    pub flushes: u64,
    /// Number of instructions discarded by redirects.
    pub squashed: u64,
    /// Number of conditional branches taken.
    pub branches_taken: u64,

    /// Operands forwarded from `memory` to an `execute` consumer.
    pub forwards_ex_ex: u64,
    /// Operands forwarded from `write` to an `execute` consumer.
    pub forwards_mem_ex: u64,
    /// Operands forwarded from `write` to a `memory` consumer.
    ///
    /// Counts every forward into a load or store, not only load-to-store.
    pub forwards_mem_mem: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"hazards"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "hazards"];

impl SimStats {
    /// Counts one retired instruction of class `class`.
    pub fn retire(&mut self, class: InstClass) {
        self.instructions_retired += 1;
        let counter = match class {
            InstClass::Alu => &mut self.inst_alu,
            InstClass::Load => &mut self.inst_load,
            InstClass::Store => &mut self.inst_store,
            InstClass::Branch => &mut self.inst_branch,
            InstClass::Jump => &mut self.inst_jump,
        };
        *counter += 1;
    }

    /// Counts the operands delivered by a forwarding context.
    pub fn record_forwards(&mut self, fwd: &Forwarding) {
        for entry in fwd.entries() {
            match entry.path {
                ForwardPath::ExecuteToExecute => self.forwards_ex_ex += 1,
                ForwardPath::MemoryToExecute => self.forwards_mem_ex += 1,
                ForwardPath::MemoryToMemory => self.forwards_mem_mem += 1,
            }
        }
    }

    /// Cycles per retired instruction.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoInstructions`] if nothing retired.
    pub fn cpi(&self) -> Result<f64> {
        if self.instructions_retired == 0 {
            return Err(SimError::NoInstructions);
        }
        Ok(self.cycles as f64 / self.instructions_retired as f64)
    }

    /// Retired instructions per cycle, 0 for an empty run.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Serializes the counters as a JSON object.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        if want("summary") {
            println!("\n==========================================================");
            println!("MIPS PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            match self.cpi() {
                Ok(cpi) => println!("sim_cpi                  {cpi:.4}"),
                Err(_) => println!("sim_cpi                  n/a"),
            }
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
            ] {
                println!(
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / instr) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("hazards") {
            println!("HAZARDS");
            println!(
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                (self.stalls_data as f64 / cyc) * 100.0
            );
            println!("  flushes                {}", self.flushes);
            println!("  squashed               {}", self.squashed);
            println!("  branches.taken         {}", self.branches_taken);
            println!("  forward.ex_ex          {}", self.forwards_ex_ex);
            println!("  forward.mem_ex         {}", self.forwards_mem_ex);
            println!("  forward.mem_mem        {}", self.forwards_mem_mem);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
