use mipsim_core::Simulator;
use mipsim_core::config::Config;
use mipsim_core::core::pipeline::{Pipeline, Stage};
use mipsim_core::isa::abi::RegisterNames;
use mipsim_core::stats::SimStats;

use crate::common::program::assemble;

/// Base address every test program is loaded at.
pub const BASE: u32 = 0x1000;

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        Self {
            sim: Simulator::new(config),
        }
    }

    /// Assemble a listing and load it at the base address.
    pub fn load(mut self, listing: &[&str]) -> Self {
        let program = assemble(listing);
        self.sim.load(&program).expect("program should load");
        self
    }

    /// Set a register by ABI name, e.g. `"t1"`.
    pub fn set_reg(&mut self, name: &str, val: i32) {
        let reg = RegisterNames::new().resolve(name).expect("known register");
        self.sim.cpu.regs.write(reg, val);
    }

    /// Read a register by ABI name.
    pub fn get_reg(&self, name: &str) -> i32 {
        let reg = RegisterNames::new().resolve(name).expect("known register");
        self.sim.registers().read(reg)
    }

    /// Run to completion, panicking on a fault.
    pub fn run(&mut self) {
        self.sim.run().expect("run should complete");
    }

    /// Advance `n` cycles without the drain check.
    pub fn step(&mut self, n: usize) {
        for _ in 0..n {
            self.sim.step().expect("cycle should succeed");
        }
    }

    /// PC of the instruction in `stage`, if any.
    pub fn pc_in(&self, stage: Stage) -> Option<u32> {
        self.pipeline().occupant(stage).map(|entry| entry.pc)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.sim.pipeline
    }

    pub fn stats(&self) -> &SimStats {
        self.sim.stats()
    }
}
