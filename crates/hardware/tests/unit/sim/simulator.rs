//! # Simulator Tests
//!
//! Loading, running and reporting through the public `Simulator` API.

use mipsim_core::common::SimError;
use mipsim_core::config::Config;
use mipsim_core::isa::abi::RegisterNames;
use mipsim_core::sim::loader::load_program;
use mipsim_core::{Cpu, Simulator};

use crate::common::harness::{BASE, TestContext};
use crate::common::program::{assemble, lines};

#[test]
fn add_of_seeded_registers() {
    let mut tc = TestContext::new().load(&["add $t0, $t1, $t2"]);
    tc.set_reg("t1", 3);
    tc.set_reg("t2", 4);
    tc.run();

    assert_eq!(tc.get_reg("t0"), 7);
    assert_eq!(tc.stats().stalls_data, 0);
    assert_eq!(tc.sim.instructions_executed(), 1);
    assert_eq!(tc.sim.cycles_executed(), 5);
}

#[test]
fn run_without_program_fails() {
    let mut sim = Simulator::new(&Config::default());
    assert_eq!(sim.run(), Err(SimError::NoProgram));
}

#[test]
fn cpi_requires_retired_instructions() {
    let sim = Simulator::new(&Config::default());
    assert_eq!(sim.cpi(), Err(SimError::NoInstructions));
}

#[test]
fn load_source_decodes_with_aliases() {
    let mut names = RegisterNames::new();
    let _ = names.alias("counter", "s0").unwrap();
    let mut sim = Simulator::new(&Config::default());
    sim.load_source(&lines(&["addi $counter, $zero, 9"]), &names)
        .unwrap();
    sim.run().unwrap();
    assert_eq!(sim.cpu.read_register(16).unwrap(), 9);
}

#[test]
fn load_source_rejects_whole_program_on_bad_line() {
    let mut sim = Simulator::new(&Config::default());
    let err = sim
        .load_source(&lines(&["addi $t0, $zero, 1", "frob $t0"]), &RegisterNames::new())
        .unwrap_err();
    assert!(matches!(err, SimError::Line { line: 1, .. }));
    assert_eq!(sim.run(), Err(SimError::NoProgram));
}

#[test]
fn loader_places_words_consecutively() {
    let mut cpu = Cpu::new(&Config::default());
    let program = assemble(&["addi $t0, $zero, 1", "j 0x1000"]);
    let end = load_program(&mut cpu.memory, BASE, &program).unwrap();
    assert_eq!(end, BASE + 8);
    assert_eq!(cpu.memory.fetch(BASE + 4).unwrap(), Some(program[1]));
    assert!(load_program(&mut cpu.memory, BASE + 2, &program).is_err());
}

#[test]
fn run_from_alternate_start() {
    let mut tc = TestContext::new().load(&["addi $t0, $zero, 1", "addi $t1, $zero, 2"]);
    tc.sim.run_from(BASE + 4).unwrap();
    assert_eq!(tc.get_reg("t0"), 0);
    assert_eq!(tc.get_reg("t1"), 2);
    assert_eq!(tc.sim.instructions_executed(), 1);
}

#[test]
fn store_then_load_round_trips_through_memory() {
    let mut tc = TestContext::new().load(&[
        "addi $t0, $zero, -99",
        "sw $t0, 0x200($zero)",
        "lw $t1, 0x200($zero)",
        "sw $t1, 0x204($zero)",
    ]);
    tc.run();
    assert_eq!(tc.get_reg("t1"), -99);
    assert_eq!(tc.sim.cpu.memory.read_data(0x204).unwrap(), -99);
    assert_eq!(tc.stats().forwards_mem_mem, 2);
}

#[test]
fn runaway_loop_hits_cycle_limit() {
    let config = Config::from_json(r#"{ "general": { "max_cycles": 50 } }"#).unwrap();
    let mut tc = TestContext::with_config(&config).load(&["j 0x1000"]);
    assert_eq!(tc.sim.run(), Err(SimError::CycleLimitExceeded(50)));
}

#[test]
fn rerun_resets_statistics() {
    let mut tc = TestContext::new().load(&["addi $t0, $t0, 1"]);
    tc.run();
    tc.run();
    assert_eq!(tc.get_reg("t0"), 2);
    assert_eq!(tc.sim.cycles_executed(), 5);
    assert_eq!(tc.sim.instructions_executed(), 1);
}

#[test]
fn register_dump_shows_final_state() {
    let mut tc = TestContext::new().load(&["addi $sp, $zero, 4000"]);
    tc.run();
    let dump = tc.sim.registers().to_string();
    assert!(dump.contains("$sp"));
    assert!(dump.contains("4000"));
}

#[test]
fn reload_discards_previous_image() {
    let mut tc = TestContext::new().load(&[
        "addi $t0, $zero, 1",
        "addi $t1, $zero, 2",
        "addi $t2, $zero, 3",
    ]);
    tc.sim.load(&assemble(&["addi $t5, $zero, 9"])).unwrap();
    tc.run();

    assert_eq!(tc.get_reg("t5"), 9);
    assert_eq!(tc.get_reg("t1"), 0);
    assert_eq!(tc.get_reg("t2"), 0);
    assert_eq!(tc.sim.instructions_executed(), 1);
    assert_eq!(tc.sim.cpu.memory.fetch(BASE + 4).unwrap(), None);
}

#[test]
fn alu_result_into_store_counts_as_memory_forward() {
    let mut tc = TestContext::new().load(&["addi $t0, $zero, 5", "sw $t0, 0x200($zero)"]);
    tc.run();

    assert_eq!(tc.sim.cpu.memory.read_data(0x200).unwrap(), 5);
    assert_eq!(tc.stats().forwards_mem_mem, 1);
    assert_eq!(tc.stats().forwards_ex_ex, 0);
    assert_eq!(tc.stats().stalls_data, 0);
}
