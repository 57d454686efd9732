//! # Timing Tests
//!
//! Cycle counts and CPI for short programs.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;

/// `n` independent `addi`s, each writing its own register.
fn independent(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("addi $s{i}, $zero, {}", i + 1))
        .collect()
}

#[rstest]
#[case(1, 5, 5.0)]
#[case(2, 6, 3.0)]
#[case(4, 8, 2.0)]
#[case(5, 9, 1.8)]
#[case(8, 12, 1.5)]
fn independent_instructions_fill_and_drain(
    #[case] n: usize,
    #[case] cycles: u64,
    #[case] cpi: f64,
) {
    let listing = independent(n);
    let refs: Vec<&str> = listing.iter().map(String::as_str).collect();
    let mut tc = TestContext::new().load(&refs);
    tc.run();

    assert_eq!(tc.sim.instructions_executed(), n as u64);
    assert_eq!(tc.sim.cycles_executed(), cycles);
    assert!((tc.sim.cpi().unwrap() - cpi).abs() < 1e-9);
    assert_eq!(tc.stats().stalls_data, 0);
}

#[test]
fn dependent_alu_pair_forwards_without_stall() {
    let mut tc = TestContext::new().load(&["addi $t0, $zero, 5", "add $t1, $t0, $t0"]);
    tc.run();

    assert_eq!(tc.get_reg("t1"), 10);
    assert_eq!(tc.sim.cycles_executed(), 6);
    assert_eq!(tc.stats().stalls_data, 0);
    assert_eq!(tc.stats().forwards_ex_ex, 1);
}

#[test]
fn producer_two_ahead_forwards_from_write() {
    let mut tc = TestContext::new().load(&[
        "addi $t0, $zero, 5",
        "addi $t5, $zero, 1",
        "sub $t1, $t0, $t5",
    ]);
    tc.run();

    assert_eq!(tc.get_reg("t1"), 4);
    assert_eq!(tc.sim.cycles_executed(), 7);
    assert_eq!(tc.stats().forwards_mem_ex, 1);
    assert_eq!(tc.stats().forwards_ex_ex, 1);
}

#[test]
fn load_use_costs_one_cycle() {
    let mut tc = TestContext::new().load(&["lw $t0, 0($t1)", "add $t2, $t0, $t0"]);
    tc.set_reg("t1", 0x80);
    tc.sim.cpu.write_word(0x80, 21).unwrap();
    tc.run();

    assert_eq!(tc.get_reg("t2"), 42);
    assert_eq!(tc.stats().stalls_data, 1);
    assert_eq!(tc.sim.cycles_executed(), 7);
}

#[test]
fn taken_branch_costs_two_cycles() {
    let mut tc = TestContext::new().load(&[
        "beq $zero, $zero, 1",
        "addi $t0, $zero, 1",
        "addi $t1, $zero, 1",
    ]);
    tc.run();

    assert_eq!(tc.get_reg("t0"), 0);
    assert_eq!(tc.get_reg("t1"), 1);
    // Two retired, plus the two-cycle redirect penalty.
    assert_eq!(tc.sim.cycles_executed(), 2 + 4 + 2);
}
