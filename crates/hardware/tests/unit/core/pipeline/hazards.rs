//! # Hazard Unit Tests
//!
//! Builds latch states by hand and checks what `resolve` decides for a consumer.

use mipsim_core::common::Reg;
use mipsim_core::core::pipeline::hazards::{ForwardPath, Resolution, resolve};
use mipsim_core::core::pipeline::latches::{InFlight, Latches, Stage, StageResult};
use mipsim_core::isa::instruction::Instruction;

use crate::common::program::assemble;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn inst(text: &str) -> Instruction {
    assemble(&[text])[0]
}

fn t(n: usize) -> Reg {
    Reg::new(8 + n).unwrap()
}

/// Place `text` in `stage`, optionally with a published result for `dest`.
fn place(latches: &mut Latches, stage: Stage, text: &str, result: Option<i32>) {
    let inst = inst(text);
    latches.set(stage, Some(InFlight { pc: 0x1000, inst }));
    if let (Some(value), Some(dest)) = (result, inst.destination()) {
        latches.put_result(stage, StageResult { dest, value });
    }
}

// ══════════════════════════════════════════════════════════
// 1. Forwarding paths
// ══════════════════════════════════════════════════════════

#[test]
fn forwards_from_memory_to_execute_consumer() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Memory, "addi $t0, $zero, 5", Some(5));
    let consumer = inst("add $t1, $t0, $t0");

    let Resolution::Ready(fwd) = resolve(&latches, Stage::Execute, &consumer) else {
        panic!("expected forwarding");
    };
    assert_eq!(fwd.get(t(0)), Some(5));
    assert_eq!(fwd.entries().len(), 1);
    assert_eq!(fwd.entries()[0].path, ForwardPath::ExecuteToExecute);
}

#[test]
fn forwards_from_write_to_execute_consumer() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Write, "lw $t0, 0($zero)", Some(21));
    let consumer = inst("sub $t1, $t2, $t0");

    let Resolution::Ready(fwd) = resolve(&latches, Stage::Execute, &consumer) else {
        panic!("expected forwarding");
    };
    assert_eq!(fwd.get(t(0)), Some(21));
    assert_eq!(fwd.get(t(2)), None);
    assert_eq!(fwd.entries()[0].path, ForwardPath::MemoryToExecute);
}

#[test]
fn forwards_load_value_into_following_store() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Write, "lw $t0, 0($zero)", Some(-7));
    let store = inst("sw $t0, 16($zero)");

    let Resolution::Ready(fwd) = resolve(&latches, Stage::Memory, &store) else {
        panic!("expected forwarding");
    };
    assert_eq!(fwd.get(t(0)), Some(-7));
    assert_eq!(fwd.entries()[0].path, ForwardPath::MemoryToMemory);
}

#[test]
fn nearest_producer_wins() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Write, "addi $t0, $zero, 1", Some(1));
    place(&mut latches, Stage::Memory, "addi $t0, $zero, 2", Some(2));
    let consumer = inst("add $t1, $t0, $zero");

    let Resolution::Ready(fwd) = resolve(&latches, Stage::Execute, &consumer) else {
        panic!("expected forwarding");
    };
    assert_eq!(fwd.get(t(0)), Some(2));
}

// ══════════════════════════════════════════════════════════
// 2. Stalls
// ══════════════════════════════════════════════════════════

#[test]
fn load_in_memory_without_value_stalls_execute() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Memory, "lw $t0, 0($t3)", None);
    let consumer = inst("add $t2, $t0, $t0");

    assert_eq!(
        resolve(&latches, Stage::Execute, &consumer),
        Resolution::Stall {
            reg: t(0),
            producer: Stage::Memory,
        }
    );
}

#[test]
fn producer_in_write_never_stalls() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Write, "lw $t1, 0($zero)", None);
    let store = inst("sw $t0, 0($t1)");

    // A producer in write has committed by the time the consumer reads.
    assert!(matches!(
        resolve(&latches, Stage::Memory, &store),
        Resolution::Ready(fwd) if fwd.is_empty()
    ));
}

#[test]
fn zero_register_never_hazards() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Memory, "add $zero, $t0, $t1", None);
    let consumer = inst("add $t2, $zero, $zero");

    assert!(matches!(
        resolve(&latches, Stage::Execute, &consumer),
        Resolution::Ready(fwd) if fwd.is_empty()
    ));
}

#[test]
fn unrelated_producer_is_ignored() {
    let mut latches = Latches::default();
    place(&mut latches, Stage::Memory, "lw $t5, 0($zero)", None);
    let consumer = inst("beq $t0, $t1, 4");

    assert!(matches!(
        resolve(&latches, Stage::Execute, &consumer),
        Resolution::Ready(fwd) if fwd.is_empty()
    ));
}
