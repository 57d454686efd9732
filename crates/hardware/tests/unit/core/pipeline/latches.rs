//! # Latch Tests

use mipsim_core::common::Reg;
use mipsim_core::core::pipeline::latches::{InFlight, Latches, Stage, StageResult};

use crate::common::program::assemble;

fn entry(pc: u32, text: &str) -> InFlight {
    InFlight {
        pc,
        inst: assemble(&[text])[0],
    }
}

#[test]
fn test_stage_order() {
    assert!(Stage::Fetch < Stage::Decode);
    assert!(Stage::Memory < Stage::Write);
    assert_eq!(Stage::Execute.next(), Some(Stage::Memory));
    assert_eq!(Stage::Fetch.prev(), None);
    assert_eq!(
        Stage::Decode.later().collect::<Vec<_>>(),
        vec![Stage::Execute, Stage::Memory, Stage::Write]
    );
    assert_eq!(
        Stage::Execute.earlier().collect::<Vec<_>>(),
        vec![Stage::Fetch, Stage::Decode]
    );
}

#[test]
fn test_result_travels_with_instruction() {
    let mut latches = Latches::default();
    let t0 = Reg::new(8).unwrap();
    latches.set(Stage::Execute, Some(entry(0x1000, "addi $t0, $zero, 5")));
    latches.put_result(Stage::Execute, StageResult { dest: t0, value: 5 });

    latches.shift_into(Stage::Memory);

    assert_eq!(latches.occupant(Stage::Execute), None);
    assert_eq!(latches.result(Stage::Execute), None);
    assert_eq!(latches.occupant(Stage::Memory).map(|e| e.pc), Some(0x1000));
    assert_eq!(latches.result(Stage::Memory), Some(StageResult { dest: t0, value: 5 }));
}

#[test]
fn test_clear_reports_occupancy() {
    let mut latches = Latches::default();
    latches.set(Stage::Fetch, Some(entry(0x1000, "j 0x1000")));
    assert_eq!(latches.occupancy(), 1);
    assert!(latches.clear(Stage::Fetch));
    assert!(!latches.clear(Stage::Fetch));
    assert!(latches.is_empty());
}

#[test]
fn test_snapshot_format() {
    let mut latches = Latches::default();
    latches.set(Stage::Decode, Some(entry(0x1004, "add $t0, $t1, $t2")));
    assert_eq!(
        latches.to_string(),
        "F[-] D[0x1004 add $8, $9, $10] X[-] M[-] W[-]"
    );
}
