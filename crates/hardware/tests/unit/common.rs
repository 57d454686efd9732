//! # Common Type Tests
//!
//! Tests for the register index type and the error taxonomy.

use std::error::Error;

use mipsim_core::common::{Reg, SimError};

#[test]
fn test_reg_accepts_full_range() {
    for idx in 0..32 {
        assert_eq!(Reg::new(idx).unwrap().idx(), idx);
    }
}

#[test]
fn test_reg_rejects_32() {
    assert_eq!(Reg::new(32), Err(SimError::InvalidRegister(32)));
}

#[test]
fn test_reg_display() {
    assert_eq!(Reg::new(31).unwrap().to_string(), "$31");
    assert!(Reg::ZERO.is_zero());
}

#[test]
fn test_execution_error_names_instruction_and_address() {
    let err = SimError::MisalignedAccess { addr: 0x102 }.in_instruction(0x1004, "lw $8, 2($0)");
    let text = err.to_string();
    assert!(text.contains("lw $8, 2($0)"), "{text}");
    assert!(text.contains("0x1004"), "{text}");
    assert!(err.source().is_some());
}

#[test]
fn test_line_error_wraps_source() {
    let err = SimError::UnsupportedInstruction("mul".into()).on_line(3);
    assert!(err.to_string().starts_with("line 3"));
    match err {
        SimError::Line { line, source } => {
            assert_eq!(line, 3);
            assert_eq!(*source, SimError::UnsupportedInstruction("mul".into()));
        }
        other => panic!("unexpected {other:?}"),
    }
}
