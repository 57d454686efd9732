//! # General-Purpose Register Tests
//!
//! Tests for the 32-entry register file.

use mipsim_core::common::Reg;
use mipsim_core::core::arch::gpr::Gpr;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_gpr_new_initializes_to_zero() {
    assert_eq!(Gpr::new().snapshot(), [0; 32]);
}

#[test]
fn test_gpr_zero_ignores_writes() {
    let mut gpr = Gpr::new();
    gpr.write(Reg::ZERO, 0x1234);
    assert_eq!(gpr.read(Reg::ZERO), 0);
    gpr.write_index(0, -1).unwrap();
    assert_eq!(gpr.read_index(0).unwrap(), 0);
}

#[test]
fn test_gpr_index_out_of_range() {
    let mut gpr = Gpr::new();
    assert!(gpr.read_index(32).is_err());
    assert!(gpr.write_index(40, 1).is_err());
}

#[test]
fn test_gpr_dump_uses_abi_names() {
    let mut gpr = Gpr::new();
    gpr.write_index(8, 42).unwrap();
    let dump = gpr.to_string();
    assert_eq!(dump.lines().count(), 8);
    assert!(dump.contains("$t0"));
    assert!(dump.contains("42"));
}

proptest! {
    #[test]
    fn prop_write_then_read(idx in 1usize..32, value in any::<i32>()) {
        let mut gpr = Gpr::new();
        gpr.write_index(idx, value).unwrap();
        prop_assert_eq!(gpr.read_index(idx).unwrap(), value);
    }

    #[test]
    fn prop_zero_register_stays_zero(value in any::<i32>()) {
        let mut gpr = Gpr::new();
        gpr.write_index(0, value).unwrap();
        prop_assert_eq!(gpr.read_index(0).unwrap(), 0);
    }
}
