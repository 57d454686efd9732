/// General-purpose register file tests.
pub mod gpr;
