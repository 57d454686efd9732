//! Program Loader.
//!
//! This module places a decoded program into memory. It performs:
//! 1. **Image layout:** Writes instruction `i` at `base + 4 * i` as a boxed instruction word.
//! 2. **Validation:** Rejects a misaligned base or an image that does not fit under
//!    the memory ceiling before the run begins.

use tracing::debug;

use crate::common::Result;
use crate::common::constants::WORD_BYTES;
use crate::core::cpu::memory::Memory;
use crate::isa::instruction::Instruction;

/// Writes `program` into `memory` starting at byte address `base`.
///
/// # Arguments
///
/// * `memory` - Target memory; grows as needed.
/// * `base` - Byte address of the first instruction.
/// * `program` - Decoded instructions in program order.
///
/// # Returns
///
/// The byte address one past the last instruction.
///
/// # Errors
///
/// `MisalignedAccess` if `base` is not word aligned, `OutOfBounds` if the image
/// crosses the memory ceiling.
pub fn load_program(memory: &mut Memory, base: u32, program: &[Instruction]) -> Result<u32> {
    let mut addr = base;
    for inst in program {
        memory.write_word(addr, *inst)?;
        addr = addr.wrapping_add(WORD_BYTES);
    }
    debug!(base, end = addr, count = program.len(), "program loaded");
    Ok(addr)
}
