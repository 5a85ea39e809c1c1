//! Instruction fetch (IF) stage.
//!
//! Reads the word at the current PC and places it in the next-cycle ID
//! latch. Runs last within a cycle so it observes the decode stage's
//! same-cycle directives: a squash suppresses the fetch entirely, and a
//! stall rewind re-fetches the word decode just refused.
//!
//! The halt sentinel never enters ID: seeing it freezes the PC, nops both
//! IF and ID, and leaves the previous ID word in place so the dumps keep
//! showing the last in-flight instruction.

use crate::common::constants::HALT_WORD;
use crate::common::error::SimError;
use crate::core::pipeline::latches::PipelineState;
use crate::core::pipeline::stages::FetchControl;
use crate::mem::imem::InstrMem;

/// Executes the fetch stage, writing the next-cycle IF and ID latches.
///
/// # Errors
///
/// Returns [`SimError::InstructionOutOfBounds`] when the PC points past the
/// loaded instruction image.
pub fn fetch_stage(
    prev: &PipelineState,
    next: &mut PipelineState,
    imem: &InstrMem,
    ctrl: FetchControl,
) -> Result<(), SimError> {
    if prev.fetch.nop || ctrl.squash {
        // Squashed or already halted: keep the previous ID word visible and
        // propagate the nop.
        next.decode.nop = true;
        next.decode.instr = prev.decode.instr;
        next.decode.halt = false;
        return Ok(());
    }

    let pc = if ctrl.pc_rewind {
        prev.fetch.pc.wrapping_sub(4)
    } else {
        prev.fetch.pc
    };

    let word = imem.read_instr(pc)?;
    if word == HALT_WORD {
        tracing::trace!(pc, "IF halt sentinel");
        next.decode.nop = true;
        next.fetch.nop = true;
        next.decode.instr = prev.decode.instr;
        return Ok(());
    }

    tracing::trace!(pc, word = %format_args!("{word:#010x}"), "IF");
    next.decode.instr = Some(word);
    next.decode.nop = false;
    next.fetch.pc = pc.wrapping_add(4);
    next.fetch.instruction_count = next.fetch.instruction_count.wrapping_add(1);
    Ok(())
}
