//! Instruction decode (ID) stage.
//!
//! Decodes the word in the ID latch, reads the architectural source
//! registers, applies operand forwarding and load-use stall detection, and
//! resolves branches and jumps. The resulting EX latch is written into the
//! next-cycle state.
//!
//! Control flow resolves here, one cycle after fetch: a taken branch or a
//! jump redirects the next PC to `PC + imm - 4` (the `-4` cancels the IF
//! increment that already happened), squashes the word fetched this cycle,
//! and nops the next ID latch.
//!
//! A nop-carried word (after a squash, or while draining after the halt
//! sentinel) is still decoded so the EX latch keeps showing its fields in
//! the dump, but it causes no architectural effect: no PC redirection, no
//! squash, and no stall bookkeeping.

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExLatch, PipelineState};
use crate::core::pipeline::stages::FetchControl;
use crate::isa::decode::decode;
use crate::isa::instruction::{Decoded, Format, Mnemonic};

/// Executes the decode stage, writing the next-cycle EX latch and returning
/// the same-cycle directives for the fetch stage.
///
/// # Errors
///
/// Returns [`SimError::InvalidInstruction`] when the held word is neither
/// the halt sentinel nor a member of the supported subset.
pub fn decode_stage(
    prev: &PipelineState,
    next: &mut PipelineState,
    rf: &RegisterFile,
) -> Result<FetchControl, SimError> {
    let ctrl = FetchControl::default();

    let Some(word) = prev.decode.instr else {
        // Nothing fetched yet: nop-propagate while retaining the previous EX
        // display fields.
        let mut ex = prev.execute.clone();
        ex.nop = true;
        ex.decoded = None;
        ex.store_data = 0;
        ex.halt = false;
        next.execute = ex;
        return Ok(ctrl);
    };

    let decoded = decode(word)?;
    if decoded.mnemonic == Mnemonic::Halt {
        // The fetch stage withholds the sentinel from ID, so this only fires
        // if a sentinel word is planted mid-image.
        next.decode.halt = true;
        return Ok(ctrl);
    }

    let live = !prev.decode.nop;
    tracing::trace!(instr = %decoded, live, "ID");

    let ctrl = match decoded.format {
        Format::R => decode_r_type(&decoded, word, prev, next, rf, live),
        Format::IImm | Format::ILoad => decode_i_type(&decoded, word, prev, next, rf, live),
        Format::S => decode_s_type(&decoded, word, prev, next, rf, live),
        Format::B => decode_b_type(&decoded, word, prev, next, rf, live),
        Format::J => decode_j_type(&decoded, word, prev, next, live),
        Format::Halt => ctrl,
    };

    if prev.decode.nop {
        next.execute.nop = true;
    }
    Ok(ctrl)
}

/// Inserts a load-use bubble: a clean nop EX latch, a rewound fetch, and a
/// cancelled instruction-count increment (the word is re-counted when it is
/// re-fetched).
fn insert_stall(word: u32, next: &mut PipelineState) -> FetchControl {
    tracing::trace!(word = %format_args!("{word:#010x}"), "ID load-use stall");
    next.execute = ExLatch::bubble(Some(word));
    next.fetch.instruction_count = next.fetch.instruction_count.wrapping_sub(1);
    FetchControl {
        squash: false,
        pc_rewind: true,
    }
}

/// Redirects control flow: retargets the next PC, squashes the word fetched
/// this cycle, and nops the next ID latch.
fn redirect(target_base: u32, imm: i32, next: &mut PipelineState) -> FetchControl {
    let target = target_base.wrapping_add_signed(imm).wrapping_sub(4);
    tracing::trace!(target, "ID redirect");
    next.fetch.pc = target;
    next.decode.nop = true;
    FetchControl {
        squash: true,
        pc_rewind: false,
    }
}

/// Register-register arithmetic: both sources read, forwarded with the
/// MEM-before-EX clause order so the closest producer wins last.
fn decode_r_type(
    decoded: &Decoded,
    word: u32,
    prev: &PipelineState,
    next: &mut PipelineState,
    rf: &RegisterFile,
    live: bool,
) -> FetchControl {
    if live && hazards::load_use_on_pair(&prev.execute, decoded.rs1, decoded.rs2) {
        return insert_stall(word, next);
    }

    let mut ex = ExLatch {
        nop: prev.decode.nop,
        decoded: Some(decoded.clone()),
        instr: Some(word),
        operand1: rf.read(decoded.rs1),
        operand2: rf.read(decoded.rs2),
        store_data: 0,
        dest: decoded.rd,
        rs1: decoded.rs1,
        rs2: decoded.rs2,
        imm: 0,
        is_i_type: false,
        read_mem: false,
        write_mem: false,
        write_back: true,
        halt: false,
    };

    if let Some(v) = hazards::forward_load_from_mem(&prev.memory, &next.writeback, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_load_from_mem(&prev.memory, &next.writeback, decoded.rs2) {
        ex.operand2 = v;
    }
    if let Some(v) = hazards::forward_alu_from_mem(&prev.memory, &next.writeback, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_alu_from_mem(&prev.memory, &next.writeback, decoded.rs2) {
        ex.operand2 = v;
    }
    if let Some(v) = hazards::forward_alu_from_ex(&prev.execute, &next.memory, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_alu_from_ex(&prev.execute, &next.memory, decoded.rs2) {
        ex.operand2 = v;
    }

    next.execute = ex;
    FetchControl::default()
}

/// Immediate arithmetic and loads: only rs1 is read and forwarded; loads
/// additionally raise the memory-read flag, including on a stall bubble so
/// the bubble dump keeps the load's control view.
fn decode_i_type(
    decoded: &Decoded,
    word: u32,
    prev: &PipelineState,
    next: &mut PipelineState,
    rf: &RegisterFile,
    live: bool,
) -> FetchControl {
    let is_load = decoded.format == Format::ILoad;

    if live && hazards::load_use_on_rs1(&prev.execute, decoded.rs1) {
        let ctrl = insert_stall(word, next);
        if is_load {
            next.execute.read_mem = true;
        }
        return ctrl;
    }

    let mut ex = ExLatch {
        nop: prev.decode.nop,
        decoded: Some(decoded.clone()),
        instr: Some(word),
        operand1: rf.read(decoded.rs1),
        operand2: 0,
        store_data: 0,
        dest: decoded.rd,
        rs1: decoded.rs1,
        rs2: 0,
        imm: decoded.imm,
        is_i_type: true,
        read_mem: is_load,
        write_mem: false,
        write_back: true,
        halt: prev.decode.halt,
    };

    if let Some(v) = hazards::forward_load_from_mem(&prev.memory, &next.writeback, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_alu_from_mem(&prev.memory, &next.writeback, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_alu_from_ex(&prev.execute, &next.memory, decoded.rs1) {
        ex.operand1 = v;
    }

    next.execute = ex;
    FetchControl::default()
}

/// Stores: rs2 forwarding targets both `operand2` and `store_data`. The
/// clause order here checks EX before MEM, so on overlap the MEM value
/// lands last.
fn decode_s_type(
    decoded: &Decoded,
    word: u32,
    prev: &PipelineState,
    next: &mut PipelineState,
    rf: &RegisterFile,
    live: bool,
) -> FetchControl {
    if live && hazards::load_use_on_pair(&prev.execute, decoded.rs1, decoded.rs2) {
        return insert_stall(word, next);
    }

    let rv2 = rf.read(decoded.rs2);
    let mut ex = ExLatch {
        nop: prev.decode.nop,
        decoded: Some(decoded.clone()),
        instr: Some(word),
        operand1: rf.read(decoded.rs1),
        operand2: rv2,
        store_data: rv2,
        dest: decoded.rs2,
        rs1: decoded.rs1,
        rs2: decoded.rs2,
        imm: decoded.imm,
        is_i_type: true,
        read_mem: false,
        write_mem: true,
        write_back: false,
        halt: prev.decode.halt,
    };

    if let Some(v) = hazards::forward_alu_from_ex(&prev.execute, &next.memory, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_alu_from_ex(&prev.execute, &next.memory, decoded.rs2) {
        ex.store_data = v;
        ex.operand2 = v;
    }
    if let Some(v) = hazards::forward_load_from_mem(&prev.memory, &next.writeback, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_load_from_mem(&prev.memory, &next.writeback, decoded.rs2) {
        ex.store_data = v;
        ex.operand2 = v;
    }
    if let Some(v) = hazards::forward_alu_from_mem(&prev.memory, &next.writeback, decoded.rs1) {
        ex.operand1 = v;
    }
    if let Some(v) = hazards::forward_alu_from_mem(&prev.memory, &next.writeback, decoded.rs2) {
        ex.store_data = v;
        ex.operand2 = v;
    }

    next.execute = ex;
    FetchControl::default()
}

/// Branches: the predicate is evaluated here on forwarded operands; the EX
/// latch a branch hands on is always a nop.
fn decode_b_type(
    decoded: &Decoded,
    word: u32,
    prev: &PipelineState,
    next: &mut PipelineState,
    rf: &RegisterFile,
    live: bool,
) -> FetchControl {
    let mut op1 = rf.read(decoded.rs1);
    let mut op2 = rf.read(decoded.rs2);

    if let Some(v) = hazards::branch_forward_from_ex(&prev.execute, &next.memory, decoded.rs1) {
        op1 = v;
    }
    if let Some(v) = hazards::branch_forward_from_ex(&prev.execute, &next.memory, decoded.rs2) {
        op2 = v;
    }
    if let Some(v) =
        hazards::branch_forward_from_mem(&prev.execute, &prev.memory, &next.writeback, decoded.rs1)
    {
        op1 = v;
    }
    if let Some(v) =
        hazards::branch_forward_from_mem(&prev.execute, &prev.memory, &next.writeback, decoded.rs2)
    {
        op2 = v;
    }

    let taken = match decoded.mnemonic {
        Mnemonic::Beq => op1 == op2,
        _ => op1 != op2,
    };

    let ctrl = if live && taken {
        redirect(prev.fetch.pc, decoded.imm, next)
    } else {
        FetchControl::default()
    };

    next.execute = ExLatch {
        nop: true,
        decoded: Some(decoded.clone()),
        instr: Some(word),
        operand1: 0,
        operand2: 0,
        store_data: 0,
        dest: 0,
        rs1: decoded.rs1,
        rs2: decoded.rs2,
        imm: decoded.imm,
        is_i_type: true,
        read_mem: false,
        write_mem: false,
        write_back: false,
        halt: false,
    };
    ctrl
}

/// Jumps: unconditional redirect; the return address (the PC the fetch
/// stage already advanced to) rides in `store_data` through the normal
/// EX/MEM/WB flow.
fn decode_j_type(
    decoded: &Decoded,
    word: u32,
    prev: &PipelineState,
    next: &mut PipelineState,
    live: bool,
) -> FetchControl {
    next.execute = ExLatch {
        nop: false,
        decoded: Some(decoded.clone()),
        instr: Some(word),
        operand1: 0,
        operand2: 0,
        store_data: prev.fetch.pc as i32,
        dest: decoded.rd,
        rs1: 0,
        rs2: 0,
        imm: decoded.imm,
        is_i_type: true,
        read_mem: false,
        write_mem: false,
        write_back: true,
        halt: false,
    };

    if live {
        redirect(prev.fetch.pc, decoded.imm, next)
    } else {
        FetchControl::default()
    }
}
