//! Operand forwarding.
//!
//! Direct tests of the forwarding predicates plus engine-level checks that
//! the operand consumed in EX equals the most recently produced value.

use rv32sim_core::core::pipeline::hazards::{
    branch_forward_from_ex, branch_forward_from_mem, forward_alu_from_ex, forward_alu_from_mem,
    forward_load_from_mem,
};
use rv32sim_core::core::pipeline::latches::{ExLatch, MemLatch, WbLatch};

use crate::common::asm;
use crate::common::harness::{run_pipeline, trace_pipeline};

fn mem_alu(wrt_reg: usize) -> MemLatch {
    MemLatch {
        wrt_reg,
        write_back: true,
        ..MemLatch::default()
    }
}

fn mem_load(wrt_reg: usize) -> MemLatch {
    MemLatch {
        wrt_reg,
        write_back: true,
        read_mem: true,
        ..MemLatch::default()
    }
}

fn ex_alu(dest: usize) -> ExLatch {
    ExLatch {
        dest,
        write_back: true,
        ..ExLatch::default()
    }
}

fn next_wb(value: i32) -> WbLatch {
    WbLatch {
        store_data: value,
        ..WbLatch::default()
    }
}

fn next_mem(value: i32) -> MemLatch {
    MemLatch {
        store_data: value,
        ..MemLatch::default()
    }
}

#[test]
fn load_in_mem_forwards_through_the_fresh_wb_latch() {
    assert_eq!(
        forward_load_from_mem(&mem_load(5), &next_wb(77), 5),
        Some(77)
    );
    assert_eq!(forward_load_from_mem(&mem_alu(5), &next_wb(77), 5), None);
    assert_eq!(forward_load_from_mem(&mem_load(5), &next_wb(77), 6), None);
}

#[test]
fn alu_in_mem_forwards_through_the_fresh_wb_latch() {
    assert_eq!(forward_alu_from_mem(&mem_alu(5), &next_wb(33), 5), Some(33));
    assert_eq!(forward_alu_from_mem(&mem_load(5), &next_wb(33), 5), None);
}

#[test]
fn alu_in_ex_forwards_through_the_fresh_mem_latch() {
    assert_eq!(forward_alu_from_ex(&ex_alu(4), &next_mem(11), 4), Some(11));
    // A load in EX has no value to forward yet.
    let mut load = ex_alu(4);
    load.read_mem = true;
    assert_eq!(forward_alu_from_ex(&load, &next_mem(11), 4), None);
}

#[test]
fn x0_never_forwards() {
    assert_eq!(forward_alu_from_ex(&ex_alu(0), &next_mem(11), 0), None);
    assert_eq!(forward_alu_from_mem(&mem_alu(0), &next_wb(33), 0), None);
    assert_eq!(forward_load_from_mem(&mem_load(0), &next_wb(77), 0), None);
}

#[test]
fn branch_prefers_the_closer_producer() {
    // Both EX and MEM produce x5; the EX clause matches, so the MEM clause
    // must stand down.
    let ex = ex_alu(5);
    let mem = mem_alu(5);
    assert_eq!(branch_forward_from_ex(&ex, &next_mem(1), 5), Some(1));
    assert_eq!(branch_forward_from_mem(&ex, &mem, &next_wb(2), 5), None);

    // With no EX producer the MEM clause applies.
    let idle = ExLatch::default();
    assert_eq!(branch_forward_from_mem(&idle, &mem, &next_wb(2), 5), Some(2));
}

#[test]
fn ex_to_id_forwarding_feeds_back_to_back_dependents() {
    // x1 is produced and consumed in consecutive instructions, twice.
    let core = run_pipeline(&[
        asm::addi(1, 0, -1),
        asm::xori(2, 1, -1),
        asm::and(3, 1, 2),
        asm::halt(),
    ]);
    assert_eq!(core.registers().read(1), -1);
    assert_eq!(core.registers().read(2), 0);
    assert_eq!(core.registers().read(3), 0);
    assert_eq!(core.cycle(), 8);
}

#[test]
fn ex_and_mem_forwarding_combine_on_one_consumer() {
    let add_word = asm::add(3, 1, 2);
    let (core, snapshots) = trace_pipeline(&[
        asm::addi(1, 0, 5),
        asm::addi(2, 0, 7),
        add_word,
        asm::halt(),
    ]);

    // Cycle 3 decodes the add: rs1 arrives from MEM (first addi), rs2 from
    // EX (second addi). The committed EX latch shows the forwarded operands.
    let ex = &snapshots[3].execute;
    assert_eq!(ex.instr, Some(add_word));
    assert_eq!(ex.operand1, 5);
    assert_eq!(ex.operand2, 7);

    assert_eq!(core.registers().read(3), 12);
    assert_eq!(core.cycle(), 8);
}

#[test]
fn store_data_is_forwarded_for_stores() {
    // The store's rs2 value is produced by the immediately preceding add.
    let core = run_pipeline(&[
        asm::addi(1, 0, 21),
        asm::add(2, 1, 1),
        asm::sw(2, 0, 0),
        asm::halt(),
    ]);
    assert_eq!(core.data_memory().read_word(0).unwrap(), 42);
}
