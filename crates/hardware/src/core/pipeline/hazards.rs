//! Load-use stall detection and operand forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when
//! data dependencies exist between instructions. It provides:
//! 1. **Stall Detection:** Identifies load-use hazards that require a
//!    one-cycle bubble.
//! 2. **Operand Forwarding:** Resolves Read-After-Write hazards by bypassing
//!    the register file with values computed earlier in the same cycle.
//!
//! Forwarding sources are the latches the downstream stages have just written
//! this cycle: a load or ALU result in MEM arrives through the next-cycle WB
//! latch, and an ALU result in EX arrives through the next-cycle MEM latch.
//! Register `x0` never matches. Stalls take precedence over forwarding.

use crate::core::pipeline::latches::{ExLatch, MemLatch, WbLatch};

/// Load-use hazard against a single consumed source register.
///
/// True when the instruction currently in EX is a load whose destination
/// matches `rs`, with `rs` nonzero.
pub fn load_use_on_rs1(ex: &ExLatch, rs1: usize) -> bool {
    ex.dest == rs1 && ex.read_mem && rs1 != 0
}

/// Load-use hazard against an rs1/rs2 pair.
///
/// True when the instruction currently in EX is a load whose destination
/// matches either source, with both sources nonzero.
pub fn load_use_on_pair(ex: &ExLatch, rs1: usize, rs2: usize) -> bool {
    (ex.dest == rs1 || ex.dest == rs2) && ex.read_mem && rs1 != 0 && rs2 != 0
}

/// MEM-to-ID forwarding for a load in MEM.
///
/// The loaded word has just been placed in the next-cycle WB latch by the
/// MEM stage; it is the most recent value of the register.
pub fn forward_load_from_mem(mem: &MemLatch, next_wb: &WbLatch, rs: usize) -> Option<i32> {
    (mem.read_mem && mem.write_back && !mem.write_mem && mem.wrt_reg == rs && rs != 0)
        .then_some(next_wb.store_data)
}

/// MEM-to-ID forwarding for an ALU result in MEM.
///
/// Same source as the load case: the value travels through the next-cycle WB
/// latch the MEM stage has just written.
pub fn forward_alu_from_mem(mem: &MemLatch, next_wb: &WbLatch, rs: usize) -> Option<i32> {
    (!mem.read_mem && mem.write_back && !mem.write_mem && mem.wrt_reg == rs && rs != 0)
        .then_some(next_wb.store_data)
}

/// EX-to-ID forwarding for an ALU result in EX.
///
/// The result has just been placed in the next-cycle MEM latch by the EX
/// stage this cycle.
pub fn forward_alu_from_ex(ex: &ExLatch, next_mem: &MemLatch, rs: usize) -> Option<i32> {
    (!ex.read_mem && ex.write_back && !ex.write_mem && ex.dest == rs && rs != 0)
        .then_some(next_mem.store_data)
}

/// EX-to-ID forwarding for a branch predicate operand.
///
/// Branch resolution checks EX before MEM, guarding the later MEM clause so
/// the closer producer wins.
pub fn branch_forward_from_ex(ex: &ExLatch, next_mem: &MemLatch, rs: usize) -> Option<i32> {
    (ex.write_back && ex.dest != 0 && ex.dest == rs && rs != 0).then_some(next_mem.store_data)
}

/// MEM-to-ID forwarding for a branch predicate operand.
///
/// Applies only when the EX clause did not match the same register.
pub fn branch_forward_from_mem(
    ex: &ExLatch,
    mem: &MemLatch,
    next_wb: &WbLatch,
    rs: usize,
) -> Option<i32> {
    let ex_matched = ex.write_back && ex.dest != 0 && ex.dest == rs;
    (mem.write_back && mem.wrt_reg != 0 && !ex_matched && mem.wrt_reg == rs && rs != 0)
        .then_some(next_wb.store_data)
}
