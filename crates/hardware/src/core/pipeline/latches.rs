//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the buffers that connect the five stages of the
//! pipeline. One instance of each latch exists per engine; the textual
//! rendering of these latches (see [`render`](crate::core::pipeline::render))
//! is the engine's observable output.
//!
//! A latch with `nop` set must not cause an architectural side effect: no
//! register write, no memory write, no PC redirection. Nop latches still
//! retain their data fields so the per-cycle dumps show the last in-flight
//! instruction view.

use crate::isa::instruction::Decoded;

/// IF-stage latch: program counter and fetch bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IfLatch {
    /// Fetch is suppressed this cycle (squash or end-of-program).
    pub nop: bool,
    /// Program counter of the next fetch.
    pub pc: u32,
    /// Count of instructions fetched, for the performance metrics.
    pub instruction_count: u32,
    /// End-of-program marker.
    pub halt: bool,
}

/// IF/ID latch: the fetched instruction word awaiting decode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdLatch {
    /// The slot carries no live instruction this cycle.
    pub nop: bool,
    /// Fetched instruction word; `None` before the first fetch.
    pub instr: Option<u32>,
    /// End-of-program marker.
    pub halt: bool,
}

/// ID/EX latch: decoded instruction, operands, and control flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExLatch {
    /// The slot carries no live instruction this cycle.
    pub nop: bool,
    /// Decoded instruction record; `None` for startup and bubble slots.
    pub decoded: Option<Decoded>,
    /// Raw instruction word, retained for display even in bubbles.
    pub instr: Option<u32>,
    /// First ALU operand (rs1 value after forwarding).
    pub operand1: i32,
    /// Second ALU operand (rs2 value after forwarding; 0 for I/J formats).
    pub operand2: i32,
    /// Store data (rs2 value for stores, return address for JAL).
    pub store_data: i32,
    /// Destination register index.
    pub dest: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended immediate.
    pub imm: i32,
    /// Set for every format that carries an immediate (I, S, B, J).
    pub is_i_type: bool,
    /// The MEM stage must read data memory.
    pub read_mem: bool,
    /// The MEM stage must write data memory.
    pub write_mem: bool,
    /// The WB stage must write the destination register.
    pub write_back: bool,
    /// End-of-program marker.
    pub halt: bool,
}

impl ExLatch {
    /// A clean stall bubble that keeps the stalled instruction word visible
    /// in the dump while carrying no architectural effect.
    pub fn bubble(instr: Option<u32>) -> Self {
        Self {
            nop: true,
            instr,
            ..Self::default()
        }
    }
}

/// EX/MEM latch: ALU result and memory operation parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemLatch {
    /// The slot carries no live instruction this cycle.
    pub nop: bool,
    /// Decoded instruction record; `None` for startup and bubble slots.
    pub decoded: Option<Decoded>,
    /// ALU computation result (address for loads and stores).
    pub alu_result: i32,
    /// Address for the data-memory access.
    pub data_address: i32,
    /// Data to store, or the value passed through to writeback.
    pub store_data: i32,
    /// Destination register index for writeback.
    pub wrt_reg: usize,
    /// First source register index (propagated for display).
    pub rs1: usize,
    /// Second source register index (propagated for display).
    pub rs2: usize,
    /// Read data memory this cycle.
    pub read_mem: bool,
    /// Write data memory this cycle.
    pub write_mem: bool,
    /// The WB stage must write the destination register.
    pub write_back: bool,
    /// End-of-program marker.
    pub halt: bool,
}

/// MEM/WB latch: the value to commit to the register file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WbLatch {
    /// The slot carries no live instruction this cycle.
    pub nop: bool,
    /// Decoded instruction record; `None` for startup and bubble slots.
    pub decoded: Option<Decoded>,
    /// Value to write back (ALU result or loaded word).
    pub store_data: i32,
    /// Destination register index.
    pub wrt_reg: usize,
    /// First source register index (propagated for display).
    pub rs1: usize,
    /// Second source register index (propagated for display).
    pub rs2: usize,
    /// Commit `store_data` to `wrt_reg` this cycle.
    pub write_back: bool,
    /// End-of-program marker.
    pub halt: bool,
}

/// Complete pipeline state: one latch per stage boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineState {
    /// IF-stage latch.
    pub fetch: IfLatch,
    /// IF/ID latch.
    pub decode: IdLatch,
    /// ID/EX latch.
    pub execute: ExLatch,
    /// EX/MEM latch.
    pub memory: MemLatch,
    /// MEM/WB latch.
    pub writeback: WbLatch,
}

impl PipelineState {
    /// Startup state: IF live, every downstream latch a nop.
    pub fn initial() -> Self {
        let mut state = Self::default();
        state.decode.nop = true;
        state.execute.nop = true;
        state.memory.nop = true;
        state.writeback.nop = true;
        state
    }
}
