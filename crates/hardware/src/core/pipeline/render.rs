//! Textual rendering of pipeline latches.
//!
//! The per-cycle latch dump is the engine's test oracle, so every rendering
//! detail here is load-bearing: booleans print as `True`/`False`, multi-bit
//! integers print as unsigned two's-complement truncated to the stated
//! width, and the EX immediate width follows the opcode of the instruction
//! word held in the latch (13 bits for branches, 21 for JAL, 12 otherwise).
//!
//! The EX `Wrt_reg_addr` field widens from 5 to 6 bits whenever the slot
//! carries an instruction that is squashed, stalled, or has writeback
//! disabled. The widening has no hardware meaning; it is a textual marker
//! preserved from the reference dumps.

use std::fmt;

use crate::core::pipeline::latches::{ExLatch, IdLatch, IfLatch, MemLatch, PipelineState, WbLatch};
use crate::isa::opcodes;

/// Python-style boolean rendering.
fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// 32-bit two's-complement binary rendering.
pub fn bin32(v: i32) -> String {
    format!("{:032b}", v as u32)
}

/// 5-bit register-index rendering.
fn bin5(v: usize) -> String {
    format!("{:05b}", v & 0x1F)
}

impl fmt::Display for IfLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF.nop: {}\nIF.PC: {}", py_bool(self.nop), self.pc)
    }
}

impl fmt::Display for IdLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.instr.map_or_else(String::new, |w| format!("{w:032b}"));
        write!(f, "ID.nop: {}\nID.Instr: {}", py_bool(self.nop), bits)
    }
}

impl ExLatch {
    /// Immediate rendering: width depends on the opcode of the held word.
    fn render_imm(&self) -> String {
        match self.instr {
            None => bin32(self.imm),
            Some(word) => match word & 0x7F {
                opcodes::OP_BRANCH => format!("{:013b}", (self.imm as u32) & 0x1FFF),
                opcodes::OP_JAL => format!("{:021b}", (self.imm as u32) & 0x1F_FFFF),
                _ => format!("{:012b}", (self.imm as u32) & 0xFFF),
            },
        }
    }

    /// Destination-register rendering: 5 bits for an empty slot or a live
    /// write-back, 6 bits for squashed or non-writeback slots.
    fn render_wrt_reg_addr(&self) -> String {
        if self.instr.is_none() || (!self.nop && self.write_back) {
            bin5(self.dest)
        } else {
            format!("{:06b}", self.dest & 0x3F)
        }
    }
}

impl fmt::Display for ExLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.instr.map_or_else(String::new, |w| format!("{w:032b}"));
        write!(
            f,
            "EX.nop: {}\n\
             EX.instr: {}\n\
             EX.Read_data1: {}\n\
             EX.Read_data2: {}\n\
             EX.Imm: {}\n\
             EX.Rs: {}\n\
             EX.Rt: {}\n\
             EX.Wrt_reg_addr: {}\n\
             EX.is_I_type: {}\n\
             EX.rd_mem: {}\n\
             EX.wrt_mem: {}\n\
             EX.alu_op: 00\n\
             EX.wrt_enable: {}",
            py_bool(self.nop),
            bits,
            bin32(self.operand1),
            bin32(self.operand2),
            self.render_imm(),
            bin5(self.rs1),
            bin5(self.rs2),
            self.render_wrt_reg_addr(),
            u8::from(self.is_i_type),
            u8::from(self.read_mem),
            u8::from(self.write_mem),
            u8::from(self.write_back),
        )
    }
}

impl fmt::Display for MemLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MEM.nop: {}\n\
             MEM.ALUresult: {}\n\
             MEM.Store_data: {}\n\
             MEM.Rs: {}\n\
             MEM.Rt: {}\n\
             MEM.Wrt_reg_addr: {}\n\
             MEM.rd_mem: {}\n\
             MEM.wrt_mem: {}\n\
             MEM.wrt_enable: {}",
            py_bool(self.nop),
            bin32(self.alu_result),
            bin32(self.store_data),
            bin5(self.rs1),
            bin5(self.rs2),
            bin5(self.wrt_reg),
            u8::from(self.read_mem),
            u8::from(self.write_mem),
            u8::from(self.write_back),
        )
    }
}

impl fmt::Display for WbLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WB.nop: {}\n\
             WB.Wrt_data: {}\n\
             WB.Rs: {}\n\
             WB.Rt: {}\n\
             WB.Wrt_reg_addr: {}\n\
             WB.wrt_enable: {}",
            py_bool(self.nop),
            bin32(self.store_data),
            bin5(self.rs1),
            bin5(self.rs2),
            bin5(self.wrt_reg),
            u8::from(self.write_back),
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}\n{}",
            self.fetch, self.decode, self.execute, self.memory, self.writeback
        )
    }
}
