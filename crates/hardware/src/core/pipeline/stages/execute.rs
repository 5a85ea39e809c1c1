//! Execute (EX) stage.
//!
//! Computes the ALU result for the instruction in the EX latch and writes the
//! next-cycle MEM latch. Loads and stores compute their data address here;
//! JAL passes its already-captured return address through; branches never
//! appear live in EX because they resolve in decode and travel as nops.

use crate::core::pipeline::latches::{MemLatch, PipelineState};
use crate::isa::instruction::Mnemonic;

/// Executes the execute stage, writing the next-cycle MEM latch.
pub fn execute_stage(prev: &PipelineState, next: &mut PipelineState) {
    let ex = &prev.execute;

    let Some(decoded) = ex.decoded.as_ref().filter(|_| !ex.nop) else {
        // Empty slot: nop-propagate while retaining the previous MEM fields
        // for the dump.
        let mut mem = prev.memory.clone();
        mem.nop = true;
        mem.decoded = None;
        mem.halt = false;
        next.memory = mem;
        return;
    };

    tracing::trace!(instr = %decoded, "EX");

    next.memory = match decoded.mnemonic {
        Mnemonic::Add | Mnemonic::Sub | Mnemonic::Xor | Mnemonic::Or | Mnemonic::And => {
            let result = alu(decoded.mnemonic, ex.operand1, ex.operand2);
            MemLatch {
                nop: ex.nop,
                decoded: Some(decoded.clone()),
                alu_result: result,
                data_address: 0,
                store_data: result,
                wrt_reg: ex.dest,
                rs1: ex.rs1,
                rs2: ex.rs2,
                read_mem: false,
                write_mem: false,
                write_back: true,
                halt: ex.halt,
            }
        }
        Mnemonic::Addi | Mnemonic::Xori | Mnemonic::Ori | Mnemonic::Andi => {
            let result = alu(decoded.mnemonic, ex.operand1, ex.imm);
            MemLatch {
                nop: ex.nop,
                decoded: Some(decoded.clone()),
                alu_result: result,
                data_address: 0,
                store_data: result,
                wrt_reg: ex.dest,
                rs1: ex.rs1,
                rs2: ex.rs2,
                read_mem: false,
                write_mem: false,
                write_back: true,
                halt: ex.halt,
            }
        }
        Mnemonic::Lw => {
            let address = ex.operand1.wrapping_add(ex.imm);
            MemLatch {
                nop: ex.nop,
                decoded: Some(decoded.clone()),
                alu_result: address,
                data_address: address,
                store_data: 0,
                wrt_reg: ex.dest,
                rs1: ex.rs1,
                rs2: ex.rs2,
                read_mem: true,
                write_mem: false,
                write_back: true,
                halt: ex.halt,
            }
        }
        Mnemonic::Sw => {
            let address = ex.operand1.wrapping_add(ex.imm);
            MemLatch {
                nop: ex.nop,
                decoded: Some(decoded.clone()),
                alu_result: address,
                data_address: address,
                store_data: ex.store_data,
                wrt_reg: 0,
                rs1: ex.rs1,
                rs2: ex.rs2,
                read_mem: false,
                write_mem: true,
                write_back: false,
                halt: prev.decode.halt,
            }
        }
        Mnemonic::Jal => MemLatch {
            nop: false,
            decoded: Some(decoded.clone()),
            alu_result: ex.store_data,
            data_address: 0,
            store_data: ex.store_data,
            wrt_reg: ex.dest,
            rs1: ex.rs1,
            rs2: ex.rs2,
            read_mem: false,
            write_mem: false,
            write_back: true,
            halt: false,
        },
        // Branches resolve in decode and always occupy EX as nops; this arm
        // only fires if that invariant is broken, and produces a bubble.
        Mnemonic::Beq | Mnemonic::Bne | Mnemonic::Halt => MemLatch {
            nop: true,
            decoded: Some(decoded.clone()),
            rs1: ex.rs1,
            rs2: ex.rs2,
            ..MemLatch::default()
        },
    };
}

/// Two's-complement ALU over the register-register and register-immediate
/// operations of the subset.
fn alu(mnemonic: Mnemonic, a: i32, b: i32) -> i32 {
    match mnemonic {
        Mnemonic::Sub => a.wrapping_sub(b),
        Mnemonic::Xor | Mnemonic::Xori => a ^ b,
        Mnemonic::Or | Mnemonic::Ori => a | b,
        Mnemonic::And | Mnemonic::Andi => a & b,
        _ => a.wrapping_add(b),
    }
}
