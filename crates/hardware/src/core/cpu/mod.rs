//! Single-cycle reference core.
//!
//! Executes one instruction per cycle in a flat IF→ID→EX→MEM→WB sequence
//! with no latches and no hazards. It is the correctness oracle for the
//! register-file and data-memory outputs of the pipelined engine; its own
//! per-cycle state dump is just the PC and the nop flag.

use crate::common::constants::HALT_WORD;
use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::IfLatch;
use crate::isa::decode::decode;
use crate::isa::instruction::{Format, Mnemonic};
use crate::mem::dmem::DataMem;
use crate::mem::imem::InstrMem;

/// Single-cycle reference core.
#[derive(Debug)]
pub struct SingleCycleCore {
    state: IfLatch,
    rf: RegisterFile,
    dmem: DataMem,
    cycle: u32,
    halted: bool,
}

impl SingleCycleCore {
    /// Creates a core over its own data memory.
    pub fn new(dmem: DataMem) -> Self {
        Self {
            state: IfLatch::default(),
            rf: RegisterFile::new(),
            dmem,
            cycle: 0,
            halted: false,
        }
    }

    /// Fetches and atomically executes one instruction.
    ///
    /// The sentinel flushes the cycle: the PC freezes, the nop flag raises,
    /// and the following cycle retires the run (bumping the instruction
    /// counter once more, as the reference outputs expect).
    ///
    /// # Errors
    ///
    /// Propagates fatal fetch, decode, and data-memory failures.
    pub fn step(&mut self, imem: &InstrMem) -> Result<(), SimError> {
        let mut next = self.state.clone();

        let word = imem.read_instr(self.state.pc)?;
        if word == HALT_WORD {
            next.nop = true;
        } else {
            next.pc = next.pc.wrapping_add(4);
            next.instruction_count = next.instruction_count.wrapping_add(1);
            self.execute(word, &mut next)?;
        }

        if self.state.nop {
            next.instruction_count = next.instruction_count.wrapping_add(1);
            self.halted = true;
        }

        self.state = next;
        self.cycle += 1;
        Ok(())
    }

    /// Decodes and executes a non-sentinel word against architectural state.
    fn execute(&mut self, word: u32, next: &mut IfLatch) -> Result<(), SimError> {
        let d = decode(word)?;
        tracing::trace!(instr = %d, pc = self.state.pc, "SS execute");

        match d.format {
            Format::B => {
                let taken = match d.mnemonic {
                    Mnemonic::Beq => self.rf.read(d.rs1) == self.rf.read(d.rs2),
                    _ => self.rf.read(d.rs1) != self.rf.read(d.rs2),
                };
                next.pc = if taken {
                    self.state.pc.wrapping_add_signed(d.imm)
                } else {
                    self.state.pc.wrapping_add(4)
                };
            }
            Format::J => {
                self.rf
                    .write(d.rd, self.state.pc.wrapping_add(4) as i32);
                next.pc = self.state.pc.wrapping_add_signed(d.imm);
            }
            Format::R => {
                let a = self.rf.read(d.rs1);
                let b = self.rf.read(d.rs2);
                let result = match d.mnemonic {
                    Mnemonic::Sub => a.wrapping_sub(b),
                    Mnemonic::Xor => a ^ b,
                    Mnemonic::Or => a | b,
                    Mnemonic::And => a & b,
                    _ => a.wrapping_add(b),
                };
                self.rf.write(d.rd, result);
            }
            Format::IImm => {
                let a = self.rf.read(d.rs1);
                let result = match d.mnemonic {
                    Mnemonic::Xori => a ^ d.imm,
                    Mnemonic::Ori => a | d.imm,
                    Mnemonic::Andi => a & d.imm,
                    _ => a.wrapping_add(d.imm),
                };
                self.rf.write(d.rd, result);
            }
            Format::ILoad => {
                let address = self.rf.read(d.rs1).wrapping_add(d.imm);
                let value = self.dmem.read_word(address as u32)?;
                self.rf.write(d.rd, value);
            }
            Format::S => {
                let address = self.rf.read(d.rs1).wrapping_add(d.imm);
                self.dmem.write_word(address as u32, self.rf.read(d.rs2));
            }
            Format::Halt => {}
        }
        Ok(())
    }

    /// The IF view after the last executed cycle (PC and nop flag).
    pub fn state(&self) -> &IfLatch {
        &self.state
    }

    /// The architectural register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.rf
    }

    /// The core's data memory.
    pub fn data_memory(&self) -> &DataMem {
        &self.dmem
    }

    /// Number of cycles executed so far.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Instructions retired so far (including the final retire bump).
    pub fn instruction_count(&self) -> u32 {
        self.state.instruction_count
    }

    /// Whether the sentinel has been seen and the final cycle flushed.
    pub fn halted(&self) -> bool {
        self.halted
    }
}
