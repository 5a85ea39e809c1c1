//! Disassembly of decoded instructions.
//!
//! Renders a [`Decoded`] record in conventional assembly syntax, used by the
//! trace log when narrating per-stage pipeline activity.

use std::fmt;

use crate::isa::instruction::{Decoded, Format, Mnemonic};

impl Decoded {
    /// Lower-case assembly mnemonic of this instruction.
    pub fn name(&self) -> &'static str {
        match self.mnemonic {
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Xor => "xor",
            Mnemonic::Or => "or",
            Mnemonic::And => "and",
            Mnemonic::Addi => "addi",
            Mnemonic::Xori => "xori",
            Mnemonic::Ori => "ori",
            Mnemonic::Andi => "andi",
            Mnemonic::Lw => "lw",
            Mnemonic::Sw => "sw",
            Mnemonic::Beq => "beq",
            Mnemonic::Bne => "bne",
            Mnemonic::Jal => "jal",
            Mnemonic::Halt => "halt",
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            Format::R => write!(
                f,
                "{} x{}, x{}, x{}",
                self.name(),
                self.rd,
                self.rs1,
                self.rs2
            ),
            Format::IImm => write!(f, "{} x{}, x{}, {}", self.name(), self.rd, self.rs1, self.imm),
            Format::ILoad => write!(f, "{} x{}, {}(x{})", self.name(), self.rd, self.imm, self.rs1),
            Format::S => write!(f, "{} x{}, {}(x{})", self.name(), self.rs2, self.imm, self.rs1),
            Format::B => write!(
                f,
                "{} x{}, x{}, {}",
                self.name(),
                self.rs1,
                self.rs2,
                self.imm
            ),
            Format::J => write!(f, "{} x{}, {}", self.name(), self.rd, self.imm),
            Format::Halt => write!(f, "{}", self.name()),
        }
    }
}
