//! RV32I instruction set support.
//!
//! Decoding and disassembly for the simulated subset of the base integer
//! instruction set.
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes (Load, Store, Branch, Jal, OpImm, OpReg).
//! - `funct3`: Minor opcodes distinguishing instructions within a major opcode.
//! - `funct7`: Additional opcode bits for R-type instructions.
//! - `instruction`: Field extraction and the `Decoded` record.
//! - `decode`: Logic to decode raw instruction bits into a `Decoded` record.
//! - `disasm`: Human-readable rendering of decoded instructions.

/// Instruction decoding.
pub mod decode;

/// Disassembly of decoded instructions.
pub mod disasm;

/// Function code 3 definitions.
pub mod funct3;

/// Function code 7 definitions.
pub mod funct7;

/// Instruction field extraction and the decoded record.
pub mod instruction;

/// Major opcodes.
pub mod opcodes;
