//! Major opcodes (bits 6-0) for the simulated RV32I subset.

/// Load instructions (LW; LB is accepted and performed as a word load).
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI, XORI, ORI, ANDI).
pub const OP_IMM: u32 = 0b0010011;

/// Store instructions (SW).
pub const OP_STORE: u32 = 0b0100011;

/// Register-register arithmetic (ADD, SUB, XOR, OR, AND).
pub const OP_REG: u32 = 0b0110011;

/// Conditional branch instructions (BEQ, BNE).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump and link (JAL).
pub const OP_JAL: u32 = 0b1101111;
