//! Function codes (bits 14-12) distinguishing instructions that share a
//! major opcode.

/// Add / Subtract (also ADDI under `OP_IMM`).
pub const ADD_SUB: u32 = 0b000;
/// Bitwise XOR (also XORI).
pub const XOR: u32 = 0b100;
/// Bitwise OR (also ORI).
pub const OR: u32 = 0b110;
/// Bitwise AND (also ANDI).
pub const AND: u32 = 0b111;

/// Load Byte. Accepted and performed as an aligned word load.
pub const LB: u32 = 0b000;
/// Load Word.
pub const LW: u32 = 0b010;

/// Store Word.
pub const SW: u32 = 0b010;

/// Branch Equal.
pub const BEQ: u32 = 0b000;
/// Branch Not Equal.
pub const BNE: u32 = 0b001;
