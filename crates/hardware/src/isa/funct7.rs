//! Function codes (bits 31-25) for R-type instructions.

/// Standard encoding (ADD, XOR, OR, AND).
pub const BASE: u32 = 0b0000000;

/// Alternate encoding (SUB).
pub const ALT: u32 = 0b0100000;
