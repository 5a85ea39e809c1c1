//! Instruction and data memory images.
//!
//! Both memories are byte-addressable sequences of 8-bit cells accessed at
//! word granularity: every access address is rounded down to the nearest
//! multiple of four, and words are assembled big-endian.

/// Read/write data memory image.
pub mod dmem;

/// Read-only instruction memory image.
pub mod imem;

pub use dmem::DataMem;
pub use imem::InstrMem;
