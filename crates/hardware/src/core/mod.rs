//! Execution engines.
//!
//! Two engines execute the same program image:
//! 1. **`cpu`** — the single-cycle reference core: one instruction per cycle,
//!    executed atomically. It is the oracle for the register file and data
//!    memory.
//! 2. **`pipeline`** — the five-stage pipelined core with hazard detection,
//!    operand forwarding, and load-use stalling. Its per-cycle latch dumps
//!    are the system's observable output.

/// Single-cycle reference core.
pub mod cpu;

/// Five-stage pipelined core.
pub mod pipeline;
