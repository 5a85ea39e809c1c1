//! RV32I cycle-accurate simulator library.
//!
//! This crate implements two reference executions of the same RV32I program:
//! 1. **Pipelined engine:** a five-stage pipeline (IF, ID, EX, MEM, WB) with
//!    data hazard detection, operand forwarding, load-use stalling, and
//!    stall-by-squash control flow.
//! 2. **Single-cycle engine:** one instruction per cycle, used as the
//!    correctness oracle for the register file and data memory.
//! 3. **ISA:** decoding and disassembly for the supported RV32I subset
//!    (ADD/SUB/XOR/OR/AND, ADDI/XORI/ORI/ANDI, LW, SW, BEQ/BNE, JAL, HALT).
//! 4. **Memories:** read-only instruction image and extendable big-endian
//!    data memory, loaded from plain-text images.
//! 5. **Simulation:** lockstep driver, image loaders, per-cycle dump writers,
//!    and performance metrics.

/// Common types (register file, errors, system-wide constants).
pub mod common;
/// Simulator configuration (I/O directory resolution).
pub mod config;
/// Execution engines: the single-cycle core and the five-stage pipeline.
pub mod core;
/// Instruction set (decode, instruction fields, disassembly).
pub mod isa;
/// Instruction and data memory images.
pub mod mem;
/// Simulation: lockstep driver, image loaders, and output writers.
pub mod sim;
/// Performance metrics collection and reporting.
pub mod stats;

/// Root configuration type; built from CLI arguments.
pub use crate::config::Config;
/// Single-cycle reference engine.
pub use crate::core::cpu::SingleCycleCore;
/// Five-stage pipelined engine.
pub use crate::core::pipeline::engine::FiveStageCore;
/// Top-level lockstep driver; owns both engines and the output writers.
pub use crate::sim::simulator::Simulator;
