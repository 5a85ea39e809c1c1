//! Simulation: lockstep driver, image loaders, and output writers.
//!
//! The driver advances both engines one cycle per iteration until both have
//! halted, dumping the register file and machine state after every cycle,
//! then emits the final data-memory images and the performance report.

/// Plain-text memory-image loader.
pub mod loader;

/// Per-cycle dump writers and final output formatters.
pub mod output;

/// The lockstep driver.
pub mod simulator;
