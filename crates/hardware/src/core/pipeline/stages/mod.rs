//! Pipeline stage implementations.
//!
//! Each stage is a function from the previous-cycle pipeline state to the
//! under-construction next state:
//! 1. **Writeback:** Commits results to the register file.
//! 2. **Memory:** Performs data loads and stores.
//! 3. **Execute:** Computes ALU results and memory addresses.
//! 4. **Decode:** Reads operands, applies forwarding and stalls, resolves
//!    branches and jumps.
//! 5. **Fetch:** Reads the next instruction word and advances the PC.
//!
//! The engine runs them in exactly that (reverse) order, so decode can read
//! the next-cycle MEM and WB latches that execute and memory have just
//! produced, which is how forwarding receives same-cycle values.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;

/// Same-cycle directives from decode to fetch.
///
/// Decode runs before fetch within a cycle and can change what fetch does:
/// a resolved branch or jump squashes the in-flight fetch, and a load-use
/// stall rewinds the fetch address so the same word is re-fetched.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchControl {
    /// Suppress this cycle's fetch and nop-propagate the ID latch.
    pub squash: bool,
    /// Fetch from `PC - 4` to repeat the stalled instruction's fetch.
    pub pc_rewind: bool,
}
