//! Simulation error definitions.
//!
//! Every fatal condition of the simulator is represented here. Nothing is
//! retried: the halt sentinel is the only tolerated end-of-program signal,
//! and any other failure aborts the run with a descriptive message.

use thiserror::Error;

/// Fatal simulation errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// Instruction fetch past the end of the loaded instruction image.
    #[error("instruction memory: out of bound access at address {0}")]
    InstructionOutOfBounds(u32),

    /// Data-memory read past the current extent of the data image.
    ///
    /// Writes past the end extend the memory instead; only reads fail.
    #[error("data memory: out of bound access at address {0}")]
    DataOutOfBounds(u32),

    /// An instruction word that is neither the halt sentinel nor a member of
    /// the supported RV32I subset.
    #[error("invalid instruction to decode: {0:#010x}")]
    InvalidInstruction(u32),

    /// A memory-image line that is not exactly eight binary digits.
    #[error("malformed memory image at line {line}: expected 8 binary digits, got {token:?}")]
    MalformedImage {
        /// One-based line number within the image file.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// Propagated file-system failure from an image loader or dump writer.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
