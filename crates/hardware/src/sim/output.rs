//! Per-cycle dump writers and final output formatters.
//!
//! Every per-cycle file follows the same discipline: cycle 0 truncates the
//! file, later cycles append. The formats are byte-exact test oracles —
//! header text, the tab in the register-file header, the 70-dash banner,
//! and the trailing newlines all match the reference outputs.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::constants::STATE_BANNER_WIDTH;
use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::{IfLatch, PipelineState};
use crate::core::pipeline::render::bin32;
use crate::mem::dmem::DataMem;

/// Truncate on the first cycle, append afterwards.
fn open_for_cycle(path: &Path, cycle: u32) -> Result<File, SimError> {
    let file = if cycle == 0 {
        File::create(path)?
    } else {
        OpenOptions::new().append(true).open(path)?
    };
    Ok(file)
}

/// The 70-dash separator banner.
fn banner() -> String {
    "-".repeat(STATE_BANNER_WIDTH)
}

/// Per-cycle register-file dump writer.
///
/// Each cycle emits 33 lines: a header naming the cycle, then the 32
/// registers as 32-bit two's-complement binary in index order.
#[derive(Debug)]
pub struct RegisterDumpWriter {
    path: PathBuf,
}

impl RegisterDumpWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Appends one cycle's register-file dump.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] on any file-system failure.
    pub fn dump(&self, rf: &RegisterFile, cycle: u32) -> Result<(), SimError> {
        let mut out = format!("State of RF after executing cycle:\t{cycle}\n");
        for value in rf.registers() {
            out.push_str(&bin32(*value));
            out.push('\n');
        }
        let mut file = open_for_cycle(&self.path, cycle)?;
        file.write_all(out.as_bytes())?;
        Ok(())
    }
}

/// Per-cycle state writer for the single-cycle engine.
///
/// The single-cycle dump is minimal: the PC and the nop flag.
#[derive(Debug)]
pub struct SingleStageStateWriter {
    path: PathBuf,
}

impl SingleStageStateWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Appends one cycle's state dump.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] on any file-system failure.
    pub fn dump(&self, state: &IfLatch, cycle: u32) -> Result<(), SimError> {
        let nop = if state.nop { "True" } else { "False" };
        let out = format!(
            "{}\nState after executing cycle: {cycle}\nIF.PC: {}\nIF.nop: {nop}\n",
            banner(),
            state.pc,
        );
        let mut file = open_for_cycle(&self.path, cycle)?;
        file.write_all(out.as_bytes())?;
        Ok(())
    }
}

/// Per-cycle state writer for the pipelined engine.
///
/// Emits the banner, the cycle header, and the five latch renderings
/// separated by single newlines.
#[derive(Debug)]
pub struct PipelineStateWriter {
    path: PathBuf,
}

impl PipelineStateWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Appends one cycle's latch dump.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] on any file-system failure.
    pub fn dump(&self, state: &PipelineState, cycle: u32) -> Result<(), SimError> {
        let out = format!(
            "{}\nState after executing cycle: {cycle}\n{state}\n",
            banner()
        );
        let mut file = open_for_cycle(&self.path, cycle)?;
        file.write_all(out.as_bytes())?;
        Ok(())
    }
}

/// Writes the final data-memory image, one byte per line as eight binary
/// digits.
///
/// # Errors
///
/// Returns [`SimError::Io`] on any file-system failure.
pub fn write_data_memory(path: &Path, dmem: &DataMem) -> Result<(), SimError> {
    let mut out = String::with_capacity(dmem.bytes().len() * 9);
    for byte in dmem.bytes() {
        out.push_str(&format!("{byte:08b}"));
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}
