//! Performance metrics collection and reporting.
//!
//! Both engines report the same three numbers: total cycles, cycles per
//! instruction, and instructions per cycle. The report file holds two
//! blocks, single-stage first (written with truncation) and five-stage
//! appended.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::common::error::SimError;

/// Width of the dash rule following the block title.
const TITLE_RULE_WIDTH: usize = 29;

/// Performance summary of one engine's run.
#[derive(Debug, Clone, Copy)]
pub struct PerfMetrics {
    /// Block label ("Single Stage" or "Five Stage").
    pub label: &'static str,
    /// Total cycles executed.
    pub cycles: u32,
    /// Instructions counted (including the final drain bump).
    pub instructions: u32,
}

impl PerfMetrics {
    /// Creates a summary.
    pub fn new(label: &'static str, cycles: u32, instructions: u32) -> Self {
        Self {
            label,
            cycles,
            instructions,
        }
    }

    /// Cycles per instruction.
    pub fn cpi(&self) -> f64 {
        f64::from(self.cycles) / f64::from(self.instructions)
    }

    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        1.0 / self.cpi()
    }

    /// Renders the metrics block.
    pub fn render(&self) -> String {
        format!(
            "{} Core Performance Metrics{}\n\
             Number of cycles taken: {}\n\
             Cycles per instruction: {}\n\
             Instructions per cycle: {}\n",
            self.label,
            "-".repeat(TITLE_RULE_WIDTH),
            self.cycles,
            format_ratio(self.cpi()),
            format_ratio(self.ipc()),
        )
    }
}

/// Shortest round-trip float rendering; whole ratios keep a trailing `.0`.
fn format_ratio(value: f64) -> String {
    format!("{value:?}")
}

/// Appends (or, for the first block, truncates and writes) one metrics
/// block to the report file.
///
/// # Errors
///
/// Returns [`SimError::Io`] on any file-system failure.
pub fn write_report(path: &Path, metrics: &PerfMetrics, truncate: bool) -> Result<(), SimError> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(truncate)
        .append(!truncate)
        .open(path)?;
    file.write_all(metrics.render().as_bytes())?;
    Ok(())
}
