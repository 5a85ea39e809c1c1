//! Simulator configuration.
//!
//! Two knobs come in from the command line: the I/O directory holding the
//! input images and receiving every output file, and an optional test root.
//! When the test root is set, images are read from its `TC1` subdirectory
//! instead of the I/O directory; outputs always land in the I/O directory.

use std::path::{Path, PathBuf};

/// Resolved simulator configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the input images and receiving the outputs.
    pub iodir: PathBuf,
    /// Alternative test root; images come from `<testpath>/TC1` when set.
    pub testpath: Option<PathBuf>,
}

impl Config {
    /// Creates a configuration.
    pub fn new(iodir: PathBuf, testpath: Option<PathBuf>) -> Self {
        Self { iodir, testpath }
    }

    /// Directory the input images are loaded from.
    pub fn input_dir(&self) -> PathBuf {
        self.testpath
            .as_ref()
            .map_or_else(|| self.iodir.clone(), |root| root.join("TC1"))
    }

    /// Directory every output file is written into.
    pub fn output_dir(&self) -> &Path {
        &self.iodir
    }
}
