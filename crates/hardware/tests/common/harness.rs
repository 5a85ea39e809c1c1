//! Run harnesses: assemble programs, run engines, capture per-cycle state.

use std::fs;
use std::path::Path;

use rv32sim_core::core::pipeline::latches::PipelineState;
use rv32sim_core::mem::{DataMem, InstrMem};
use rv32sim_core::{FiveStageCore, SingleCycleCore};

/// Upper bound on cycles before a run is declared hung.
pub const MAX_CYCLES: u32 = 500;

/// Assembles instruction words into a big-endian byte image.
pub fn imem_from_words(words: &[u32]) -> InstrMem {
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    InstrMem::new(bytes)
}

/// Runs the pipelined engine to completion over an empty data image.
pub fn run_pipeline(words: &[u32]) -> FiveStageCore {
    run_pipeline_with_dmem(words, &[])
}

/// Runs the pipelined engine to completion over the given data image.
pub fn run_pipeline_with_dmem(words: &[u32], dmem: &[u8]) -> FiveStageCore {
    let imem = imem_from_words(words);
    let mut core = FiveStageCore::new(DataMem::new(dmem.to_vec()));
    while !core.halted() {
        assert!(core.cycle() < MAX_CYCLES, "pipeline failed to halt");
        core.step(&imem).unwrap();
    }
    core
}

/// Runs the pipelined engine to completion, returning the core together
/// with the committed state snapshot after every cycle.
pub fn trace_pipeline(words: &[u32]) -> (FiveStageCore, Vec<PipelineState>) {
    let imem = imem_from_words(words);
    let mut core = FiveStageCore::new(DataMem::new(Vec::new()));
    let mut snapshots = Vec::new();
    while !core.halted() {
        assert!(core.cycle() < MAX_CYCLES, "pipeline failed to halt");
        core.step(&imem).unwrap();
        snapshots.push(core.state().clone());
    }
    (core, snapshots)
}

/// Runs the single-cycle engine to completion over an empty data image.
pub fn run_single(words: &[u32]) -> SingleCycleCore {
    run_single_with_dmem(words, &[])
}

/// Runs the single-cycle engine to completion over the given data image.
pub fn run_single_with_dmem(words: &[u32], dmem: &[u8]) -> SingleCycleCore {
    let imem = imem_from_words(words);
    let mut core = SingleCycleCore::new(DataMem::new(dmem.to_vec()));
    while !core.halted() {
        assert!(core.cycle() < MAX_CYCLES, "reference core failed to halt");
        core.step(&imem).unwrap();
    }
    core
}

/// Writes a byte image in the plain-text format (one byte per line, eight
/// binary digits).
pub fn write_image(path: &Path, bytes: &[u8]) {
    let mut out = String::new();
    for byte in bytes {
        out.push_str(&format!("{byte:08b}\n"));
    }
    fs::write(path, out).unwrap();
}

/// Writes `imem.txt` and `dmem.txt` for a program into `dir`.
pub fn write_program_files(dir: &Path, words: &[u32], dmem: &[u8]) {
    let mut image = Vec::with_capacity(words.len() * 4);
    for word in words {
        image.extend_from_slice(&word.to_be_bytes());
    }
    write_image(&dir.join("imem.txt"), &image);
    write_image(&dir.join("dmem.txt"), dmem);
}
