//! Pipeline engine: reverse-order per-cycle update and halt propagation.
//!
//! One [`step`](FiveStageCore::step) evaluates the five stages from WB back
//! to IF, building the next pipeline snapshot from the current one. The
//! snapshot starts as a copy of the current state, so any latch field a
//! stage leaves untouched retains its previous value — which is exactly how
//! empty slots keep their last data fields visible in the dumps.
//!
//! Halt begins when fetch reads the all-ones sentinel: the PC freezes and
//! in-flight instructions drain through the remaining stages. Once every
//! latch reports nop (or halt), the engine sets `halted` and bumps the
//! instruction counter one final time; the metrics divide by the bumped
//! count, matching the reference outputs.

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::PipelineState;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::mem::dmem::DataMem;
use crate::mem::imem::InstrMem;

/// Five-stage pipelined core.
#[derive(Debug)]
pub struct FiveStageCore {
    state: PipelineState,
    rf: RegisterFile,
    dmem: DataMem,
    cycle: u32,
    halted: bool,
}

impl FiveStageCore {
    /// Creates a core over its own data memory, with the pipeline bubbled.
    pub fn new(dmem: DataMem) -> Self {
        Self {
            state: PipelineState::initial(),
            rf: RegisterFile::new(),
            dmem,
            cycle: 0,
            halted: false,
        }
    }

    /// Advances the pipeline by one cycle.
    ///
    /// # Errors
    ///
    /// Propagates fatal fetch, decode, and data-memory failures; the caller
    /// aborts the simulation on any of them.
    pub fn step(&mut self, imem: &InstrMem) -> Result<(), SimError> {
        let mut next = self.state.clone();

        wb_stage(&self.state, &mut self.rf);
        mem_stage(&self.state, &mut next, &mut self.dmem)?;
        execute_stage(&self.state, &mut next);
        let ctrl = decode_stage(&self.state, &mut next, &self.rf)?;
        fetch_stage(&self.state, &mut next, imem, ctrl)?;

        // Drained when every stage reports nop or halt. The fetch slot also
        // counts as empty when decode squashed it this very cycle.
        let drained = (self.state.fetch.halt || self.state.fetch.nop || ctrl.squash)
            && (self.state.decode.halt || self.state.decode.nop)
            && (self.state.execute.halt || self.state.execute.nop)
            && (self.state.memory.halt || self.state.memory.nop)
            && (self.state.writeback.halt || self.state.writeback.nop);
        if drained {
            next.fetch.instruction_count = self.state.fetch.instruction_count.wrapping_add(1);
            self.halted = true;
            tracing::trace!(cycle = self.cycle, "pipeline drained");
        }

        self.state = next;
        self.cycle += 1;
        Ok(())
    }

    /// The committed pipeline state after the last executed cycle.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The architectural register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.rf
    }

    /// The core's data memory.
    pub fn data_memory(&self) -> &DataMem {
        &self.dmem
    }

    /// Number of cycles executed so far.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Instructions fetched so far (including the final drain bump).
    pub fn instruction_count(&self) -> u32 {
        self.state.fetch.instruction_count
    }

    /// Whether the pipeline has fully drained after the halt sentinel.
    pub fn halted(&self) -> bool {
        self.halted
    }
}
