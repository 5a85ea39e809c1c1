//! Lockstep driver for the two engines.
//!
//! Owns the shared instruction image, both cores (each over its own copy of
//! the data image), and the per-core output writers. One loop iteration
//! steps each non-halted core once and dumps its register file and state;
//! the loop ends when both cores have halted, after which the final
//! data-memory images and the performance report are written.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::cpu::SingleCycleCore;
use crate::core::pipeline::engine::FiveStageCore;
use crate::mem::dmem::DataMem;
use crate::mem::imem::InstrMem;
use crate::sim::loader::load_image;
use crate::sim::output::{
    PipelineStateWriter, RegisterDumpWriter, SingleStageStateWriter, write_data_memory,
};
use crate::stats::{PerfMetrics, write_report};

/// Top-level simulator: both engines plus their output writers.
#[derive(Debug)]
pub struct Simulator {
    imem: InstrMem,
    single: SingleCycleCore,
    pipeline: FiveStageCore,
    config: Config,
    single_rf: RegisterDumpWriter,
    pipeline_rf: RegisterDumpWriter,
    single_state: SingleStageStateWriter,
    pipeline_state: PipelineStateWriter,
}

impl Simulator {
    /// Loads the input images and builds both engines.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] when an image is missing and
    /// [`SimError::MalformedImage`] when one is not in the expected format.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let input = config.input_dir();
        let imem = InstrMem::new(load_image(&input.join("imem.txt"))?);
        let dmem_bytes = load_image(&input.join("dmem.txt"))?;

        let out = config.output_dir();
        Ok(Self {
            imem,
            single: SingleCycleCore::new(DataMem::new(dmem_bytes.clone())),
            pipeline: FiveStageCore::new(DataMem::new(dmem_bytes)),
            config: config.clone(),
            single_rf: RegisterDumpWriter::new(out.join("SS_RFResult.txt")),
            pipeline_rf: RegisterDumpWriter::new(out.join("FS_RFResult.txt")),
            single_state: SingleStageStateWriter::new(out.join("StateResult_SS.txt")),
            pipeline_state: PipelineStateWriter::new(out.join("StateResult_FS.txt")),
        })
    }

    /// Runs both engines in lockstep until both halt, then writes the final
    /// data-memory images and the performance report.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal error of either engine or writer.
    pub fn run(&mut self) -> Result<(), SimError> {
        loop {
            if !self.single.halted() {
                let cycle = self.single.cycle();
                self.single.step(&self.imem)?;
                self.single_rf.dump(self.single.registers(), cycle)?;
                self.single_state.dump(self.single.state(), cycle)?;
            }

            if !self.pipeline.halted() {
                let cycle = self.pipeline.cycle();
                self.pipeline.step(&self.imem)?;
                self.pipeline_rf.dump(self.pipeline.registers(), cycle)?;
                self.pipeline_state.dump(self.pipeline.state(), cycle)?;
            }

            if self.single.halted() && self.pipeline.halted() {
                break;
            }
        }

        let out = self.config.output_dir();
        write_data_memory(&out.join("SS_DMEMResult.txt"), self.single.data_memory())?;
        write_data_memory(&out.join("FS_DMEMResult.txt"), self.pipeline.data_memory())?;

        let report = out.join("PerformanceMetrics_Result.txt");
        let ss = PerfMetrics::new(
            "Single Stage",
            self.single.cycle(),
            self.single.instruction_count(),
        );
        let fs = PerfMetrics::new(
            "Five Stage",
            self.pipeline.cycle(),
            self.pipeline.instruction_count(),
        );
        write_report(&report, &ss, true)?;
        write_report(&report, &fs, false)?;
        Ok(())
    }

    /// The single-cycle engine.
    pub fn single_cycle(&self) -> &SingleCycleCore {
        &self.single
    }

    /// The pipelined engine.
    pub fn pipeline(&self) -> &FiveStageCore {
        &self.pipeline
    }
}
