//! Memory access (MEM) stage.
//!
//! The sole writer of data memory: at most one store happens per cycle.
//! Loads place the fetched word into the next-cycle WB latch; stores commit
//! and hand a cleared WB latch downstream; everything else passes its value
//! through unchanged.

use crate::common::error::SimError;
use crate::core::pipeline::latches::{PipelineState, WbLatch};
use crate::mem::dmem::DataMem;

/// Executes the memory stage, writing the next-cycle WB latch.
///
/// # Errors
///
/// Returns [`SimError::DataOutOfBounds`] when a load reads past the current
/// data-memory extent.
pub fn mem_stage(
    prev: &PipelineState,
    next: &mut PipelineState,
    dmem: &mut DataMem,
) -> Result<(), SimError> {
    let mem = &prev.memory;

    if mem.nop {
        // Empty slot: nop-propagate while retaining the previous WB data
        // fields for the dump.
        next.writeback = WbLatch {
            nop: true,
            decoded: None,
            store_data: prev.writeback.store_data,
            wrt_reg: prev.writeback.wrt_reg,
            rs1: prev.writeback.rs1,
            rs2: prev.writeback.rs2,
            write_back: prev.writeback.write_back,
            halt: false,
        };
        return Ok(());
    }

    if mem.write_mem {
        if let Some(decoded) = &mem.decoded {
            tracing::trace!(instr = %decoded, addr = mem.data_address, value = mem.store_data, "MEM store");
        }
        dmem.write_word(mem.data_address as u32, mem.store_data);
        // A store retires here: the WB latch it hands on carries only the
        // source-register view, with write-back disabled.
        next.writeback = WbLatch {
            nop: false,
            decoded: mem.decoded.clone(),
            store_data: 0,
            wrt_reg: 0,
            rs1: mem.rs1,
            rs2: mem.rs2,
            write_back: false,
            halt: false,
        };
        return Ok(());
    }

    let mut wb = WbLatch {
        nop: mem.nop,
        decoded: mem.decoded.clone(),
        store_data: mem.store_data,
        wrt_reg: mem.wrt_reg,
        rs1: mem.rs1,
        rs2: mem.rs2,
        write_back: mem.write_back,
        halt: mem.halt,
    };
    if mem.read_mem {
        wb.store_data = dmem.read_word(mem.data_address as u32)?;
        if let Some(decoded) = &mem.decoded {
            tracing::trace!(instr = %decoded, addr = mem.data_address, value = wb.store_data, "MEM load");
        }
    }
    next.writeback = wb;
    Ok(())
}
