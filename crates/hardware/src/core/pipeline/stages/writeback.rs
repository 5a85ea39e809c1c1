//! Writeback (WB) stage.
//!
//! The final stage of the pipeline and the sole writer of the register file:
//! at most one register commit happens per cycle. A nop latch, a disabled
//! write-back flag, or destination `x0` all make the cycle a no-op.

use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::PipelineState;

/// Executes the writeback stage.
///
/// Commits `store_data` to the destination register when the WB latch is
/// live and write-back is enabled.
pub fn wb_stage(prev: &PipelineState, rf: &mut RegisterFile) {
    let wb = &prev.writeback;
    if wb.nop {
        return;
    }
    if wb.write_back {
        if let Some(decoded) = &wb.decoded {
            tracing::trace!(instr = %decoded, reg = wb.wrt_reg, value = wb.store_data, "WB commit");
        }
        rf.write(wb.wrt_reg, wb.store_data);
    }
}
