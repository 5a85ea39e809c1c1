//! Branch and jump resolution in the decode stage.
//!
//! Branches resolve one cycle after fetch: a taken branch redirects the PC,
//! squashes the word fetched in the same cycle, and sends a nop down the
//! EX path. Untaken branches disturb nothing. JAL redirects unconditionally
//! and retires its return address through the normal EX/MEM/WB flow.

use crate::common::asm;
use crate::common::harness::{run_pipeline, trace_pipeline};

#[test]
fn untaken_branch_falls_through() {
    let core = run_pipeline(&[
        asm::addi(1, 0, 1),
        asm::beq(1, 0, 8),
        asm::addi(2, 0, 99),
        asm::addi(3, 0, 42),
        asm::halt(),
    ]);
    assert_eq!(core.registers().read(2), 99);
    assert_eq!(core.registers().read(3), 42);
    assert_eq!(core.cycle(), 9);
}

#[test]
fn taken_branch_squashes_the_inflight_fetch() {
    let (core, snapshots) = trace_pipeline(&[
        asm::addi(1, 0, 0),
        asm::beq(1, 0, 8),
        asm::addi(2, 0, 99),
        asm::addi(3, 0, 42),
        asm::halt(),
    ]);

    // Cycle 2 resolves the branch (taken): the next ID latch is a nop, the
    // branch occupies EX as a nop, and the PC lands on the target.
    assert!(snapshots[2].decode.nop);
    assert!(snapshots[2].execute.nop);
    assert_eq!(snapshots[2].fetch.pc, 12);

    // The fallthrough never executes; the target does.
    assert_eq!(core.registers().read(2), 0);
    assert_eq!(core.registers().read(3), 42);
    assert_eq!(core.cycle(), 9);
}

#[test]
fn bne_takes_on_inequality() {
    let core = run_pipeline(&[
        asm::addi(1, 0, 1),
        asm::bne(1, 0, 8),
        asm::addi(2, 0, 99),
        asm::addi(3, 0, 42),
        asm::halt(),
    ]);
    assert_eq!(core.registers().read(2), 0);
    assert_eq!(core.registers().read(3), 42);
}

#[test]
fn branch_predicate_uses_the_forwarded_operand() {
    // x1 is produced by the instruction immediately before the branch, so
    // the predicate can only be correct via forwarding.
    let core = run_pipeline(&[
        asm::addi(1, 0, 5),
        asm::beq(1, 0, 8),
        asm::addi(2, 0, 99),
        asm::halt(),
    ]);
    // 5 != 0: not taken.
    assert_eq!(core.registers().read(2), 99);
}

#[test]
fn jal_redirects_and_links() {
    let (core, snapshots) = trace_pipeline(&[
        asm::jal(1, 8),
        asm::addi(2, 0, 99),
        asm::addi(3, 0, 42),
        asm::halt(),
    ]);

    // Cycle 1 resolves the jump: squashed ID, PC on the target.
    assert!(snapshots[1].decode.nop);
    assert_eq!(snapshots[1].fetch.pc, 8);

    // The return address is the instruction after the jump.
    assert_eq!(core.registers().read(1), 4);
    assert_eq!(core.registers().read(2), 0);
    assert_eq!(core.registers().read(3), 42);
    assert_eq!(core.cycle(), 8);
}

#[test]
fn squashed_slot_keeps_the_word_visible_in_the_dump() {
    let jal_word = asm::jal(1, 8);
    let (_, snapshots) = trace_pipeline(&[
        jal_word,
        asm::addi(2, 0, 99),
        asm::addi(3, 0, 42),
        asm::halt(),
    ]);
    // The squashed ID latch retains the jump word for display.
    assert_eq!(snapshots[1].decode.instr, Some(jal_word));
}

#[test]
fn drain_keeps_the_last_instruction_view_and_freezes_the_pc() {
    let last = asm::addi(3, 0, 42);
    let (core, snapshots) = trace_pipeline(&[
        asm::addi(1, 0, 5),
        asm::addi(2, 0, 7),
        last,
        asm::halt(),
    ]);

    // From the sentinel fetch onwards the ID latch shows the last in-flight
    // word with nop set, and the PC never advances again.
    let final_state = core.state();
    assert!(final_state.fetch.nop);
    assert!(final_state.decode.nop);
    assert_eq!(final_state.decode.instr, Some(last));
    assert_eq!(final_state.fetch.pc, 12);
    assert_eq!(snapshots[3].fetch.pc, 12);

    // The drain bump: three instructions count as four.
    assert_eq!(core.instruction_count(), 4);
}
