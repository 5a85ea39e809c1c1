//! Register file invariants.

use rv32sim_core::common::RegisterFile;

#[test]
fn starts_zeroed() {
    let rf = RegisterFile::new();
    for idx in 0..32 {
        assert_eq!(rf.read(idx), 0);
    }
}

#[test]
fn x0_reads_zero() {
    let rf = RegisterFile::new();
    assert_eq!(rf.read(0), 0);
}

#[test]
fn writes_to_x0_are_ignored() {
    let mut rf = RegisterFile::new();
    rf.write(0, 0x1234);
    assert_eq!(rf.read(0), 0);
    assert_eq!(rf.registers()[0], 0);
}

#[test]
fn write_read_roundtrip() {
    let mut rf = RegisterFile::new();
    for idx in 1..32 {
        rf.write(idx, idx as i32 * -3);
    }
    for idx in 1..32 {
        assert_eq!(rf.read(idx), idx as i32 * -3);
    }
}

#[test]
fn dump_view_is_index_ordered() {
    let mut rf = RegisterFile::new();
    rf.write(1, 10);
    rf.write(31, -1);
    let regs = rf.registers();
    assert_eq!(regs[1], 10);
    assert_eq!(regs[31], -1);
    assert_eq!(regs.len(), 32);
}
