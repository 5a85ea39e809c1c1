//! Output files: formats, truncate-then-append discipline, and path
//! resolution.

use std::fs;

use pretty_assertions::assert_eq;
use rv32sim_core::{Config, Simulator};

use crate::common::asm;
use crate::common::harness::write_program_files;

/// The scenario-1 program: three instructions plus the sentinel.
fn program() -> Vec<u32> {
    vec![
        asm::addi(1, 0, 5),
        asm::addi(2, 0, 7),
        asm::add(3, 1, 2),
        asm::halt(),
    ]
}

fn run_in_tempdir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_program_files(dir.path(), &program(), &[]);
    let config = Config::new(dir.path().to_path_buf(), None);
    let mut simulator = Simulator::new(&config).unwrap();
    simulator.run().unwrap();
    dir
}

#[test]
fn register_dumps_emit_33_lines_per_cycle() {
    let dir = run_in_tempdir();

    let ss = fs::read_to_string(dir.path().join("SS_RFResult.txt")).unwrap();
    let fs_dump = fs::read_to_string(dir.path().join("FS_RFResult.txt")).unwrap();

    // 5 single-cycle cycles, 8 pipelined cycles.
    assert_eq!(ss.lines().count(), 33 * 5);
    assert_eq!(fs_dump.lines().count(), 33 * 8);

    let mut lines = ss.lines();
    assert_eq!(
        lines.next().unwrap(),
        "State of RF after executing cycle:\t0"
    );
    // Register x0 dumps as 32 zero bits in every cycle.
    for (idx, line) in ss.lines().enumerate() {
        if idx % 33 == 1 {
            assert_eq!(line, "0".repeat(32));
        }
    }
}

#[test]
fn final_register_values_appear_in_the_last_dump_block() {
    let dir = run_in_tempdir();
    let dump = fs::read_to_string(dir.path().join("FS_RFResult.txt")).unwrap();
    let last_block: Vec<&str> = dump.lines().rev().take(33).collect();
    // Lines come reversed: x31 first, x0 last before the header.
    let x3 = last_block[28];
    assert_eq!(x3, format!("{:032b}", 12));
}

#[test]
fn single_stage_state_dump_format() {
    let dir = run_in_tempdir();
    let dump = fs::read_to_string(dir.path().join("StateResult_SS.txt")).unwrap();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines[0], "-".repeat(70));
    assert_eq!(lines[1], "State after executing cycle: 0");
    assert_eq!(lines[2], "IF.PC: 4");
    assert_eq!(lines[3], "IF.nop: False");
    // Four lines per cycle, five cycles.
    assert_eq!(lines.len(), 4 * 5);
    // The sentinel cycle reports the nop.
    assert_eq!(lines[4 * 4 - 1], "IF.nop: True");
}

#[test]
fn pipeline_state_dump_first_block_is_exact() {
    let dir = run_in_tempdir();
    let dump = fs::read_to_string(dir.path().join("StateResult_FS.txt")).unwrap();
    let zeros = "0".repeat(32);
    let expected = format!(
        "{banner}\n\
         State after executing cycle: 0\n\
         IF.nop: False\n\
         IF.PC: 4\n\
         ID.nop: False\n\
         ID.Instr: {addi:032b}\n\
         EX.nop: True\n\
         EX.instr: \n\
         EX.Read_data1: {zeros}\n\
         EX.Read_data2: {zeros}\n\
         EX.Imm: {zeros}\n\
         EX.Rs: 00000\n\
         EX.Rt: 00000\n\
         EX.Wrt_reg_addr: 00000\n\
         EX.is_I_type: 0\n\
         EX.rd_mem: 0\n\
         EX.wrt_mem: 0\n\
         EX.alu_op: 00\n\
         EX.wrt_enable: 0\n\
         MEM.nop: True\n\
         MEM.ALUresult: {zeros}\n\
         MEM.Store_data: {zeros}\n\
         MEM.Rs: 00000\n\
         MEM.Rt: 00000\n\
         MEM.Wrt_reg_addr: 00000\n\
         MEM.rd_mem: 0\n\
         MEM.wrt_mem: 0\n\
         MEM.wrt_enable: 0\n\
         WB.nop: True\n\
         WB.Wrt_data: {zeros}\n\
         WB.Rs: 00000\n\
         WB.Rt: 00000\n\
         WB.Wrt_reg_addr: 00000\n\
         WB.wrt_enable: 0\n",
        banner = "-".repeat(70),
        addi = asm::addi(1, 0, 5),
    );
    assert!(dump.starts_with(&expected));
    // Eight cycle blocks in total.
    assert_eq!(
        dump.matches("State after executing cycle:").count(),
        8
    );
}

#[test]
fn data_memory_dumps_one_byte_per_line() {
    let dir = run_in_tempdir();
    for name in ["SS_DMEMResult.txt", "FS_DMEMResult.txt"] {
        let dump = fs::read_to_string(dir.path().join(name)).unwrap();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 1000);
        assert!(lines.iter().all(|l| l.len() == 8));
        assert!(
            lines
                .iter()
                .all(|l| l.bytes().all(|b| b == b'0' || b == b'1'))
        );
    }
}

#[test]
fn performance_report_holds_both_blocks() {
    let dir = run_in_tempdir();
    let report = fs::read_to_string(dir.path().join("PerformanceMetrics_Result.txt")).unwrap();
    let expected = format!(
        "Single Stage Core Performance Metrics{rule}\n\
         Number of cycles taken: 5\n\
         Cycles per instruction: 1.25\n\
         Instructions per cycle: 0.8\n\
         Five Stage Core Performance Metrics{rule}\n\
         Number of cycles taken: 8\n\
         Cycles per instruction: 2.0\n\
         Instructions per cycle: 0.5\n",
        rule = "-".repeat(29),
    );
    assert_eq!(report, expected);
}

#[test]
fn rerunning_truncates_every_per_cycle_file() {
    let dir = run_in_tempdir();
    let first = fs::read_to_string(dir.path().join("StateResult_FS.txt")).unwrap();

    let config = Config::new(dir.path().to_path_buf(), None);
    let mut simulator = Simulator::new(&config).unwrap();
    simulator.run().unwrap();

    let second = fs::read_to_string(dir.path().join("StateResult_FS.txt")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn testpath_reads_images_from_tc1_and_writes_to_iodir() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let tc1 = root.path().join("TC1");
    fs::create_dir(&tc1).unwrap();
    write_program_files(&tc1, &program(), &[]);

    let config = Config::new(out.path().to_path_buf(), Some(root.path().to_path_buf()));
    let mut simulator = Simulator::new(&config).unwrap();
    simulator.run().unwrap();

    assert!(out.path().join("FS_RFResult.txt").exists());
    assert!(out.path().join("PerformanceMetrics_Result.txt").exists());
}

#[test]
fn missing_images_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().to_path_buf(), None);
    assert!(Simulator::new(&config).is_err());
}

#[test]
fn malformed_image_lines_are_reported_with_the_line_number() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("imem.txt"), "00000000\nnot-bits\n").unwrap();
    fs::write(dir.path().join("dmem.txt"), "").unwrap();
    let config = Config::new(dir.path().to_path_buf(), None);
    let err = Simulator::new(&config).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}
