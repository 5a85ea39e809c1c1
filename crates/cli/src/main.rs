//! RV32I cycle-accurate simulator CLI.
//!
//! Loads the instruction and data images from the I/O directory (or the
//! `TC1` subdirectory of an alternative test root), runs the single-cycle
//! and five-stage engines in lockstep, and writes the per-cycle dumps,
//! final memory images, and performance report back into the I/O directory.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv32sim_core::{Config, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "RV32I cycle-accurate simulator",
    long_about = "Run an RV32I program image through a single-cycle reference core and a \
                  five-stage pipelined core in lockstep.\n\nInputs are imem.txt and dmem.txt \
                  (one byte per line, binary). Outputs are the per-cycle register-file and \
                  state dumps, the final data-memory images, and the performance report.\n\n\
                  Examples:\n  sim --iodir testcases/TC0\n  sim --iodir out --testpath testcases"
)]
struct Cli {
    /// Directory containing the input files and receiving the outputs.
    #[arg(long, default_value = ".")]
    iodir: PathBuf,

    /// Alternative test root; images are read from <testpath>/TC1 instead.
    #[arg(long)]
    testpath: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.iodir, cli.testpath);

    println!("IO Directory: {}", config.output_dir().display());
    println!("Input Directory: {}", config.input_dir().display());

    let mut simulator = match Simulator::new(&config) {
        Ok(simulator) => simulator,
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = simulator.run() {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}
