// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Takes a list of circuits without protection logic, protects each one
//! with the parity tool and searches the protected circuit for
//! vulnerable latches with random test cases. Analyzer progress is
//! relayed to the console as it is produced.

use seabench::{
    AnalyzeConfig, AnalyzeRunner, AnalyzeTools, BenchDirs, BenchmarkList, ProtectOptions, Result,
};

// benchmarking circuits without protection circuits are in here
const BENCHMARK_DIR: &str = "../../benchmark_files/";
// list of circuit file names located within BENCHMARK_DIR
const BENCHMARKS_LIST: &str = "all_benchmarks.txt";

const ADD_PARITY_BIN: &str = "../../AddParityTool/addParityTool";
const IMMORTAL_BIN: &str = "./immortal-bin";

// analyzer algorithm selection, passed through uninterpreted
const BACKEND_MODE: &str = "-b sta -m 0";

const NUM_RAND_TC: u32 = 3;
const RAND_TC_LEN: u32 = 15;
const SEED: u64 = 123456;

// randomly select this percentage of latches to protect; one additional
// error latch protects AVG_LATCHES latches
const PERCENTAGE_TO_PROTECT: u32 = 90;
const AVG_LATCHES: u32 = 2;

const TMP_DIR: &str = "tmp/sta090";

fn main() {
    if let Err(e) = run() {
        println!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let protect = ProtectOptions::new(PERCENTAGE_TO_PROTECT, AVG_LATCHES)?;
    let cfg = AnalyzeConfig::new(
        AnalyzeTools {
            protector: ADD_PARITY_BIN.into(),
            analyzer: IMMORTAL_BIN.into(),
        },
        BenchDirs {
            benchmarks: BENCHMARK_DIR.into(),
            tmp: TMP_DIR.into(),
        },
        protect,
        NUM_RAND_TC,
        RAND_TC_LEN,
        BACKEND_MODE,
        Some(SEED),
    )?;
    let list = BenchmarkList::from_file(BENCHMARKS_LIST)?;
    AnalyzeRunner::new(cfg).run(&list, &mut std::io::stdout())?;
    Ok(())
}
