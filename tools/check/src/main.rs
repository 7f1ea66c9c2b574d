// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Takes a list of circuits without protection logic, protects each one
//! with the parity tool, converts the result into a model checking
//! problem and decides it with a bounded model checker.

use seabench::{
    BenchDirs, BenchmarkList, CheckConfig, CheckRunner, CheckTools, ProtectOptions, Result,
};

// benchmarking circuits without protection circuits are in here
const BENCHMARK_DIR: &str = "../../benchmark_files/";
// list of circuit file names located within BENCHMARK_DIR
const BENCHMARKS_LIST: &str = "all_benchmarks.txt";

const ADD_PARITY_BIN: &str = "../../AddParityTool/addParityTool";
const ALARM_TO_MC_BIN: &str = "../alarmToMC";
const BLIMC_BIN: &str = "../../../libs/blimc/blimc";

// randomly select this percentage of latches to protect; one additional
// error latch protects AVG_LATCHES latches
const PERCENTAGE_TO_PROTECT: u32 = 99;
const AVG_LATCHES: u32 = 2;

// model checking search depth
const MAX_K: u32 = 15;

const TMP_DIR: &str = "tmp/";

fn main() {
    if let Err(e) = run() {
        println!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let protect = ProtectOptions::new(PERCENTAGE_TO_PROTECT, AVG_LATCHES)?;
    let cfg = CheckConfig::new(
        CheckTools {
            protector: ADD_PARITY_BIN.into(),
            converter: ALARM_TO_MC_BIN.into(),
            checker: BLIMC_BIN.into(),
        },
        BenchDirs {
            benchmarks: BENCHMARK_DIR.into(),
            tmp: TMP_DIR.into(),
        },
        protect,
        MAX_K,
    )?;
    let list = BenchmarkList::from_file(BENCHMARKS_LIST)?;
    CheckRunner::new(cfg).run(&list, &mut std::io::stdout())?;
    Ok(())
}
