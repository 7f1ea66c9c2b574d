// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use clap::Parser;
use seabench::template;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "expand")]
#[command(author = "Kevin Laeufer <laeufer@cornell.edu>")]
#[command(version)]
#[command(about = "Expands `define macros and generate loops in a circuit description template.", long_about = None)]
struct Args {
    #[arg(value_name = "INPUT", index = 1)]
    input_file: PathBuf,
    #[arg(value_name = "OUTPUT", index = 2)]
    output_file: PathBuf,
}

fn main() {
    let args = Args::parse();
    println!("input: {}", args.input_file.display());
    println!("output: {}", args.output_file.display());

    let source = std::fs::read_to_string(&args.input_file).expect("failed to read input file");
    let expanded = template::expand(&source).expect("failed to expand template");
    std::fs::write(&args.output_file, expanded).expect("failed to write output file");
}
