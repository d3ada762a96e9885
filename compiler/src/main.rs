//! Microwave compiler CLI entry point.
//!
//! Usage:
//!   microwavec <source.mw> [output.c]
//!
//! The output path defaults to `output.c`. Exits non-zero on any
//! failure, with the message on stderr.

use microwave_compiler::compile;
use std::{env, fs, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: microwavec <source.mw> [output.c]");
        process::exit(64);
    }

    let input = &args[1];
    let output = args.get(2).cloned().unwrap_or_else(|| "output.c".to_string());

    let source = match fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", input, e);
            process::exit(74);
        }
    };

    println!("Compiling {}...", input);
    let c_code = match compile(&source) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(65);
        }
    };

    match fs::write(&output, c_code) {
        Ok(()) => println!("Generated C code written to {}", output),
        Err(e) => {
            eprintln!("Error writing '{}': {}", output, e);
            process::exit(74);
        }
    }
}
