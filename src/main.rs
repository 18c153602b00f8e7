//! quxflow CLI
//!
//! Usage:
//!   quxflow [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Transform options (TOML format)
//!   -g, --grid           Prefer CSS grid output over row containers
//!   --keep-labels        Do not merge lone labels into their parents
//!   -p, --pretty         Pretty-print the JSON output
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use quxflow::{transform_with_config, Model, TransformConfig};

#[derive(Parser)]
#[command(name = "quxflow")]
#[command(about = "Transforms absolute design models into flow layout trees")]
struct Cli {
    /// Design model JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Transform options (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefer CSS grid output over row containers
    #[arg(short, long)]
    grid: bool,

    /// Do not merge lone labels into their parents
    #[arg(long)]
    keep_labels: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load options
    let mut config = match &cli.config {
        Some(path) => match TransformConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TransformConfig::default(),
    };
    if cli.grid {
        config = config.with_grid(true);
    }
    if cli.keep_labels {
        config = config.with_remove_single_labels(false);
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let model = match Model::from_json(&source) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error parsing model: {}", e);
            std::process::exit(1);
        }
    };

    match transform_with_config(&model, config) {
        Ok(result) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&result)
            } else {
                serde_json::to_string(&result)
            };
            match json {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing result: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"quxflow - Transforms absolute design models into flow layout trees

USAGE:
    quxflow [OPTIONS] [FILE]
    cat model.json | quxflow

OPTIONS:
    -c, --config <FILE>  Transform options (TOML file)
    -g, --grid           Prefer CSS grid output over row containers
    --keep-labels        Do not merge lone labels into their parents
    -p, --pretty         Pretty-print the JSON output
    -h, --help           Print help

QUICK START:
    quxflow --pretty model.json > tree.json

This reads a design-tool JSON export and prints the derived layout tree.
Warnings about duplicate names or unknown widget types go to the log
(set RUST_LOG=warn to see them)."#
    );
}
