mod cli;
mod render;

use std::fs::File;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::cli::Args;

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    match &args.log_file {
        Some(path) => {
            let log_file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), log_file)?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match cli::run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
