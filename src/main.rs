//! Controller Docs - command-line tool for describing a service's operations.
//!
//! # Usage
//!
//! ```bash
//! controller-docs [OPTIONS] <PROJECT_PATH>
//! controller-docs [OPTIONS] --manifest <FILE>
//! ```
//!
//! Write YAML to a file with verbose logging:
//! ```bash
//! controller-docs ./my-service -f yaml -o docs/operations.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use controller_docs::cli;
use log::info;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Controller Docs starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Operation docs generation completed successfully");

    Ok(())
}
