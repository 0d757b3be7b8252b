//! CoreAPI schema generator - command-line tool describing Rust web APIs as CoreAPI documents.
//!
//! # Usage
//!
//! ```bash
//! coreapi-from-source [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Print the CoreJSON schema:
//! ```bash
//! coreapi-from-source ./my-api-project
//! ```
//!
//! Write HTML documentation with assets served from a CDN:
//! ```bash
//! coreapi-from-source ./my-api-project -f html --static-url https://cdn.example.com/ -o docs/index.html
//! ```
//!
//! Resolve the schema URL against the deployed host:
//! ```bash
//! coreapi-from-source ./my-api-project --base-url https://api.example.com/ -f yaml
//! ```

use anyhow::Result;
use clap::Parser;
use coreapi_from_source::cli;
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

    info!("CoreAPI schema generator starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Schema generation completed successfully");

    Ok(())
}
