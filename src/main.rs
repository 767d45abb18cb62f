//! Route Swagger - command-line tool for documenting a routing table.
//!
//! Reads a route manifest, registers the documentation routes on the described
//! application and prints the document its JSON route would serve.
//!
//! # Usage
//!
//! ```bash
//! route-swagger [OPTIONS] <MANIFEST>
//! ```
//!
//! # Examples
//!
//! ```bash
//! route-swagger routes.yaml -o swagger.json
//! route-swagger routes.yaml -c docs.yaml -f yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use route_swagger::cli;

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

    info!("Route Swagger starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
