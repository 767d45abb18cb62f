use crate::config::DocsOptions;
use crate::docs::register;
use crate::manifest::RouteManifest;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Route Swagger - generate a Swagger 2.0 document from a routing table manifest
#[derive(Parser, Debug)]
#[command(name = "route-swagger")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the route manifest (.yaml, .yml or .json)
    #[arg(value_name = "MANIFEST")]
    pub manifest_path: PathBuf,

    /// Documentation options file (.yaml, .yml or .json)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.manifest_path.is_file() {
        anyhow::bail!(
            "Manifest file does not exist: {}",
            args.manifest_path.display()
        );
    }

    if let Some(ref config) = args.config_path {
        if !config.is_file() {
            anyhow::bail!("Options file does not exist: {}", config.display());
        }
    }

    info!("Manifest: {}", args.manifest_path.display());
    info!("Output format: {:?}", args.output_format);
    match args.output_path {
        Some(ref output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }

    Ok(args)
}

/// Load the manifest, register the documentation routes and emit the document
pub fn run(args: CliArgs) -> Result<()> {
    info!("Loading route manifest...");
    let manifest = RouteManifest::from_file(&args.manifest_path)
        .with_context(|| format!("Failed to load {}", args.manifest_path.display()))?;
    let mut app = manifest.into_app()?;

    let options = match &args.config_path {
        Some(path) => DocsOptions::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => DocsOptions::default(),
    };

    let docs = register(&mut app, options).context("Invalid documentation options")?;

    info!("Building Swagger document...");
    let document = docs.json(&app);

    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("Wrote Swagger document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    let operations: usize = document.paths.values().map(|methods| methods.len()).sum();
    info!("Summary:");
    info!("  - Paths: {}", document.paths.len());
    info!("  - Operations: {}", operations);
    info!("  - Definitions: {}", document.definitions.len());

    Ok(())
}
