//! kompas-scheme: division scheme builder for KOMPAS-3D automation
//!
//! This tool reads a JSON scheme request, validates the component
//! hierarchy, computes a GOST 2.701 division scheme layout with its BOM,
//! and writes a JSON plan file for the KOMPAS automation bridge.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use kompas_scheme::config;
use kompas_scheme::render::{PlanFileRenderer, SchemeRenderer};
use kompas_scheme::scheme::{DivisionSchemeRequest, SchemeAssembler};

/// Exit code for failures outside the request itself: unreadable files,
/// bad configuration, rendering problems.
const ENVIRONMENT_FAILURE: u8 = 2;

/// Builds GOST 2.701 division schemes from JSON component lists.
///
/// Reads a scheme request, validates it, computes box placement and the
/// BOM, and writes a JSON plan file for the KOMPAS automation bridge.
#[derive(Parser, Debug)]
#[command(name = "kompas-scheme")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scheme request JSON file
    #[arg(value_name = "REQUEST_FILE")]
    request: PathBuf,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Directory plan files are written into (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_pretty<T: serde::Serialize>(value: &T) {
    let body = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{body}");
}

/// Entry point for the kompas-scheme tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(ENVIRONMENT_FAILURE);
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    // Display GPL license notice (required by GPLv3 Section 5d)
    eprintln!(
        "kompas-scheme {}  Copyright (C) 2026  ESKD Tools Contributors",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("This program comes with ABSOLUTELY NO WARRANTY.");
    eprintln!("This is free software, licensed under GPL-3.0-or-later.");
    eprintln!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
    eprintln!();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        request = %args.request.display(),
        "starting kompas-scheme"
    );

    // Read and parse the request
    let body = match fs::read_to_string(&args.request) {
        Ok(body) => body,
        Err(e) => {
            error!(path = %args.request.display(), error = %e, "cannot read request file");
            eprintln!("Cannot read request file {}: {e}", args.request.display());
            return ExitCode::from(ENVIRONMENT_FAILURE);
        }
    };
    let mut request: DivisionSchemeRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Malformed request file {}: {e}", args.request.display());
            return ExitCode::from(ENVIRONMENT_FAILURE);
        }
    };

    // Stamp today's date into the title block unless the caller set one
    if request.title_block.date.is_none() {
        request.title_block.date = Some(chrono::Local::now().format("%d.%m.%Y").to_string());
    }

    // Assemble the scheme
    let assembler = SchemeAssembler::with_layout(cfg.layout_metrics(), cfg.margins());
    let result = assembler.assemble(&request);

    if !result.success {
        print_pretty(&result);
        return ExitCode::FAILURE;
    }
    let warnings = result.warnings;
    let Some(scheme) = result.scheme else {
        error!("assembly reported success without a scheme");
        return ExitCode::from(ENVIRONMENT_FAILURE);
    };

    // Write the plan file; the request's own output path wins over the
    // CLI flag, which wins over the config
    let output_dir = request
        .output_path
        .clone()
        .or(args.output_dir)
        .or(cfg.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut renderer = PlanFileRenderer::new(output_dir);
    match renderer.render(&scheme) {
        Ok(document) => {
            let response = json!({
                "success": true,
                "message": format!("Division scheme for {} assembled", scheme.product_code),
                "file_path": document.path,
                "warnings": warnings,
                "bom_generated": scheme.bom.is_some(),
            });
            print_pretty(&response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to write scheme plan");
            eprintln!("Render error: {e}");
            ExitCode::from(ENVIRONMENT_FAILURE)
        }
    }
}
