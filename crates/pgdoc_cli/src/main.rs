//! pgdoc CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success (targets without a template are skipped, not failures)
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error
//! - 4: Render error
//! - 5: Missing templates (`check --strict`)

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{check::MissingTemplates, Cli, Commands};
use pgdoc_config::ConfigError;
use pgdoc_templates::TemplateError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
    pub const RENDER_ERROR: u8 = 4;
    pub const MISSING_TEMPLATES: u8 = 5;
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(ExitCodes::INVALID_ARGS)
            } else {
                ExitCode::from(ExitCodes::SUCCESS)
            };
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(&cli.config, args).await,
        Commands::Check(args) => commands::check::execute(&cli.config, args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "pgdoc=debug,info"
    } else if quiet {
        "warn"
    } else {
        "pgdoc=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Ignore the error: a subscriber may already be installed.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();
}

/// Map an error to its exit code by the library error it carries.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ConfigError>().is_some() {
        ExitCodes::CONFIG_ERROR
    } else if e.downcast_ref::<TemplateError>().is_some() {
        ExitCodes::RENDER_ERROR
    } else if e.downcast_ref::<MissingTemplates>().is_some() {
        ExitCodes::MISSING_TEMPLATES
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
