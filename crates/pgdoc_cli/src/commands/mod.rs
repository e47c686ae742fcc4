//! CLI command definitions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use pgdoc_config::{ConfigReader, DocsConfig};

pub mod check;
pub mod generate;

/// pgdoc - documentation generator for PostgreSQL storage-engine extensions
#[derive(Parser)]
#[command(name = "pgdoc")]
#[command(version, about = "pgdoc - per-platform documentation generator")]
#[command(long_about = r#"
pgdoc renders one Markdown document for every product, platform and version
listed in its configuration, picking the most specific template available:

  products/<product>/v<version>_<platform>_<arch>.<ext>
  products/<product>/v<version>_<platform>.<ext>
  products/<product>/<platform>_<arch>.<ext>
  products/<product>/<platform>.<ext>

COMMANDS:
  generate  → Render every document into the output directory
  check     → Show which template each document would use

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Render error
  5 - Missing templates (check --strict)
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (.yaml, .yml, .toml or .json)
    #[arg(short, long, global = true, env = "PGDOC_CONFIG", default_value = "pgdoc.yaml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every configured document
    Generate(generate::GenerateArgs),

    /// Report the template each document would use
    Check(check::CheckArgs),
}

/// Load the configuration and log anything suspicious in it.
///
/// Relative directories in `settings` are taken relative to the
/// configuration file.
pub(crate) fn load_config(path: &Path) -> Result<DocsConfig> {
    let mut config = ConfigReader::read(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(base) = path.parent() {
        let settings = &mut config.settings;
        settings.templates_dir = base.join(&settings.templates_dir);
        settings.output_dir = base.join(&settings.output_dir);
    }

    for warning in config.validate() {
        warn!("{}", warning);
    }
    info!(
        "Loaded {} product(s), {} target(s) from {}",
        config.products.len(),
        config.targets().count(),
        path.display()
    );

    Ok(config)
}
