//! Generate command - Render every configured document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use pgdoc_templates::Generator;

use super::load_config;

#[derive(Args)]
pub struct GenerateArgs {
    /// Template store root (overrides `settings.templates_dir`)
    #[arg(long, env = "PGDOC_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// Output directory (overrides `settings.output_dir`)
    #[arg(short, long, env = "PGDOC_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
}

pub async fn execute(config_path: &Path, args: GenerateArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = args.templates_dir {
        config.settings.templates_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.settings.output_dir = dir;
    }

    info!(
        "Rendering templates from {} into {}",
        config.settings.templates_dir.display(),
        config.settings.output_dir.display()
    );

    let generator = Generator::new(&config.settings);
    let report = generator
        .run(&config)
        .await
        .context("Documentation generation aborted")?;

    println!(
        "✅ Generated {} document(s) in {}",
        report.written.len(),
        config.settings.output_dir.display()
    );
    if !report.skipped.is_empty() {
        println!(
            "⚠️  Skipped {} target(s) without a template:",
            report.skipped.len()
        );
        for skipped in &report.skipped {
            println!("   - {}", skipped.target);
        }
    }

    Ok(())
}
