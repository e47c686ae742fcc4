//! Check command - Show which template each document would use.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use thiserror::Error;

use pgdoc_templates::{Generator, Resolution};

use super::load_config;

#[derive(Args)]
pub struct CheckArgs {
    /// Fail when any target has no template
    #[arg(long)]
    strict: bool,

    /// Template store root (overrides `settings.templates_dir`)
    #[arg(long, env = "PGDOC_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,
}

/// Raised by `check --strict` when targets lack a template.
#[derive(Error, Debug)]
#[error("{0} target(s) have no template")]
pub struct MissingTemplates(pub usize);

pub fn execute(config_path: &Path, args: CheckArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = args.templates_dir {
        config.settings.templates_dir = dir;
    }

    let generator = Generator::new(&config.settings);
    let plan = generator.plan(&config);

    let mut missing = 0;
    for planned in &plan {
        match &planned.resolution {
            Resolution::Found { template, .. } => {
                println!("✅ {} → {}", planned.target, template.display());
            }
            Resolution::NotFound { attempted } => {
                missing += 1;
                println!("❌ {} → no template, add one of:", planned.target);
                for path in attempted {
                    println!("   - {}", path.display());
                }
            }
        }
    }

    for unused in generator.unused_templates(&config) {
        println!("⚠️  Unused template: {}", unused.display());
    }

    println!();
    println!(
        "Results: {} resolved, {} missing",
        plan.len() - missing,
        missing
    );

    if args.strict && missing > 0 {
        return Err(MissingTemplates(missing).into());
    }

    Ok(())
}
