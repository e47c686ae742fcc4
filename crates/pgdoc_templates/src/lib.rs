//! # pgdoc_templates
//!
//! Template resolution and document rendering for pgdoc.
//!
//! For every (product, platform, version) target in a configuration the
//! pipeline:
//!
//! - resolves the most specific template under `products/<product>/`
//! - builds a render context from the raw names
//! - expands the template with minijinja (strict undefined), formats the Markdown and writes it
//!
//! ## Example
//!
//! ```rust,no_run
//! use pgdoc_config::ConfigReader;
//! use pgdoc_templates::Generator;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigReader::read("pgdoc.yaml")?;
//! let generator = Generator::new(&config.settings);
//! let report = generator.run(&config).await?;
//! println!("{} written, {} skipped", report.written.len(), report.skipped.len());
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod renderer;
pub mod resolver;

pub use context::{PlatformContext, ProductContext, RenderContext};
pub use error::{TemplateError, TemplateResult};
pub use formatter::{FormatError, MarkdownFormatter};
pub use generator::{GenerationReport, Generator, PlannedTarget, SkippedTarget};
pub use renderer::DocumentRenderer;
pub use resolver::{Resolution, Specificity, TemplateResolver};
