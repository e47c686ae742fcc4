//! Document rendering: template expansion, formatting and output.

use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use pgdoc_config::DocTarget;

use crate::context::RenderContext;
use crate::error::{TemplateError, TemplateResult};
use crate::formatter::MarkdownFormatter;

/// Renders one document per target.
///
/// The template environment is configured once here: undefined values are
/// errors wherever they appear (output, `if` tests, loops), and nothing is
/// escaped.
pub struct DocumentRenderer {
    engine: Environment<'static>,
    formatter: MarkdownFormatter,
    output_dir: PathBuf,
    output_extension: String,
}

impl DocumentRenderer {
    /// Create a renderer writing `<stem>.<output_extension>` files into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, output_extension: impl Into<String>) -> Self {
        let mut engine = Environment::new();
        engine.set_undefined_behavior(UndefinedBehavior::Strict);
        engine.set_auto_escape_callback(|_| AutoEscape::None);
        engine.set_keep_trailing_newline(true);

        Self {
            engine,
            formatter: MarkdownFormatter::new(),
            output_dir: output_dir.into(),
            output_extension: output_extension.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path for a target. Depends only on the target's names.
    pub fn output_path(&self, target: &DocTarget<'_>) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", target.output_stem(), self.output_extension))
    }

    /// Expand a template file against a context.
    pub fn expand(&self, template: &Path, context: &RenderContext) -> TemplateResult<String> {
        let source = fs::read_to_string(template).map_err(|source| TemplateError::Read {
            path: template.to_path_buf(),
            source,
        })?;

        let name = template.to_string_lossy();
        self.engine
            .render_named_str(&name, &source, context)
            .map_err(|e| expansion_error(template, &e))
    }

    /// Expand, format and write the document for a target.
    ///
    /// The file is flushed to disk before this returns. Nothing is written
    /// when expansion or formatting fails.
    pub async fn render(
        &self,
        template: &Path,
        context: &RenderContext,
        target: &DocTarget<'_>,
    ) -> TemplateResult<PathBuf> {
        let expanded = self.expand(template, context)?;
        let formatted = self
            .formatter
            .format(&expanded)
            .map_err(|source| TemplateError::Format {
                template: template.to_path_buf(),
                source,
            })?;

        let path = self.output_path(target);
        write_synced(&path, formatted.as_bytes())
            .await
            .map_err(|source| TemplateError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {:?}", formatted.len(), path);
        Ok(path)
    }
}

async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

/// Flatten the error and its source chain into one message.
fn expansion_error(template: &Path, err: &minijinja::Error) -> TemplateError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TemplateError::Expansion {
        template: template.to_path_buf(),
        message,
    }
}
