//! Generation run over every configured target.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{error, info};
use walkdir::WalkDir;

use pgdoc_config::{DocTarget, DocsConfig, GeneratorSettings};

use crate::context::RenderContext;
use crate::error::TemplateResult;
use crate::renderer::DocumentRenderer;
use crate::resolver::{Resolution, TemplateResolver};

/// A target together with the template it would use.
#[derive(Debug, Clone)]
pub struct PlannedTarget<'a> {
    pub target: DocTarget<'a>,
    pub resolution: Resolution,
    pub output: PathBuf,
}

/// A target skipped because no template exists for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTarget {
    /// Human-readable target description
    pub target: String,
    /// Template paths that were tried, most specific first
    pub attempted: Vec<PathBuf>,
}

/// Outcome of a successful generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in config order
    pub written: Vec<PathBuf>,
    /// Targets without a template
    pub skipped: Vec<SkippedTarget>,
}

/// Drives resolution, context building and rendering for a configuration.
pub struct Generator {
    resolver: TemplateResolver,
    renderer: DocumentRenderer,
}

impl Generator {
    pub fn new(settings: &GeneratorSettings) -> Self {
        Self::with_parts(
            TemplateResolver::new(&settings.templates_dir, &settings.template_extension),
            DocumentRenderer::new(&settings.output_dir, &settings.output_extension),
        )
    }

    pub fn with_parts(resolver: TemplateResolver, renderer: DocumentRenderer) -> Self {
        Self { resolver, renderer }
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Resolve every target without rendering anything.
    pub fn plan<'a>(&self, config: &'a DocsConfig) -> Vec<PlannedTarget<'a>> {
        config
            .targets()
            .map(|target| PlannedTarget {
                resolution: self.resolver.probe(&target),
                output: self.renderer.output_path(&target),
                target,
            })
            .collect()
    }

    /// Template files under `products/` that no target resolves to.
    pub fn unused_templates(&self, config: &DocsConfig) -> Vec<PathBuf> {
        let used: HashSet<PathBuf> = self
            .plan(config)
            .into_iter()
            .filter_map(|planned| match planned.resolution {
                Resolution::Found { template, .. } => Some(template),
                Resolution::NotFound { .. } => None,
            })
            .collect();

        let suffix = format!(".{}", self.resolver.extension());
        let mut unused: Vec<PathBuf> = WalkDir::new(self.resolver.templates_dir().join("products"))
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.to_string_lossy().ends_with(&suffix))
            .filter(|p| !used.contains(p))
            .collect();
        unused.sort();
        unused
    }

    /// Render every target in config order.
    ///
    /// Targets without a template are skipped. The first rendering failure
    /// stops the run and is returned; files written before it stay on disk.
    pub async fn run(&self, config: &DocsConfig) -> TemplateResult<GenerationReport> {
        tokio::fs::create_dir_all(self.renderer.output_dir()).await?;

        let mut report = GenerationReport::default();

        for target in config.targets() {
            info!("Generating documentation for {}", target);

            let template = match self.resolver.resolve(&target) {
                Resolution::Found { template, .. } => template,
                Resolution::NotFound { attempted } => {
                    report.skipped.push(SkippedTarget {
                        target: target.to_string(),
                        attempted,
                    });
                    continue;
                }
            };
            info!("Using template {}", template.display());

            let context = RenderContext::build(&target);
            let written = match self.renderer.render(&template, &context, &target).await {
                Ok(path) => path,
                Err(e) => {
                    error!("Failed to render {} from {}: {}", target, template.display(), e);
                    return Err(e);
                }
            };

            let file_name = written
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("Generated {}", file_name);
            report.written.push(written);
        }

        info!(
            "Generation finished: {} written, {} skipped",
            report.written.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdoc_config::{Platform, Product};
    use std::fs;
    use std::path::Path;

    fn settings(root: &Path) -> GeneratorSettings {
        GeneratorSettings {
            templates_dir: root.join("templates"),
            output_dir: root.join("out"),
            ..GeneratorSettings::default()
        }
    }

    fn config(root: &Path) -> DocsConfig {
        DocsConfig {
            settings: settings(root),
            products: vec![Product::new("Foo").with_platform(
                Platform::new("Bar Linux", "x86_64")
                    .with_version("1")
                    .with_version("2"),
            )],
        }
    }

    fn add_template(root: &Path, name: &str, body: &str) -> PathBuf {
        let dir = root.join("templates").join("products").join("foo");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_plan_reports_each_target() {
        let root = tempfile::tempdir().unwrap();
        let template = add_template(root.path(), "v1_bar-linux.md.j2", "x");
        let config = config(root.path());
        let generator = Generator::new(&config.settings);

        let plan = generator.plan(&config);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].resolution.template(), Some(template.as_path()));
        assert!(plan[1].resolution.template().is_none());
        assert!(plan[1].output.ends_with("foo_2_bar-linux_x86_64.md"));
    }

    #[test]
    fn test_unused_templates() {
        let root = tempfile::tempdir().unwrap();
        add_template(root.path(), "bar-linux.md.j2", "x");
        let stale = add_template(root.path(), "v9_bar-linux.md.j2", "x");
        add_template(root.path(), "notes.txt", "x");
        let config = config(root.path());
        let generator = Generator::new(&config.settings);

        assert_eq!(generator.unused_templates(&config), vec![stale]);
    }

    #[tokio::test]
    async fn test_run_skips_missing_and_writes_rest() {
        let root = tempfile::tempdir().unwrap();
        add_template(root.path(), "v2_bar-linux.md.j2", "# {{ product.name }} {{ product.version }}");
        let config = config(root.path());
        let generator = Generator::new(&config.settings);

        let report = generator.run(&config).await.unwrap();
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].attempted.len(), 4);
        assert_eq!(
            fs::read_to_string(root.path().join("out").join("foo_2_bar-linux_x86_64.md")).unwrap(),
            "# Foo 2\n"
        );
        assert!(!root.path().join("out").join("foo_1_bar-linux_x86_64.md").exists());
    }
}
