//! Template resolution.
//!
//! Templates for a product live in `<templates_dir>/products/<product>/`.
//! A target can be covered by four file names, tried from most to least
//! specific:
//!
//! 1. `v<version>_<platform>_<arch>`
//! 2. `v<version>_<platform>`
//! 3. `<platform>_<arch>`
//! 4. `<platform>`
//!
//! Product and platform names are normalized; version and arch are literal.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use pgdoc_config::{normalize_name, DocTarget};

/// How specific a template file is, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    VersionPlatformArch,
    VersionPlatform,
    PlatformArch,
    Platform,
}

impl Specificity {
    /// All tiers in lookup order.
    pub const ORDER: [Specificity; 4] = [
        Specificity::VersionPlatformArch,
        Specificity::VersionPlatform,
        Specificity::PlatformArch,
        Specificity::Platform,
    ];

    /// File name (without extension) this tier uses for a target.
    pub fn file_stem(self, target: &DocTarget<'_>) -> String {
        let platform = normalize_name(target.platform);
        match self {
            Specificity::VersionPlatformArch => {
                format!("v{}_{}_{}", target.version, platform, target.arch)
            }
            Specificity::VersionPlatform => format!("v{}_{}", target.version, platform),
            Specificity::PlatformArch => format!("{}_{}", platform, target.arch),
            Specificity::Platform => platform,
        }
    }
}

/// Outcome of looking up a template for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found {
        template: PathBuf,
        specificity: Specificity,
    },
    NotFound {
        /// Every path tried, in lookup order
        attempted: Vec<PathBuf>,
    },
}

impl Resolution {
    pub fn template(&self) -> Option<&Path> {
        match self {
            Resolution::Found { template, .. } => Some(template),
            Resolution::NotFound { .. } => None,
        }
    }
}

/// Picks the most specific existing template for a target.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    templates_dir: PathBuf,
    extension: String,
}

impl TemplateResolver {
    /// Create a resolver over a template store.
    ///
    /// `extension` is the template file extension without the leading dot.
    pub fn new(templates_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory holding every template of a product.
    pub fn product_dir(&self, product: &str) -> PathBuf {
        self.templates_dir
            .join("products")
            .join(normalize_name(product))
    }

    /// Candidate paths for a target, most specific first. Does not touch the
    /// filesystem.
    pub fn candidates(&self, target: &DocTarget<'_>) -> Vec<(Specificity, PathBuf)> {
        let dir = self.product_dir(target.product);
        Specificity::ORDER
            .iter()
            .map(|tier| {
                let file = format!("{}.{}", tier.file_stem(target), self.extension);
                (*tier, dir.join(file))
            })
            .collect()
    }

    /// Look up the template for a target without logging a miss.
    pub fn probe(&self, target: &DocTarget<'_>) -> Resolution {
        let candidates = self.candidates(target);
        for (specificity, path) in &candidates {
            debug!("Checking template candidate {:?}", path);
            if path.is_file() {
                return Resolution::Found {
                    template: path.clone(),
                    specificity: *specificity,
                };
            }
        }

        Resolution::NotFound {
            attempted: candidates.into_iter().map(|(_, path)| path).collect(),
        }
    }

    /// Look up the template for a target.
    ///
    /// A miss is reported with a warning listing every attempted path, so
    /// the author knows which file to add.
    pub fn resolve(&self, target: &DocTarget<'_>) -> Resolution {
        let resolution = self.probe(target);
        if let Resolution::NotFound { attempted } = &resolution {
            let tried = attempted
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n");
            warn!("No template found for {}, tried:\n{}", target, tried);
        }
        resolution
    }
}
