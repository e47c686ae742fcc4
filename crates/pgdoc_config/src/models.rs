//! Configuration models.
//!
//! The configuration is a tree of products, platforms and versions plus an
//! optional `settings` section describing where templates live and where
//! documents are written.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::naming::normalize_name;

/// Root of a pgdoc configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocsConfig {
    /// Generator settings
    #[serde(default)]
    pub settings: GeneratorSettings,
    /// Documented products, in output order
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Where templates are read from and documents are written to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Root of the template store (contains `products/`)
    pub templates_dir: PathBuf,
    /// Flat directory receiving rendered documents
    pub output_dir: PathBuf,
    /// Extension of template files, without the leading dot
    pub template_extension: String,
    /// Extension of rendered documents, without the leading dot
    pub output_extension: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            template_extension: "md.j2".to_string(),
            output_extension: "md".to_string(),
        }
    }
}

/// A documented product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Display name (e.g., "Foo Storage Engine")
    pub name: String,
    /// Platforms the product ships on
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platforms: Vec::new(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }
}

/// A platform a product supports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Platform {
    /// Display name (e.g., "CentOS 7")
    pub name: String,
    /// Architecture, used verbatim (e.g., "x86_64")
    pub arch: String,
    /// Supported versions, treated as opaque strings
    #[serde(
        default,
        alias = "versions",
        alias = "supportedVersions",
        deserialize_with = "deserialize_versions"
    )]
    pub supported_versions: Vec<String>,
}

impl Platform {
    pub fn new(name: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arch: arch.into(),
            supported_versions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.supported_versions.push(version.into());
        self
    }
}

/// One (product, platform, version) combination to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocTarget<'a> {
    pub product: &'a str,
    pub platform: &'a str,
    pub arch: &'a str,
    pub version: &'a str,
}

impl DocTarget<'_> {
    /// Output file name without extension.
    ///
    /// `<product>_<version>_<platform>_<arch>`, with product and platform
    /// normalized and version and arch used literally.
    pub fn output_stem(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            normalize_name(self.product),
            self.version,
            normalize_name(self.platform),
            self.arch
        )
    }
}

impl std::fmt::Display for DocTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} on {} ({})",
            self.product, self.version, self.platform, self.arch
        )
    }
}

impl DocsConfig {
    /// Iterate every (product, platform, version) combination in config order.
    pub fn targets(&self) -> impl Iterator<Item = DocTarget<'_>> + '_ {
        self.products.iter().flat_map(|product| {
            product.platforms.iter().flat_map(move |platform| {
                platform
                    .supported_versions
                    .iter()
                    .map(move |version| DocTarget {
                        product: &product.name,
                        platform: &platform.name,
                        arch: &platform.arch,
                        version,
                    })
            })
        })
    }

    /// Reject names that would escape the flat output directory.
    ///
    /// Product, platform, arch and version all end up in file names, so none
    /// of them may contain `/` or `\`.
    pub fn check_file_names(&self) -> ConfigResult<()> {
        for product in &self.products {
            check_name("product name", &product.name)?;
            for platform in &product.platforms {
                check_name("platform name", &platform.name)?;
                check_name("arch", &platform.arch)?;
                for version in &platform.supported_versions {
                    check_name("version", version)?;
                }
            }
        }
        Ok(())
    }

    /// Report problems that do not prevent generation.
    ///
    /// Returns human-readable warnings: empty sections, blank names and
    /// targets whose output file names collide.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.products.is_empty() {
            warnings.push("Configuration declares no products".to_string());
        }

        for product in &self.products {
            if product.name.trim().is_empty() {
                warnings.push("Product with an empty name".to_string());
            }
            if product.platforms.is_empty() {
                warnings.push(format!("Product '{}' declares no platforms", product.name));
            }
            for platform in &product.platforms {
                if platform.name.trim().is_empty() || platform.arch.trim().is_empty() {
                    warnings.push(format!(
                        "Product '{}' has a platform with an empty name or arch",
                        product.name
                    ));
                }
                if platform.supported_versions.is_empty() {
                    warnings.push(format!(
                        "Platform '{}' of product '{}' declares no supported versions",
                        platform.name, product.name
                    ));
                }
            }
        }

        let mut seen: HashMap<String, DocTarget<'_>> = HashMap::new();
        for target in self.targets() {
            let stem = target.output_stem();
            if let Some(previous) = seen.get(&stem) {
                warnings.push(format!(
                    "'{}' and '{}' both write {}; the later one wins",
                    previous, target, stem
                ));
            } else {
                seen.insert(stem, target);
            }
        }

        warnings
    }
}

fn check_name(field: &'static str, value: &str) -> ConfigResult<()> {
    if value.contains(['/', '\\']) {
        return Err(ConfigError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Version entries may be written as bare integers in YAML or TOML.
#[derive(Deserialize)]
#[serde(untagged)]
enum VersionRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn deserialize_versions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<VersionRepr>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|v| match v {
            VersionRepr::Text(s) => Ok(s),
            VersionRepr::Integer(i) => Ok(i.to_string()),
            VersionRepr::Float(f) => Err(serde::de::Error::custom(format!(
                "version {} must be quoted to keep its exact spelling",
                f
            ))),
        })
        .collect()
}
