//! Render context handed to templates.

use serde::Serialize;

use pgdoc_config::DocTarget;

/// Data available to a template as `product.*` and `platform.*`.
///
/// Names are the raw display names from the configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderContext {
    pub product: ProductContext,
    pub platform: PlatformContext,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductContext {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlatformContext {
    pub name: String,
    pub arch: String,
}

impl RenderContext {
    /// Build the context for a target. Values are passed through verbatim.
    pub fn build(target: &DocTarget<'_>) -> Self {
        Self {
            product: ProductContext {
                name: target.product.to_string(),
                version: target.version.to_string(),
            },
            platform: PlatformContext {
                name: target.platform.to_string(),
                arch: target.arch.to_string(),
            },
        }
    }
}
