//! # pgdoc_config
//!
//! Configuration loading for the pgdoc document generator.
//!
//! A configuration lists products, each with platforms, each with the
//! versions it supports. The generator renders one document for every
//! (product, platform, version) combination, called a [`DocTarget`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use pgdoc_config::ConfigReader;
//!
//! let config = ConfigReader::read("pgdoc.yaml").unwrap();
//! for warning in config.validate() {
//!     eprintln!("warning: {}", warning);
//! }
//! for target in config.targets() {
//!     println!("{}", target.output_stem());
//! }
//! ```

pub mod error;
pub mod models;
pub mod naming;
pub mod reader;

pub use error::{ConfigError, ConfigResult};
pub use models::{DocTarget, DocsConfig, GeneratorSettings, Platform, Product};
pub use naming::normalize_name;
pub use reader::{ConfigFormat, ConfigReader};
