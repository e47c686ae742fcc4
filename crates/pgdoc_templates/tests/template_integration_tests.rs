//! End-to-end tests for the generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use pgdoc_config::{ConfigFormat, ConfigReader, DocsConfig};
use pgdoc_templates::{Generator, TemplateError};
use tempfile::tempdir;

const BODY: &str = "# {{ product.name }} {{ product.version }}\n\nInstall on {{ platform.name }} ({{ platform.arch }}).\n";

fn load_config(root: &Path, yaml: &str) -> DocsConfig {
    let mut config = ConfigReader::parse(yaml, ConfigFormat::Yaml).unwrap();
    config.settings.templates_dir = root.join("templates");
    config.settings.output_dir = root.join("output");
    config
}

fn add_template(root: &Path, product: &str, file: &str, body: &str) -> PathBuf {
    let dir = root.join("templates").join("products").join(product);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file);
    fs::write(&path, body).unwrap();
    path
}

fn output_files(root: &Path) -> Vec<String> {
    let dir = root.join("output");
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

const FOO_CONFIG: &str = r#"
products:
  - name: Foo
    platforms:
      - name: Bar Linux
        arch: x86_64
        supported_versions: ["1"]
"#;

#[tokio::test]
async fn test_most_specific_template_is_rendered() {
    let root = tempdir().unwrap();
    add_template(root.path(), "foo", "v1_bar-linux_x86_64.md.j2", BODY);
    add_template(root.path(), "foo", "bar-linux.md.j2", "# generic\n");
    let config = load_config(root.path(), FOO_CONFIG);

    let report = Generator::new(&config.settings).run(&config).await.unwrap();

    assert_eq!(report.written.len(), 1);
    assert_eq!(output_files(root.path()), vec!["foo_1_bar-linux_x86_64.md"]);
    let content =
        fs::read_to_string(root.path().join("output/foo_1_bar-linux_x86_64.md")).unwrap();
    assert_eq!(content, "# Foo 1\n\nInstall on Bar Linux (x86_64).\n");
}

#[tokio::test]
async fn test_platform_template_fallback() {
    let root = tempdir().unwrap();
    add_template(root.path(), "foo", "bar-linux.md.j2", BODY);
    let config = load_config(root.path(), FOO_CONFIG);

    Generator::new(&config.settings).run(&config).await.unwrap();

    let content =
        fs::read_to_string(root.path().join("output/foo_1_bar-linux_x86_64.md")).unwrap();
    assert_eq!(content, "# Foo 1\n\nInstall on Bar Linux (x86_64).\n");
}

#[tokio::test]
async fn test_missing_template_skips_target() {
    let root = tempdir().unwrap();
    add_template(root.path(), "other", "bar-linux.md.j2", BODY);
    let config = load_config(root.path(), FOO_CONFIG);

    let report = Generator::new(&config.settings).run(&config).await.unwrap();

    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].target, "Foo 1 on Bar Linux (x86_64)");
    assert!(output_files(root.path()).is_empty());
}

#[tokio::test]
async fn test_normalization_matches_lookup_and_output() {
    let root = tempdir().unwrap();
    add_template(root.path(), "foo-engine", "centos-7.md.j2", BODY);
    let config = load_config(
        root.path(),
        r#"
products:
  - name: Foo Engine
    platforms:
      - name: CentOS 7
        arch: x86_64
        versions: [14, 15]
"#,
    );

    Generator::new(&config.settings).run(&config).await.unwrap();

    assert_eq!(
        output_files(root.path()),
        vec![
            "foo-engine_14_centos-7_x86_64.md",
            "foo-engine_15_centos-7_x86_64.md",
        ]
    );
    let content =
        fs::read_to_string(root.path().join("output/foo-engine_15_centos-7_x86_64.md")).unwrap();
    assert!(content.contains("Install on CentOS 7 (x86_64)."));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let root = tempdir().unwrap();
    add_template(root.path(), "foo", "bar-linux.md.j2", BODY);
    let config = load_config(root.path(), FOO_CONFIG);

    let first = Generator::new(&config.settings).run(&config).await.unwrap();
    let first_content =
        fs::read(root.path().join("output/foo_1_bar-linux_x86_64.md")).unwrap();
    let second = Generator::new(&config.settings).run(&config).await.unwrap();
    let second_content =
        fs::read(root.path().join("output/foo_1_bar-linux_x86_64.md")).unwrap();

    assert_eq!(first.written, second.written);
    assert_eq!(first_content, second_content);
    assert_eq!(output_files(root.path()).len(), 1);
}

#[tokio::test]
async fn test_undefined_field_aborts_run() {
    let root = tempdir().unwrap();
    add_template(root.path(), "foo", "v1_bar-linux.md.j2", "{{ product.maintainer }}\n");
    add_template(root.path(), "foo", "bar-linux.md.j2", BODY);
    let config = load_config(
        root.path(),
        r#"
products:
  - name: Foo
    platforms:
      - name: Bar Linux
        arch: x86_64
        supported_versions: ["1", "2"]
"#,
    );

    let err = Generator::new(&config.settings)
        .run(&config)
        .await
        .unwrap_err();

    assert!(matches!(err, TemplateError::Expansion { .. }));
    // Fail fast: version 2 is never rendered either.
    assert!(output_files(root.path()).is_empty());
}
