//! Check operation - manifest validation.
//!
//! Parsing already rejected malformed manifests; this collects the
//! softer findings and a module summary.

use semdex_manifest::{SemdexToml, Variant};
use semdex_pipeline::plan::MIN_JAVA_HOST_VERSION;

use crate::reports::{CheckReport, ModuleSummary};

/// Execute the check operation.
pub fn check(file: &SemdexToml) -> CheckReport {
    let manifest = file.manifest();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    if manifest.modules.is_empty() {
        warnings.push("no modules declared; the index will be empty".to_string());
    }

    for (name, module) in &manifest.modules {
        if module.sources.is_empty() {
            warnings.push(format!("module '{}' has no sources and will not be compiled", name));
        }
        if module.variant != Variant::Scala2 && module.scala_version.is_some() {
            infos.push(format!(
                "module '{}' sets scala_version, which only the scala2 variant uses",
                name
            ));
        }
    }

    if manifest.has_java_modules() {
        match &manifest.workspace.host_version {
            Some(version) if *version < MIN_JAVA_HOST_VERSION => warnings.push(format!(
                "host_version {} is older than {}; java modules will be skipped",
                version, MIN_JAVA_HOST_VERSION
            )),
            _ => {}
        }
        if manifest.workspace.java_version.is_none() {
            infos.push(format!(
                "java_version not set; it will be detected with '{} -version'",
                manifest.tools.java
            ));
        }
    }

    let modules = manifest
        .modules
        .iter()
        .map(|(name, module)| ModuleSummary {
            name: name.clone(),
            variant: module.variant.to_string(),
            sources: module.sources.len(),
            dependencies: module.dependencies.len(),
            upstream: module.upstream.clone(),
        })
        .collect();

    CheckReport {
        config_path: file.path().to_path_buf(),
        root: file.root(),
        warnings,
        infos,
        modules,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn open(content: &str) -> (tempfile::TempDir, SemdexToml) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("semdex.toml");
        fs::write(&path, content).unwrap();
        let file = SemdexToml::open(&path).unwrap();
        (dir, file)
    }

    #[test]
    fn test_clean_manifest() {
        let (_dir, file) = open(
            r#"
            [workspace]
            java_version = 17

            [modules.core]
            variant = "scala3"
            sources = ["core/A.scala"]

            [modules.app]
            variant = "java"
            sources = ["app/App.java"]
            upstream = ["core"]
        "#,
        );

        let report = check(&file);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.infos.is_empty());
        assert_eq!(report.modules.len(), 2);
        assert_eq!(report.modules[1].name, "app");
        assert_eq!(report.modules[1].variant, "java");
        assert_eq!(report.modules[1].upstream, vec!["core"]);
    }

    #[test]
    fn test_findings() {
        let (_dir, file) = open(
            r#"
            [workspace]
            host_version = "0.10.0"

            [modules.core]
            variant = "scala3"
            scala_version = "3.3.1"

            [modules.app]
            variant = "java"
            sources = ["app/App.java"]
        "#,
        );

        let report = check(&file);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("'core' has no sources"));
        assert!(report.warnings[1].contains("java modules will be skipped"));
        assert_eq!(report.infos.len(), 2);
    }
}
