//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "semdex.toml")
    }
}

impl Manifest {
    /// Parse a semdex.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a semdex.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    ParseContext::new(content, filename).validate(&manifest)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use semdex_core::Version;

    use super::*;
    use crate::Variant;

    #[test]
    fn test_parse_minimal() {
        let manifest: Manifest = r#"
            [modules.core]
            variant = "scala3"
            sources = ["core/src/Core.scala"]
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.workspace.build_tool, "semdex");
        assert_eq!(manifest.tools.indexer, "scip-java");
        let core = &manifest.modules["core"];
        assert_eq!(core.variant, Variant::Scala3);
        assert_eq!(core.sources, vec![PathBuf::from("core/src/Core.scala")]);
        assert!(core.upstream.is_empty());
    }

    #[test]
    fn test_parse_workspace_section() {
        let manifest: Manifest = r#"
            [workspace]
            root = ".."
            build_tool = "mill"
            host_version = "0.11.6"
            java_version = 21

            [tools]
            coursier = "coursier"
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.workspace.root, Some(PathBuf::from("..")));
        assert_eq!(manifest.workspace.build_tool, "mill");
        assert_eq!(manifest.workspace.host_version, Some(Version::new(0, 11, 6)));
        assert_eq!(manifest.workspace.java_version, Some(21));
        assert_eq!(manifest.tools.coursier, "coursier");
        assert_eq!(manifest.tools.javac, "javac");
    }

    #[test]
    fn test_modules_keep_declaration_order() {
        let manifest: Manifest = r#"
            [modules.zeta]
            variant = "java"

            [modules.alpha]
            variant = "java"
            upstream = ["zeta"]

            [modules.mid]
            variant = "scala3"
        "#
        .parse()
        .unwrap();

        let names: Vec<&str> = manifest.modules.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scala2_requires_version() {
        let err = r#"
            [modules.legacy]
            variant = "scala2"
        "#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::MissingScalaVersion { ref module, .. } if module == "legacy"));
    }

    #[test]
    fn test_upstream_must_be_declared_earlier() {
        let err = r#"
            [modules.app]
            variant = "scala3"
            upstream = ["core"]

            [modules.core]
            variant = "scala3"
        "#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(
            *err,
            Error::UnknownUpstream { ref module, ref upstream, .. } if module == "app" && upstream == "core"
        ));
    }

    #[test]
    fn test_self_upstream_rejected() {
        let err = r#"
            [modules.core]
            variant = "java"
            upstream = ["core"]
        "#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_invalid_module_name() {
        let err = r#"
            [modules."9lives"]
            variant = "java"
        "#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidModuleName { ref name, .. } if name == "9lives"));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let err = r#"
            [modules.core]
            variant = "kotlin"
        "#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = r#"
            [modules.core]
            variant = "java"
            souces = ["Main.java"]
        "#
        .parse::<Manifest>()
        .unwrap_err();

        assert!(matches!(*err, Error::Parse { .. }));
    }
}
