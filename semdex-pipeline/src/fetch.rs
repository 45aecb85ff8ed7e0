//! Resolution of SemanticDB compiler plugins.

use std::{path::PathBuf, process::Command};

use eyre::Result;
use semdex_core::{SEMANTICDB_JAVAC_VERSION, SEMANTICDB_SCALAC_VERSION, Version};
use tracing::debug;

use crate::GenerateError;

/// Fetches plugin artifacts for the semantic compilation pass.
pub trait PluginFetcher {
    /// Jars for `semanticdb-scalac`, built for one exact Scala version.
    fn scalac_plugin(&self, scala_version: &Version) -> Result<Vec<PathBuf>>;

    /// Jars for `semanticdb-javac`.
    fn javac_plugin(&self) -> Result<Vec<PathBuf>>;
}

pub fn scalac_plugin_coordinate(scala_version: &Version) -> String {
    format!(
        "org.scalameta:semanticdb-scalac_{}:{}",
        scala_version, SEMANTICDB_SCALAC_VERSION
    )
}

pub fn javac_plugin_coordinate() -> String {
    format!("com.sourcegraph:semanticdb-javac:{}", SEMANTICDB_JAVAC_VERSION)
}

/// Fetches plugins with the Coursier CLI (`cs fetch --intransitive`).
#[derive(Debug, Clone)]
pub struct CoursierFetcher {
    program: String,
}

impl CoursierFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn fetch(&self, coordinate: &str) -> Result<Vec<PathBuf>> {
        debug!(coordinate, program = %self.program, "fetching plugin");

        let resolution_error = |message: String| GenerateError::PluginResolution {
            coordinate: coordinate.to_string(),
            message,
        };

        let output = Command::new(&self.program)
            .args(["fetch", "--intransitive", coordinate])
            .output()
            .map_err(|e| resolution_error(format!("failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(resolution_error(stderr.trim().to_string()).into());
        }

        let jars = parse_fetch_output(&String::from_utf8_lossy(&output.stdout));
        if jars.is_empty() {
            return Err(resolution_error("no artifacts returned".to_string()).into());
        }
        Ok(jars)
    }
}

impl PluginFetcher for CoursierFetcher {
    fn scalac_plugin(&self, scala_version: &Version) -> Result<Vec<PathBuf>> {
        self.fetch(&scalac_plugin_coordinate(scala_version))
    }

    fn javac_plugin(&self) -> Result<Vec<PathBuf>> {
        self.fetch(&javac_plugin_coordinate())
    }
}

/// One artifact path per non-empty line.
fn parse_fetch_output(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates() {
        assert_eq!(
            scalac_plugin_coordinate(&Version::new(2, 13, 12)),
            format!("org.scalameta:semanticdb-scalac_2.13.12:{}", SEMANTICDB_SCALAC_VERSION)
        );
        assert!(javac_plugin_coordinate().starts_with("com.sourcegraph:semanticdb-javac:"));
    }

    #[test]
    fn test_parse_fetch_output() {
        let stdout = "/cache/semanticdb-scalac_2.13.12-4.8.15.jar\n\n  /cache/extra.jar  \n";
        assert_eq!(
            parse_fetch_output(stdout),
            vec![
                PathBuf::from("/cache/semanticdb-scalac_2.13.12-4.8.15.jar"),
                PathBuf::from("/cache/extra.jar"),
            ]
        );
    }

    #[test]
    fn test_missing_program_is_resolution_error() {
        let fetcher = CoursierFetcher::new("semdex-test-no-such-coursier");
        let err = fetcher.javac_plugin().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::PluginResolution { .. })
        ));
    }
}
