//! Core operations.
//!
//! This module contains the business logic for semdex commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod generate;

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

pub use check::check;
pub use explain::explain;
pub use generate::generate;
use semdex_manifest::ToolsConfig;
use semdex_pipeline::{
    CommandIndexer, CommandToolchain, CoursierFetcher, HostGraph, Reporter, Services,
};

/// Default SemanticDB destination under the workspace root.
fn default_destination(root: &Path) -> PathBuf {
    root.join("out").join("semdex")
}

/// The SemanticDB destination: `--dest` made absolute, or the default under
/// the workspace root.
///
/// Compilers and the indexer run from the workspace root, so a destination
/// relative to the current directory would point elsewhere for them.
pub fn destination(dest: Option<&Path>, root: &Path) -> Result<PathBuf> {
    match dest {
        Some(dest) => std::path::absolute(dest)
            .wrap_err_with(|| format!("invalid destination '{}'", dest.display())),
        None => Ok(default_destination(root)),
    }
}

/// The external programs configured in `[tools]`.
pub struct Tools {
    fetcher: CoursierFetcher,
    toolchain: CommandToolchain,
    indexer: CommandIndexer,
}

impl Tools {
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self {
            fetcher: CoursierFetcher::new(&config.coursier),
            toolchain: CommandToolchain::new(&config.scalac, &config.javac),
            indexer: CommandIndexer::new(&config.indexer),
        }
    }

    pub fn services<'a>(
        &'a self,
        host: &'a dyn HostGraph,
        reporter: &'a dyn Reporter,
    ) -> Services<'a> {
        Services {
            host,
            fetcher: &self.fetcher,
            toolchain: &self.toolchain,
            indexer: &self.indexer,
            reporter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_defaults_under_root() {
        let dest = destination(None, Path::new("/ws")).unwrap();
        assert_eq!(dest, PathBuf::from("/ws/out/semdex"));
    }

    #[test]
    fn test_relative_destination_is_made_absolute() {
        let dest = destination(Some(Path::new("build/semdex")), Path::new("/ws")).unwrap();
        assert!(dest.is_absolute());
        assert_eq!(dest, std::env::current_dir().unwrap().join("build/semdex"));
    }

    #[test]
    fn test_absolute_destination_is_kept() {
        let dest = destination(Some(Path::new("/tmp/semdex")), Path::new("/ws")).unwrap();
        assert_eq!(dest, PathBuf::from("/tmp/semdex"));
    }
}
