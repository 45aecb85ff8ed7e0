use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A semdex.toml file with its parsed manifest.
#[derive(Debug)]
pub struct SemdexToml {
    path: PathBuf,
    dir: PathBuf,
    manifest: Manifest,
}

impl SemdexToml {
    /// Open and parse a semdex.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let io_error = |e: std::io::Error| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        };
        let content = std::fs::read_to_string(&path).map_err(io_error)?;
        let dir = std::path::absolute(&path)
            .map_err(io_error)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            dir,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The workspace root: `workspace.root` resolved against the manifest's
    /// directory, or the manifest's directory itself.
    ///
    /// Always absolute, so compilers and indexers agree on it whatever
    /// directory they are spawned in.
    pub fn root(&self) -> PathBuf {
        match &self.manifest.workspace.root {
            Some(root) => self.dir.join(root),
            None => self.dir.clone(),
        }
    }
}
