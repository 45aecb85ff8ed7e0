use std::{fmt, path::PathBuf};

use serde::Serialize;

/// Maven coordinates of a dependency, used to attribute symbols to packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageIdentity {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl PackageIdentity {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// A resolved dependency path, optionally attributed to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClasspathEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageIdentity>,
}

impl ClasspathEntry {
    pub fn new(path: impl Into<PathBuf>, package: Option<PackageIdentity>) -> Self {
        Self {
            path: path.into(),
            package,
        }
    }
}
