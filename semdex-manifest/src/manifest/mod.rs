//! Manifest types and parsing for semdex.toml files.

mod file;
mod parse;
mod validate;
mod variant;

use std::path::PathBuf;

pub use file::SemdexToml;
use indexmap::IndexMap;
use semdex_core::Version;
use serde::Deserialize;
pub use validate::ParseContext;
pub use variant::Variant;

/// Build tool reported to the javac plugin when the manifest names none.
pub const DEFAULT_BUILD_TOOL: &str = "semdex";

/// Root manifest for semdex.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Workspace metadata and host versions
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// External programs used to compile, fetch plugins and index
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Modules in build order
    #[serde(default)]
    pub modules: IndexMap<String, ModuleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Workspace root, relative to the manifest directory.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Name of the host build tool, passed to the javac plugin.
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Version of the host build tool, gating Java module support.
    #[serde(default)]
    pub host_version: Option<Version>,

    /// Major version of the Java runtime; detected when absent.
    #[serde(default)]
    pub java_version: Option<u32>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            build_tool: default_build_tool(),
            host_version: None,
            java_version: None,
        }
    }
}

fn default_build_tool() -> String {
    DEFAULT_BUILD_TOOL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub scalac: String,
    pub javac: String,
    pub java: String,
    pub coursier: String,
    pub indexer: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            scalac: "scalac".to_string(),
            javac: "javac".to_string(),
            java: "java".to_string(),
            coursier: "cs".to_string(),
            indexer: "scip-java".to_string(),
        }
    }
}

/// A module of the host build graph.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    pub variant: Variant,

    /// Required for the scala2 variant.
    #[serde(default)]
    pub scala_version: Option<Version>,

    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Compile classpath.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Extra scalac options.
    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub javac_options: Vec<String>,

    /// Resolved dependency artifacts, used for package attribution.
    #[serde(default)]
    pub dependencies: Vec<PathBuf>,

    /// Modules whose compiled output this module builds against.
    #[serde(default)]
    pub upstream: Vec<String>,

    /// Where the host build writes this module's regular compiled output.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Manifest {
    /// Check if a module is declared
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Returns true if any module uses the Java variant
    pub fn has_java_modules(&self) -> bool {
        self.modules.values().any(|m| m.variant == Variant::Java)
    }
}
