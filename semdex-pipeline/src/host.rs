//! The host build graph seen by the pipeline.
//!
//! Components receive a read-only [`HostGraph`] instead of reaching into any
//! global build state. [`ManifestGraph`] is the implementation backed by
//! semdex.toml.

use std::path::{Path, PathBuf};

use eyre::Result;
use indexmap::IndexSet;
use semdex_core::Version;
use semdex_manifest::{Manifest, ModuleConfig, SemdexToml, Variant};
use tracing::debug;

use crate::runtime;

/// Read-only view of the host build graph.
pub trait HostGraph {
    fn workspace_root(&self) -> &Path;

    /// Build tool name reported to the javac plugin.
    fn build_tool(&self) -> &str;

    /// Version of the host build tool, if declared.
    fn host_version(&self) -> Option<&Version>;

    /// Major version of the Java runtime compilers run on, if known.
    fn runtime_version(&self) -> Option<u32>;

    /// Modules in dependency order.
    fn modules(&self) -> &[Module];
}

/// Compiled output of a module's upstream dependencies.
///
/// Owned by the host build; the pipeline passes it to the toolchain untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamOutput {
    outputs: Vec<PathBuf>,
}

impl UpstreamOutput {
    pub fn new(outputs: Vec<PathBuf>) -> Self {
        Self { outputs }
    }

    /// Class directories produced by the upstream modules.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }
}

/// A module to run through semantic compilation.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub variant: Variant,
    pub scala_version: Option<Version>,
    pub sources: Vec<PathBuf>,
    /// Compile classpath, de-duplicated in first-seen order.
    pub classpath: Vec<PathBuf>,
    pub options: Vec<String>,
    pub javac_options: Vec<String>,
    /// Resolved dependency artifacts.
    pub dependencies: Vec<PathBuf>,
    pub upstream: Option<UpstreamOutput>,
}

impl Module {
    pub fn new(name: impl Into<String>, variant: Variant) -> Self {
        Self {
            name: name.into(),
            variant,
            scala_version: None,
            sources: Vec::new(),
            classpath: Vec::new(),
            options: Vec::new(),
            javac_options: Vec::new(),
            dependencies: Vec::new(),
            upstream: None,
        }
    }

    pub fn with_scala_version(mut self, version: Version) -> Self {
        self.scala_version = Some(version);
        self
    }

    pub fn with_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_classpath<I, P>(mut self, classpath: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.classpath = dedup_paths(classpath.into_iter().map(Into::into));
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_javac_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.javac_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dependencies<I, P>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_upstream(mut self, upstream: UpstreamOutput) -> Self {
        self.upstream = Some(upstream);
        self
    }
}

fn dedup_paths(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    paths.collect::<IndexSet<_>>().into_iter().collect()
}

/// Host graph described by a semdex.toml manifest.
#[derive(Debug, Clone)]
pub struct ManifestGraph {
    root: PathBuf,
    build_tool: String,
    host_version: Option<Version>,
    runtime_version: Option<u32>,
    modules: Vec<Module>,
}

impl ManifestGraph {
    /// Build the graph from an opened manifest, detecting the Java runtime
    /// version when Java modules need it and the manifest does not declare it.
    pub fn open(file: &SemdexToml) -> Result<Self> {
        let manifest = file.manifest();
        let runtime_version = match manifest.workspace.java_version {
            Some(version) => Some(version),
            None if manifest.has_java_modules() => {
                let version = runtime::detect_java_version(&manifest.tools.java)?;
                debug!(version, "detected java runtime");
                Some(version)
            }
            None => None,
        };
        Ok(Self::new(manifest, file.root(), runtime_version))
    }

    pub fn new(manifest: &Manifest, root: PathBuf, runtime_version: Option<u32>) -> Self {
        let modules = manifest
            .modules
            .iter()
            .map(|(name, config)| lower_module(manifest, &root, name, config))
            .collect();

        Self {
            build_tool: manifest.workspace.build_tool.clone(),
            host_version: manifest.workspace.host_version.clone(),
            runtime_version,
            modules,
            root,
        }
    }
}

impl HostGraph for ManifestGraph {
    fn workspace_root(&self) -> &Path {
        &self.root
    }

    fn build_tool(&self) -> &str {
        &self.build_tool
    }

    fn host_version(&self) -> Option<&Version> {
        self.host_version.as_ref()
    }

    fn runtime_version(&self) -> Option<u32> {
        self.runtime_version
    }

    fn modules(&self) -> &[Module] {
        &self.modules
    }
}

fn lower_module(manifest: &Manifest, root: &Path, name: &str, config: &ModuleConfig) -> Module {
    let resolve =
        |paths: &[PathBuf]| -> Vec<PathBuf> { paths.iter().map(|p| root.join(p)).collect() };

    let upstream = (!config.upstream.is_empty()).then(|| {
        let outputs = config
            .upstream
            .iter()
            .map(|dep| module_output(manifest, root, dep))
            .collect();
        UpstreamOutput::new(outputs)
    });

    let mut module = Module::new(name, config.variant)
        .with_sources(resolve(&config.sources))
        .with_classpath(resolve(&config.classpath))
        .with_options(config.options.iter().cloned())
        .with_javac_options(config.javac_options.iter().cloned())
        .with_dependencies(resolve(&config.dependencies));
    module.scala_version = config.scala_version.clone();
    module.upstream = upstream;
    module
}

/// Regular compiled output of a module: its declared `output`, or
/// `out/<name>/classes` under the workspace root.
fn module_output(manifest: &Manifest, root: &Path, name: &str) -> PathBuf {
    manifest
        .modules
        .get(name)
        .and_then(|m| m.output.as_ref())
        .map(|output| root.join(output))
        .unwrap_or_else(|| root.join("out").join(name).join("classes"))
}
