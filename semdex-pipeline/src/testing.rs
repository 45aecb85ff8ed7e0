//! In-memory collaborators for exercising the pipeline without compilers.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream crates.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use eyre::Result;
use semdex_core::{OutputFormat, PackageIdentity, ToolIdentity, Version};

use crate::{
    GenerateError,
    fetch::PluginFetcher,
    host::{HostGraph, Module, UpstreamOutput},
    index::{Indexer, IndexBuildRequest, JAVACOPTS_FILE, SourceLanguage},
    pipeline::{Diagnostic, Services},
    plan::CompileRequest,
    reporter::Reporter,
    toolchain::Toolchain,
};

/// Reporter that keeps every diagnostic.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingReporter {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}

/// Host graph assembled in code.
#[derive(Debug, Clone)]
pub struct FakeHost {
    root: PathBuf,
    build_tool: String,
    host_version: Option<Version>,
    runtime_version: Option<u32>,
    modules: Vec<Module>,
}

impl FakeHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            build_tool: "semdex".to_string(),
            host_version: None,
            runtime_version: None,
            modules: Vec::new(),
        }
    }

    pub fn with_build_tool(mut self, build_tool: impl Into<String>) -> Self {
        self.build_tool = build_tool.into();
        self
    }

    pub fn with_host_version(mut self, version: Version) -> Self {
        self.host_version = Some(version);
        self
    }

    pub fn with_runtime_version(mut self, version: u32) -> Self {
        self.runtime_version = Some(version);
        self
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }
}

impl HostGraph for FakeHost {
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

/// Fetcher returning a fixed set of jars, or always failing.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    jars: Vec<PathBuf>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new<I, P>(jars: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            jars: jars.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of fetches attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fetch(&self, coordinate: String) -> Result<Vec<PathBuf>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GenerateError::PluginResolution {
                coordinate,
                message: "not found".to_string(),
            }
            .into());
        }
        Ok(self.jars.clone())
    }
}

impl PluginFetcher for StaticFetcher {
    fn scalac_plugin(&self, scala_version: &Version) -> Result<Vec<PathBuf>> {
        self.fetch(crate::fetch::scalac_plugin_coordinate(scala_version))
    }

    fn javac_plugin(&self) -> Result<Vec<PathBuf>> {
        self.fetch(crate::fetch::javac_plugin_coordinate())
    }
}

/// One toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCall {
    /// `compile_mixed` or `compile_java`.
    pub entry: &'static str,
    pub request: CompileRequest,
    pub upstream: Option<UpstreamOutput>,
}

/// Toolchain that records its invocations instead of compiling.
#[derive(Debug, Default)]
pub struct RecordingToolchain {
    calls: Mutex<Vec<ToolchainCall>>,
    emit: Vec<Diagnostic>,
    failure: Option<String>,
}

impl RecordingToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `diagnostic` on every invocation.
    pub fn emitting(mut self, diagnostic: Diagnostic) -> Self {
        self.emit.push(diagnostic);
        self
    }

    /// Fail every invocation with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<ToolchainCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the compiled modules, in invocation order.
    pub fn modules(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.request.module).collect()
    }

    fn record(
        &self,
        entry: &'static str,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ToolchainCall {
                entry,
                request: request.clone(),
                upstream: upstream.cloned(),
            });
        for diagnostic in &self.emit {
            reporter.report(diagnostic);
        }
        match &self.failure {
            Some(message) => Err(eyre::eyre!("{}", message)),
            None => Ok(()),
        }
    }
}

impl Toolchain for RecordingToolchain {
    fn compile_mixed(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        self.record("compile_mixed", request, upstream, reporter)
    }

    fn compile_java(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        self.record("compile_java", request, upstream, reporter)
    }
}

/// Owned copy of an [`IndexBuildRequest`] as the indexer received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCall {
    pub targetroots: Vec<PathBuf>,
    pub output: PathBuf,
    pub workspace_root: PathBuf,
    pub tool: ToolIdentity,
    pub language: SourceLanguage,
    pub format: OutputFormat,
    pub parallel: bool,
    pub packages: Vec<PackageIdentity>,
    pub build_kind: String,
    /// Content of `javacopts.txt` in the first targetroot at invocation time.
    pub javacopts: Option<String>,
}

/// Indexer that records its requests instead of indexing.
#[derive(Debug, Default)]
pub struct RecordingIndexer {
    calls: Mutex<Vec<IndexCall>>,
    failure: Option<String>,
}

impl RecordingIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<IndexCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Indexer for RecordingIndexer {
    fn index(&self, request: &IndexBuildRequest<'_>) -> Result<()> {
        let javacopts = request
            .targetroots
            .first()
            .and_then(|root| fs::read_to_string(root.join(JAVACOPTS_FILE)).ok());
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(IndexCall {
                targetroots: request.targetroots.clone(),
                output: request.output.clone(),
                workspace_root: request.workspace_root.clone(),
                tool: request.tool.clone(),
                language: request.language,
                format: request.format,
                parallel: request.parallel,
                packages: request.packages.clone(),
                build_kind: request.build_kind.clone(),
                javacopts,
            });
        match &self.failure {
            Some(message) => Err(GenerateError::Indexer(message.clone()).into()),
            None => Ok(()),
        }
    }
}

/// A full set of fake collaborators.
pub struct Fixture {
    pub host: FakeHost,
    pub fetcher: StaticFetcher,
    pub toolchain: RecordingToolchain,
    pub indexer: RecordingIndexer,
    pub reporter: CollectingReporter,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            host: FakeHost::new("/ws"),
            fetcher: StaticFetcher::new(["/cache/semanticdb.jar"]),
            toolchain: RecordingToolchain::new(),
            indexer: RecordingIndexer::new(),
            reporter: CollectingReporter::default(),
        }
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            host: &self.host,
            fetcher: &self.fetcher,
            toolchain: &self.toolchain,
            indexer: &self.indexer,
            reporter: &self.reporter,
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
