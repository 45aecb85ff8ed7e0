//! Index assembly: from SemanticDB targetroots to one index file.

use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use eyre::Result;
use semdex_core::{ClasspathEntry, File, OutputFormat, PackageIdentity, ToolIdentity};
use semdex_manifest::Variant;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    GenerateError,
    pipeline::{Diagnostic, Severity},
    reporter::Reporter,
};

/// Name of the classpath file the indexer reads from each targetroot.
pub const JAVACOPTS_FILE: &str = "javacopts.txt";

/// Language the index is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Scala,
    Java,
}

impl SourceLanguage {
    /// `Scala` if any compiled module is a Scala module, else `Java`.
    pub fn from_variants(variants: impl IntoIterator<Item = Variant>) -> Self {
        if variants.into_iter().any(|v| v.is_scala()) {
            SourceLanguage::Scala
        } else {
            SourceLanguage::Java
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Scala => "scala",
            SourceLanguage::Java => "java",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the indexer needs to produce the final index.
#[derive(Serialize)]
pub struct IndexBuildRequest<'a> {
    pub targetroots: Vec<PathBuf>,
    pub output: PathBuf,
    pub workspace_root: PathBuf,
    #[serde(skip)]
    pub reporter: &'a dyn Reporter,
    pub tool: ToolIdentity,
    pub language: SourceLanguage,
    pub format: OutputFormat,
    pub parallel: bool,
    pub packages: Vec<PackageIdentity>,
    /// Empty: the host build is not one the indexer knows by name.
    pub build_kind: String,
}

impl fmt::Debug for IndexBuildRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexBuildRequest")
            .field("targetroots", &self.targetroots)
            .field("output", &self.output)
            .field("workspace_root", &self.workspace_root)
            .field("tool", &self.tool)
            .field("language", &self.language)
            .field("format", &self.format)
            .field("parallel", &self.parallel)
            .field("packages", &self.packages)
            .field("build_kind", &self.build_kind)
            .finish_non_exhaustive()
    }
}

/// Builds an index from SemanticDB files.
pub trait Indexer {
    fn index(&self, request: &IndexBuildRequest<'_>) -> Result<()>;
}

/// Runs `scip-java index-semanticdb` as a child process.
///
/// The indexer reads package information from `javacopts.txt` in each
/// targetroot and infers the format from the output extension, so only the
/// output, parallelism, build kind and targetroots go on the command line.
/// The request's tool, format, language and packages are informational for
/// this backend.
///
/// The process runs from the workspace root.
#[derive(Debug, Clone)]
pub struct CommandIndexer {
    program: String,
}

impl CommandIndexer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, request: &IndexBuildRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&request.workspace_root)
            .arg("index-semanticdb")
            .arg("--output")
            .arg(&request.output);
        if !request.parallel {
            cmd.arg("--no-parallel");
        }
        if !request.build_kind.is_empty() {
            cmd.args(["--build-kind", request.build_kind.as_str()]);
        }
        cmd.args(&request.targetroots);
        cmd
    }
}

impl Indexer for CommandIndexer {
    fn index(&self, request: &IndexBuildRequest<'_>) -> Result<()> {
        debug!(program = %self.program, output = %request.output.display(), "running indexer");

        let output = self
            .command(request)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                GenerateError::Indexer(format!("failed to run '{}': {}", self.program, e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            request.reporter.report(&indexer_diagnostic(line));
        }

        if !output.status.success() {
            let message = match stderr.trim() {
                "" => format!("'{}' exited with {}", self.program, output.status),
                text => text.to_string(),
            };
            return Err(GenerateError::Indexer(message).into());
        }
        Ok(())
    }
}

fn indexer_diagnostic(line: &str) -> Diagnostic {
    let severity = if line.starts_with("error") {
        Severity::Error
    } else if line.starts_with("warn") {
        Severity::Warning
    } else {
        Severity::Info
    };
    Diagnostic::new(severity, "indexer", line.trim_end())
}

/// Prepares the destination directory for indexing and builds the request.
pub struct IndexAssembler<'a> {
    destination: &'a Path,
}

impl<'a> IndexAssembler<'a> {
    pub fn new(destination: &'a Path) -> Self {
        Self { destination }
    }

    /// Write `javacopts.txt` with the aggregated classpath.
    pub fn write_javacopts(&self, classpath: &[ClasspathEntry]) -> Result<PathBuf> {
        let path = self.destination.join(JAVACOPTS_FILE);
        File::new(&path, javacopts(classpath)).write()?;
        debug!(path = %path.display(), entries = classpath.len(), "wrote javacopts");
        Ok(path)
    }

    /// Request for an index written to `output` inside the destination.
    pub fn request<'r>(
        &self,
        output: &Path,
        workspace_root: &Path,
        reporter: &'r dyn Reporter,
        language: SourceLanguage,
        format: OutputFormat,
        classpath: &[ClasspathEntry],
    ) -> IndexBuildRequest<'r> {
        IndexBuildRequest {
            targetroots: vec![self.destination.to_path_buf()],
            output: self.destination.join(output),
            workspace_root: workspace_root.to_path_buf(),
            reporter,
            tool: ToolIdentity::current(),
            language,
            format,
            parallel: true,
            packages: classpath.iter().filter_map(|e| e.package.clone()).collect(),
            build_kind: String::new(),
        }
    }

    /// Run the indexer once [`write_javacopts`](Self::write_javacopts) has
    /// prepared the destination.
    ///
    /// # Errors
    ///
    /// Indexer failures are returned as they were reported.
    pub fn assemble(&self, indexer: &dyn Indexer, request: &IndexBuildRequest<'_>) -> Result<()> {
        info!(
            output = %request.output.display(),
            format = %request.format,
            language = %request.language,
            packages = request.packages.len(),
            "building index"
        );
        indexer.index(request)
    }
}

/// `-classpath` followed by the colon-joined paths, one per line.
fn javacopts(classpath: &[ClasspathEntry]) -> String {
    let joined = classpath
        .iter()
        .map(|e| e.path.to_string_lossy())
        .collect::<Vec<_>>()
        .join(":");
    format!("-classpath\n{}\n", joined)
}
