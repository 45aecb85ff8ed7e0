//! Semantic compilation and index assembly for semdex.
//!
//! This crate drives every module of a JVM workspace through a SemanticDB-only
//! compilation pass and hands the combined output to the indexer:
//!
//! - [`host`]: the read-only build graph ([`HostGraph`], [`ManifestGraph`])
//! - [`plan`]: per-variant compile plans and [`extra_flags`]
//! - [`driver`] and [`toolchain`]: running compilers, collecting diagnostics
//! - [`classpath`] and [`metadata`]: dependency classpath with package identities
//! - [`index`]: `javacopts.txt` and the [`Indexer`] boundary
//! - [`pipeline`]: the phases tying it together

pub mod classpath;
pub mod driver;
mod error;
pub mod fetch;
pub mod host;
pub mod index;
pub mod metadata;
pub mod pipeline;
pub mod plan;
pub mod reporter;
pub mod runtime;
pub mod toolchain;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use classpath::ClasspathAggregator;
pub use driver::{Driver, Outcome};
pub use error::GenerateError;
pub use fetch::{CoursierFetcher, PluginFetcher};
pub use host::{HostGraph, ManifestGraph, Module, UpstreamOutput};
pub use index::{CommandIndexer, IndexAssembler, IndexBuildRequest, Indexer, SourceLanguage};
pub use pipeline::{
    Diagnostic, GenerateContext, GenerateOptions, Phase, PhaseInfo, Pipeline, Plugin, Services,
    Severity, SnapshotPlugin,
};
pub use plan::{CompileRequest, Plan, PlanBuilder, extra_flags};
pub use reporter::{Reporter, TracingReporter};
pub use toolchain::{CommandToolchain, Toolchain};
