//! Pipeline phase trait.

use eyre::Result;
use serde::Serialize;

use super::GenerateContext;
use crate::{
    fetch::PluginFetcher, host::HostGraph, index::Indexer, reporter::Reporter,
    toolchain::Toolchain,
};

/// Information about a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// External collaborators available to every phase.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub host: &'a dyn HostGraph,
    pub fetcher: &'a dyn PluginFetcher,
    pub toolchain: &'a dyn Toolchain,
    pub indexer: &'a dyn Indexer,
    pub reporter: &'a dyn Reporter,
}

/// A phase in the generate pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads what
/// earlier phases left in the [`GenerateContext`] and adds its own results.
///
/// Built-in phases:
/// - `ResolveFormatPhase` - resolves the output format
/// - `CompilePhase` - plans and compiles every module
/// - `AggregatePhase` - aggregates the dependency classpath
/// - `IndexPhase` - writes javacopts.txt and runs the indexer
pub trait Phase: Send + Sync {
    /// The name of this phase (used in logs, snapshots and plugin hooks).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase.
    ///
    /// # Errors
    ///
    /// Any error aborts the run; there is no partial success.
    fn run(&self, ctx: &mut GenerateContext, services: &Services<'_>) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
