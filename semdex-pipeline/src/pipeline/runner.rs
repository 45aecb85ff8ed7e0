//! Pipeline orchestrator.

use eyre::Result;
use tracing::debug;

use super::{
    GenerateContext, GenerateOptions, Phase, PhaseInfo, Plugin, Services,
    phases::{AggregatePhase, CompilePhase, IndexPhase, ResolveFormatPhase},
};

/// The generate pipeline orchestrator.
///
/// Runs the built-in phases (resolve-format, compile, aggregate, index)
/// followed by any user phases, calling plugin hooks before and after each.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(debug_dir));
/// let ctx = pipeline.run(GenerateOptions::new("index.scip", dest), &services)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Every phase this pipeline runs, in order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Run a generate.
    ///
    /// # Errors
    ///
    /// Fails fast: the first phase error aborts the run and nothing after it
    /// executes.
    pub fn run(
        &self,
        options: GenerateOptions,
        services: &Services<'_>,
    ) -> Result<GenerateContext> {
        let mut ctx = GenerateContext::new(options);

        for phase in builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx, services)?;
        }

        Ok(ctx)
    }

    fn run_phase(
        &self,
        phase: &dyn Phase,
        ctx: &mut GenerateContext,
        services: &Services<'_>,
    ) -> Result<()> {
        let phase_name = phase.name();
        debug!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx, services)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(ResolveFormatPhase),
        Box::new(CompilePhase),
        Box::new(AggregatePhase),
        Box::new(IndexPhase),
    ]
}
