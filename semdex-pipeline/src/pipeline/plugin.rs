//! Pipeline plugin trait.

use eyre::Result;

use super::GenerateContext;

/// A plugin that can hook into the generate pipeline.
///
/// Plugins receive callbacks before and after each phase runs and may
/// inspect or modify the context.
///
/// # Example
///
/// ```ignore
/// struct TimingPlugin {
///     start_times: RwLock<HashMap<String, Instant>>,
/// }
///
/// impl Plugin for TimingPlugin {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_phase(&self, phase: &str, _ctx: &mut GenerateContext) -> Result<()> {
///         self.start_times.write().unwrap().insert(phase.to_string(), Instant::now());
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut GenerateContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully. Return an error to abort
    /// the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut GenerateContext) -> Result<()> {
        Ok(())
    }
}
