//! Aggregate phase - flattens the modules' dependency classpaths.

use eyre::Result;

use crate::{
    classpath::ClasspathAggregator,
    pipeline::{GenerateContext, Phase, Services},
};

/// Phase that aggregates the classpath of every host module.
///
/// Modules skipped at planning still contribute their dependencies.
pub struct AggregatePhase;

impl Phase for AggregatePhase {
    fn name(&self) -> &'static str {
        "aggregate"
    }

    fn description(&self) -> &'static str {
        "Aggregate the dependency classpath with package identities"
    }

    fn run(&self, ctx: &mut GenerateContext, services: &Services<'_>) -> Result<()> {
        let entries = ClasspathAggregator::new()
            .deduplicate(ctx.options.dedup_classpath)
            .aggregate(services.host.modules());
        ctx.classpath = Some(entries);
        Ok(())
    }
}
