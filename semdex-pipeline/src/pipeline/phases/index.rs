//! Index phase - prepares the destination and runs the indexer.

use eyre::{Result, eyre};

use crate::{
    index::IndexAssembler,
    pipeline::{GenerateContext, Phase, Services},
};

/// Phase that turns the shared destination into the final index.
///
/// Must run after `ResolveFormatPhase` and `AggregatePhase`.
pub struct IndexPhase;

impl Phase for IndexPhase {
    fn name(&self) -> &'static str {
        "index"
    }

    fn description(&self) -> &'static str {
        "Write javacopts.txt and build the index from the SemanticDB files"
    }

    fn run(&self, ctx: &mut GenerateContext, services: &Services<'_>) -> Result<()> {
        let format = ctx
            .format
            .ok_or_else(|| eyre!("format not set - IndexPhase must run after ResolveFormatPhase"))?;
        let classpath = ctx
            .classpath
            .as_deref()
            .ok_or_else(|| eyre!("classpath not set - IndexPhase must run after AggregatePhase"))?;

        let assembler = IndexAssembler::new(&ctx.options.destination);
        assembler.write_javacopts(classpath)?;

        let request = assembler.request(
            &ctx.options.output,
            services.host.workspace_root(),
            services.reporter,
            ctx.language(),
            format,
            classpath,
        );
        assembler.assemble(services.indexer, &request)?;

        ctx.index = Some(request.output);
        Ok(())
    }
}
