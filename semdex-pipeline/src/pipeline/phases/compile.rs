//! Compile phase - plans and compiles each module in host order.

use eyre::Result;
use tracing::info;

use crate::{
    driver::{Driver, Outcome},
    pipeline::{CompiledModule, GenerateContext, Phase, Services},
    plan::{Plan, PlanBuilder},
};

/// Phase that runs every host module through semantic compilation.
///
/// Modules are processed strictly in host order; the first failure aborts
/// the run. A skipped module is recorded and the remaining modules still run.
pub struct CompilePhase;

impl Phase for CompilePhase {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn description(&self) -> &'static str {
        "Compile each module with SemanticDB enabled, stopping after extraction"
    }

    fn run(&self, ctx: &mut GenerateContext, services: &Services<'_>) -> Result<()> {
        let modules = services.host.modules();
        info!(modules = modules.len(), "compiling modules");

        let destination = ctx.options.destination.clone();
        let builder = PlanBuilder::new(services.host, services.fetcher, &destination);
        let driver = Driver::new(services.toolchain, services.reporter);

        let mut plans = Vec::with_capacity(modules.len());
        for module in modules {
            let plan = builder.build(module)?;
            match &plan {
                Plan::Compile(request) => {
                    if driver.compile(request, module.upstream.as_ref())? == Outcome::Compiled {
                        ctx.compiled.push(CompiledModule {
                            name: module.name.clone(),
                            variant: module.variant,
                        });
                    }
                }
                Plan::Skip { reason, .. } => {
                    ctx.add_warning(
                        self.name(),
                        format!("skipped module '{}': {}", module.name, reason),
                    );
                }
            }
            plans.push(plan);
        }
        ctx.plans.extend(plans);
        Ok(())
    }
}
