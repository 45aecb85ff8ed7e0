//! Explain operation - pipeline and per-module plans without compiling.

use std::path::Path;

use eyre::Result;
use semdex_core::OutputFormat;
use semdex_pipeline::{HostGraph, Pipeline, Plan, PlanBuilder, PluginFetcher};

use crate::reports::{ExplainReport, ModulePlan, PhaseInfo};

/// Execute the explain operation.
///
/// Plans every module the way `generate` would. Plugins are resolved so
/// the plan shows the jars, but nothing is compiled.
pub fn explain(
    config_path: &Path,
    host: &dyn HostGraph,
    fetcher: &dyn PluginFetcher,
    output: &Path,
    destination: &Path,
) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();
    let phases = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let format = OutputFormat::from_filename(&output.to_string_lossy());

    let builder = PlanBuilder::new(host, fetcher, destination);
    let mut modules = Vec::new();
    for module in host.modules() {
        let plan = builder.build(module)?;
        modules.push(match plan {
            Plan::Compile(request) => ModulePlan::Compile {
                name: request.module,
                variant: request.variant.to_string(),
                sources: request.sources.len(),
                options: request.options,
                javac_options: request.javac_options,
                classpath: request.classpath.len(),
                plugins: request.plugin_classpath,
                upstream: module.upstream.as_ref().map_or(0, |u| u.outputs().len()),
            },
            Plan::Skip { module, reason } => ModulePlan::Skip {
                name: module,
                reason,
            },
        });
    }

    Ok(ExplainReport {
        config_path: config_path.to_path_buf(),
        workspace_root: host.workspace_root().to_path_buf(),
        build_tool: host.build_tool().to_string(),
        host_version: host.host_version().map(ToString::to_string),
        runtime_version: host.runtime_version(),
        output: output.to_path_buf(),
        format: format.is_known().then(|| format.as_str().to_string()),
        destination: destination.to_path_buf(),
        phases,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use semdex_core::Version;
    use semdex_manifest::Variant;
    use semdex_pipeline::{
        Module,
        testing::{FakeHost, StaticFetcher},
    };

    use super::*;

    #[test]
    fn test_explain_plans_without_compiling() {
        let host = FakeHost::new("/ws")
            .with_host_version(Version::new(0, 9, 0))
            .with_module(Module::new("core", Variant::Scala3).with_sources(["/ws/A.scala"]))
            .with_module(Module::new("app", Variant::Java));
        let fetcher = StaticFetcher::new(["/cache/semanticdb.jar"]);

        let report = explain(
            Path::new("semdex.toml"),
            &host,
            &fetcher,
            Path::new("index.xyz"),
            Path::new("/ws/out/semdex"),
        )
        .unwrap();

        assert_eq!(report.phases.len(), 4);
        assert_eq!(report.format, None);
        assert_eq!(report.host_version.as_deref(), Some("0.9.0"));
        assert_eq!(report.destination, PathBuf::from("/ws/out/semdex"));

        match &report.modules[0] {
            ModulePlan::Compile { name, options, .. } => {
                assert_eq!(name, "core");
                assert!(options.contains(&"-Xsemanticdb".to_string()));
            }
            other => panic!("unexpected plan: {other:?}"),
        }
        assert!(matches!(&report.modules[1], ModulePlan::Skip { name, .. } if name == "app"));
        assert_eq!(fetcher.calls(), 0);
    }
}
