//! Generate operation - semantic compilation and indexing.

use eyre::Result;
use semdex_pipeline::{GenerateOptions, Pipeline, Services, SnapshotPlugin};

use crate::reports::{GenerateReport, SkippedModule};

/// Directory under the destination that receives `--visualize` snapshots.
pub const DEBUG_DIR: &str = ".semdex/debug";

/// Execute the generate operation.
///
/// Runs the full pipeline and summarizes what it produced.
pub fn generate(
    services: &Services<'_>,
    options: GenerateOptions,
    visualize: bool,
) -> Result<GenerateReport> {
    let snapshot_dir = visualize.then(|| options.destination.join(DEBUG_DIR));

    let mut pipeline = Pipeline::new();
    if let Some(dir) = &snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let ctx = pipeline.run(options, services)?;

    let classpath = ctx.classpath.as_deref().unwrap_or_default();
    let skipped = ctx
        .skipped()
        .map(|(module, reason)| SkippedModule {
            name: module.to_string(),
            reason: reason.to_string(),
        })
        .collect();

    Ok(GenerateReport {
        index: ctx.index.clone().unwrap_or_else(|| ctx.options.output.clone()),
        format: ctx.format.map(|f| f.as_str().to_string()).unwrap_or_default(),
        language: ctx.language().to_string(),
        compiled: ctx.compiled.iter().map(|m| m.name.clone()).collect(),
        skipped,
        classpath_entries: classpath.len(),
        packages: classpath.iter().filter(|e| e.package.is_some()).count(),
        warnings: ctx.warning_count(),
        snapshot_dir,
    })
}
