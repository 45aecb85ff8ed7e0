//! Pipeline snapshot plugin for debugging a generate run.
//!
//! Captures the context after each phase and optionally writes it to disk
//! as `<phase>.json`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::{Result, WrapErr};
use semdex_core::{ClasspathEntry, OutputFormat};
use serde::Serialize;

use super::{CompiledModule, Diagnostic, GenerateContext, Plugin};
use crate::plan::Plan;

/// The pipeline state right after one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    pub phase: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    pub plans: Vec<Plan>,

    pub compiled: Vec<CompiledModule>,

    /// Available after the "aggregate" phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classpath: Option<Vec<ClasspathEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<PathBuf>,

    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// Used by `generate --visualize`, which writes the snapshots to
/// `<dest>/.semdex/debug`.
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes each snapshot as soon as it is taken.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn capture(&self, phase: &str, ctx: &GenerateContext) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            format: ctx.format,
            plans: ctx.plans.clone(),
            compiled: ctx.compiled.clone(),
            classpath: ctx.classpath.clone(),
            index: ctx.index.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
        snapshot
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerateContext) -> Result<()> {
        let snapshot = self.capture(phase, ctx);
        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }
        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("failed to create '{}'", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::GenerateOptions;

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_snapshot_written_after_phase() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = SnapshotPlugin::with_output_dir(dir.path().join("debug"));
        let mut ctx = GenerateContext::new(GenerateOptions::new("index.scip", dir.path()));
        ctx.format = Some(OutputFormat::Scip);

        plugin.on_after_phase("resolve-format", &mut ctx).unwrap();

        let written = fs::read_to_string(dir.path().join("debug/resolve-format.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["phase"], "resolve-format");
        assert_eq!(json["format"], "scip");
        assert!(json.get("classpath").is_none());
        assert_eq!(plugin.snapshots().len(), 1);
    }
}
