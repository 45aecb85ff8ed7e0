//! State passed through the generate phases.

use std::path::PathBuf;

use semdex_core::{ClasspathEntry, OutputFormat};
use semdex_manifest::Variant;
use serde::Serialize;

use super::diagnostic::Diagnostic;
use crate::{index::SourceLanguage, plan::Plan};

/// Caller-provided settings of one generate run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Requested index file name, resolved against the destination.
    pub output: PathBuf,
    /// Shared SemanticDB targetroot.
    pub destination: PathBuf,
    pub dedup_classpath: bool,
}

impl GenerateOptions {
    pub fn new(output: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            destination: destination.into(),
            dedup_classpath: false,
        }
    }

    pub fn dedup_classpath(mut self, enabled: bool) -> Self {
        self.dedup_classpath = enabled;
        self
    }
}

/// A module that went through the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledModule {
    pub name: String,
    pub variant: Variant,
}

/// Context passed through all pipeline phases.
///
/// Each phase fills in its part; later phases fail if an earlier one did
/// not run.
#[derive(Debug)]
pub struct GenerateContext {
    pub options: GenerateOptions,
    /// Populated by the resolve-format phase.
    pub format: Option<OutputFormat>,
    /// One plan per host module, in host order.
    pub plans: Vec<Plan>,
    pub compiled: Vec<CompiledModule>,
    /// Populated by the aggregate phase.
    pub classpath: Option<Vec<ClasspathEntry>>,
    /// Path of the produced index, set by the index phase.
    pub index: Option<PathBuf>,
    /// Pipeline-level notes (skipped modules and the like).
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateContext {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            format: None,
            plans: Vec::new(),
            compiled: Vec::new(),
            classpath: None,
            index: None,
            diagnostics: Vec::new(),
        }
    }

    /// Language tag for the index, from the modules actually compiled.
    pub fn language(&self) -> SourceLanguage {
        SourceLanguage::from_variants(self.compiled.iter().map(|m| m.variant))
    }

    /// Plans that were skipped, with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.plans.iter().filter_map(|plan| match plan {
            Plan::Skip { module, reason } => Some((module.as_str(), reason.as_str())),
            Plan::Compile(_) => None,
        })
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> GenerateContext {
        GenerateContext::new(GenerateOptions::new("index.scip", "/ws/out/semdex"))
    }

    #[test]
    fn test_context_creation() {
        let ctx = make_context();

        assert!(ctx.format.is_none());
        assert!(ctx.plans.is_empty());
        assert!(ctx.classpath.is_none());
        assert!(ctx.index.is_none());
        assert!(!ctx.options.dedup_classpath);
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = make_context();

        ctx.add_warning("compile", "skipped 'app'");
        ctx.add_info("aggregate", "3 entries");

        assert_eq!(ctx.diagnostics.len(), 2);
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_language_follows_compiled_modules() {
        let mut ctx = make_context();
        assert_eq!(ctx.language(), SourceLanguage::Java);

        ctx.compiled.push(CompiledModule {
            name: "app".to_string(),
            variant: Variant::Java,
        });
        assert_eq!(ctx.language(), SourceLanguage::Java);

        ctx.compiled.push(CompiledModule {
            name: "core".to_string(),
            variant: Variant::Scala3,
        });
        assert_eq!(ctx.language(), SourceLanguage::Scala);
    }

    #[test]
    fn test_skipped_lists_reasons() {
        let mut ctx = make_context();
        ctx.plans.push(Plan::Skip {
            module: "app".to_string(),
            reason: "host too old".to_string(),
        });

        assert_eq!(ctx.skipped().collect::<Vec<_>>(), vec![("app", "host too old")]);
    }
}
