//! Explain command report data structures.

use std::path::PathBuf;

use semdex_core::OutputFormat;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    pub config_path: PathBuf,
    pub workspace_root: PathBuf,
    pub build_tool: String,
    pub host_version: Option<String>,
    pub runtime_version: Option<u32>,
    pub output: PathBuf,
    /// `None` when the output name has no supported extension.
    pub format: Option<String>,
    pub destination: PathBuf,
    pub phases: Vec<PhaseInfo>,
    pub modules: Vec<ModulePlan>,
}

/// Information about a pipeline phase.
#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// The computed plan of one module.
#[derive(Debug)]
pub enum ModulePlan {
    Compile {
        name: String,
        variant: String,
        sources: usize,
        options: Vec<String>,
        javac_options: Vec<String>,
        classpath: usize,
        plugins: Vec<PathBuf>,
        /// Number of upstream outputs passed to the compiler.
        upstream: usize,
    },
    Skip {
        name: String,
        reason: String,
    },
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("semdex Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        out.key_value_indented("Root", &self.workspace_root.display().to_string());
        out.key_value_indented("Build tool", &self.build_tool);
        out.key_value_indented(
            "Host version",
            self.host_version.as_deref().unwrap_or("(not declared)"),
        );
        out.key_value_indented(
            "Java runtime",
            &self
                .runtime_version
                .map_or_else(|| "(unknown)".to_string(), |v| v.to_string()),
        );
        out.newline();

        out.key_value("Output", &self.output.display().to_string());
        match &self.format {
            Some(format) => out.key_value_indented("Format", format),
            None => out.warning(&format!(
                "'{}' has no supported extension (expected one of: {})",
                self.output.display(),
                OutputFormat::supported_list()
            )),
        }
        out.key_value_indented("Destination", &self.destination.display().to_string());
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Module Plans");
        for (i, plan) in self.modules.iter().enumerate() {
            match plan {
                ModulePlan::Compile {
                    name,
                    variant,
                    sources,
                    options,
                    javac_options,
                    classpath,
                    plugins,
                    upstream,
                } => {
                    out.numbered_item(i + 1, &format!("{} ({})", name, variant));
                    out.key_value_indented("  sources", &sources.to_string());
                    out.key_value_indented(
                        "  classpath",
                        &format!("{} entries, {} upstream outputs", classpath, upstream),
                    );
                    if !options.is_empty() {
                        out.key_value_indented("  scalac", &options.join(" "));
                    }
                    if !javac_options.is_empty() {
                        out.key_value_indented("  javac", &javac_options.join(" "));
                    }
                    for plugin in plugins {
                        out.key_value_indented("  plugin", &plugin.display().to_string());
                    }
                }
                ModulePlan::Skip { name, reason } => {
                    out.numbered_item(i + 1, &format!("{} (skipped: {})", name, reason));
                }
            }
        }
    }
}
