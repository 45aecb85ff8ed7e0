//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    /// Resolved workspace root.
    pub root: PathBuf,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub modules: Vec<ModuleSummary>,
}

/// One declared module.
#[derive(Debug)]
pub struct ModuleSummary {
    pub name: String,
    pub variant: String,
    pub sources: usize,
    pub dependencies: usize,
    pub upstream: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value_indented("Root", &self.root.display().to_string());

        let count = self.modules.len();
        out.section(&format!(
            "  {} module{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for module in &self.modules {
            let mut line = format!(
                "{} ({}): {} sources, {} dependencies",
                module.name, module.variant, module.sources, module.dependencies
            );
            if !module.upstream.is_empty() {
                line.push_str(&format!(", after {}", module.upstream.join(", ")));
            }
            out.list_item(&line);
        }
    }
}
