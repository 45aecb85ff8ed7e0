//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Path of the produced index.
    pub index: PathBuf,
    pub format: String,
    pub language: String,
    /// Modules that went through the compiler, in order.
    pub compiled: Vec<String>,
    pub skipped: Vec<SkippedModule>,
    /// Aggregated over every module, skipped ones included.
    pub classpath_entries: usize,
    /// Classpath entries attributed to a package.
    pub packages: usize,
    pub warnings: usize,
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SkippedModule {
    pub name: String,
    pub reason: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for skipped in &self.skipped {
            out.warning(&format!("skipped module '{}': {}", skipped.name, skipped.reason));
        }

        out.section(&format!("Compiled ({})", self.compiled.len()));
        for module in &self.compiled {
            out.list_item(module);
        }
        out.key_value_indented("Language", &self.language);
        out.key_value_indented("Format", &self.format);
        let mut classpath = format!(
            "{} entries, {} packages",
            self.classpath_entries, self.packages
        );
        if !self.skipped.is_empty() {
            classpath.push_str(", including skipped modules");
        }
        out.key_value_indented("Classpath", &classpath);
        if self.warnings > 0 {
            out.key_value_indented("Warnings", &self.warnings.to_string());
        }
        if let Some(dir) = &self.snapshot_dir {
            out.key_value_indented("Snapshots", &dir.display().to_string());
        }
        out.newline();

        out.preformatted(&self.index.display().to_string());
    }
}
