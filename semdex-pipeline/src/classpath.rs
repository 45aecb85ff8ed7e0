//! Flattening of the modules' dependency classpaths.

use indexmap::IndexSet;
use semdex_core::ClasspathEntry;
use tracing::debug;

use crate::{host::Module, metadata};

/// Collects every module's resolved dependencies into one ordered list.
///
/// Duplicates are kept unless [`deduplicate`](Self::deduplicate) is enabled,
/// in which case the first occurrence of each path wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClasspathAggregator {
    deduplicate: bool,
}

impl ClasspathAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deduplicate(mut self, enabled: bool) -> Self {
        self.deduplicate = enabled;
        self
    }

    pub fn aggregate(&self, modules: &[Module]) -> Vec<ClasspathEntry> {
        let paths = modules.iter().flat_map(|m| m.dependencies.iter());

        let paths: Vec<_> = if self.deduplicate {
            paths.collect::<IndexSet<_>>().into_iter().collect()
        } else {
            paths.collect()
        };

        let entries: Vec<ClasspathEntry> = paths
            .into_iter()
            .map(|path| ClasspathEntry::new(path.clone(), metadata::package_identity(path)))
            .collect();

        debug!(
            entries = entries.len(),
            packages = entries.iter().filter(|e| e.package.is_some()).count(),
            "aggregated classpath"
        );
        entries
    }
}
