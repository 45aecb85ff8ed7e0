//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use super::{Manifest, ModuleConfig, Variant};
use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Errors created through this context are labelled in the original
/// semdex.toml source when the offending name can be located.
#[derive(Debug, Clone)]
pub struct ParseContext {
    source: Arc<SourceContext>,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
        }
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Find the span of a module table header such as `[modules.core]`.
    pub fn module_span(&self, name: &str) -> Option<SourceSpan> {
        find_module_span(self.source.src(), name)
    }

    /// Validate every module in declaration order.
    pub fn validate(&self, manifest: &Manifest) -> Result<()> {
        for (index, (name, module)) in manifest.modules.iter().enumerate() {
            self.validate_name(name)?;
            self.validate_module(name, module)?;

            let declared_before: Vec<&String> = manifest.modules.keys().take(index).collect();
            for upstream in &module.upstream {
                if !declared_before.iter().any(|n| *n == upstream) {
                    return Err(self.source.unknown_upstream_error(
                        name,
                        upstream,
                        self.find_quoted(upstream).or_else(|| self.module_span(name)),
                    ));
                }
            }
        }
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        if let Some(reason) = validate_module_name(name) {
            return Err(self
                .source
                .invalid_name_error(name, reason, self.module_span(name)));
        }
        Ok(())
    }

    fn validate_module(&self, name: &str, module: &ModuleConfig) -> Result<()> {
        if module.variant == Variant::Scala2 && module.scala_version.is_none() {
            return Err(self
                .source
                .missing_scala_version_error(name, self.module_span(name)));
        }

        if module.upstream.iter().any(|u| u == name) {
            return Err(self.source.validation_error(
                format!("module '{}' lists itself as upstream", name),
                self.module_span(name),
            ));
        }

        Ok(())
    }

    fn find_quoted(&self, value: &str) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", value);
        self.source
            .src()
            .find(&needle)
            .map(|pos| SourceSpan::from((pos + 1, value.len())))
    }
}

/// Returns the reason a module name is invalid, if any.
pub(crate) fn validate_module_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some("module name cannot be empty");
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Some("module name must start with a letter or underscore");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        return Some("module name contains invalid characters");
    }

    None
}

/// Find the span of a module name in the TOML source.
///
/// Looks for `[modules.name]`, `[modules."name"]` and inline `name = {` forms.
pub(crate) fn find_module_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        (format!("[modules.{}]", name), "[modules.".len()),
        (format!("[modules.\"{}\"]", name), "[modules.\"".len()),
        (format!("\n{} = {{", name), 1),
    ];

    patterns.iter().find_map(|(pattern, offset)| {
        src.find(pattern.as_str())
            .map(|pos| SourceSpan::from((pos + offset, name.len())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_module_name() {
        assert_eq!(validate_module_name("core"), None);
        assert_eq!(validate_module_name("app-server"), None);
        assert_eq!(validate_module_name("_internal.v2"), None);
        assert!(validate_module_name("").is_some());
        assert!(validate_module_name("1core").is_some());
        assert!(validate_module_name("core/test").is_some());
        assert!(validate_module_name("has space").is_some());
    }

    #[test]
    fn test_find_module_span() {
        let src = "[workspace]\n\n[modules.core]\nvariant = \"java\"\n";
        let span = find_module_span(src, "core").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "core");
    }

    #[test]
    fn test_find_module_span_missing() {
        assert!(find_module_span("[workspace]\n", "core").is_none());
    }
}
