//! Diagnostic types shared by the toolchain, the indexer and the pipeline.

use std::path::PathBuf;

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An error; at compile time this fails the whole run.
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A source position attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub path: PathBuf,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)?;
        if let Some(column) = self.column {
            write!(f, ":{}", column)?;
        }
        Ok(())
    }
}

/// A diagnostic message from a compiler, the indexer or a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// What produced this diagnostic (a module name, "indexer", a phase).
    pub origin: String,
    pub message: String,
    pub position: Option<Position>,
}

impl Diagnostic {
    pub fn error(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, origin, message)
    }

    pub fn warning(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, origin, message)
    }

    pub fn info(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, origin, message)
    }

    pub fn new(severity: Severity, origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            origin: origin.into(),
            message: message.into(),
            position: None,
        }
    }

    /// Attach a source position.
    pub fn at(mut self, path: impl Into<PathBuf>, line: u32, column: Option<u32>) -> Self {
        self.position = Some(Position {
            path: path.into(),
            line,
            column,
        });
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(pos) = &self.position {
            write!(f, "{}: ", pos)?;
        }
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_position() {
        let diag = Diagnostic::warning("core", "unused import");
        assert_eq!(diag.to_string(), "unused import");
    }

    #[test]
    fn test_display_with_position() {
        let diag = Diagnostic::error("core", "not found: value x").at("src/A.scala", 12, Some(5));
        assert_eq!(diag.to_string(), "src/A.scala:12:5: not found: value x");

        let diag = Diagnostic::error("core", "cannot find symbol").at("src/B.java", 3, None);
        assert_eq!(diag.to_string(), "src/B.java:3: cannot find symbol");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
