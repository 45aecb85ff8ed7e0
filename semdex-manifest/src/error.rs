use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename carried into error reports.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, labelled at `span` when known.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn invalid_name_error(
        &self,
        name: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidModuleName {
            src: self.named_source(),
            span,
            name: name.into(),
            reason: reason.into(),
        })
    }

    pub fn missing_scala_version_error(
        &self,
        module: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MissingScalaVersion {
            src: self.named_source(),
            span,
            module: module.into(),
        })
    }

    pub fn unknown_upstream_error(
        &self,
        module: impl Into<String>,
        upstream: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownUpstream {
            src: self.named_source(),
            span,
            module: module.into(),
            upstream: upstream.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a semdex.toml describing the modules to index"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse semdex.toml")]
    #[diagnostic(code(semdex::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(semdex::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid module name '{name}'")]
    #[diagnostic(
        code(semdex::invalid_module_name),
        help(
            "{reason}. Use letters, digits, '_', '-' and '.', starting with a letter or underscore."
        )
    )]
    InvalidModuleName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid module name")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },

    #[error("module '{module}' uses the scala2 variant but has no scala_version")]
    #[diagnostic(
        code(semdex::missing_scala_version),
        help("add e.g. scala_version = \"2.13.12\"; the semanticdb-scalac plugin is published per Scala version")
    )]
    MissingScalaVersion {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        module: String,
    },

    #[error("module '{module}' depends on '{upstream}', which is not declared before it")]
    #[diagnostic(
        code(semdex::unknown_upstream),
        help("modules are compiled in declaration order; declare '{upstream}' above '{module}'")
    )]
    UnknownUpstream {
        #[source_code]
        src: NamedSource<String>,
        #[label("upstream referenced here")]
        span: Option<SourceSpan>,
        module: String,
        upstream: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        SourceContext::new(src, filename).parse_error(source)
    }
}
