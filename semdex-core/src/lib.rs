//! Core types for semdex.
//!
//! This crate holds the plain data types shared by the manifest parser,
//! the pipeline and the binary: versions, output formats, tool and package
//! identities, and a small file writer.

mod file;
mod format;
mod package;
mod tool;
mod version;

pub use file::File;
pub use format::OutputFormat;
pub use package::{ClasspathEntry, PackageIdentity};
pub use tool::{SEMANTICDB_JAVAC_VERSION, SEMANTICDB_SCALAC_VERSION, TOOL_NAME, ToolIdentity};
pub use version::Version;
