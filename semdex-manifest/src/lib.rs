// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `semdex.toml`.
//!
//! The manifest describes the host build graph: the workspace root, the
//! host tool versions, and an ordered table of modules with their sources,
//! classpaths, compiler options and upstream dependencies.

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    DEFAULT_BUILD_TOOL, Manifest, ModuleConfig, ParseContext, SemdexToml, ToolsConfig, Variant,
    WorkspaceConfig,
};
