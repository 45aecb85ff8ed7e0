//! Generate pipeline.
//!
//! A [`Pipeline`] runs the phases of a generate run in order:
//!
//! - `resolve-format`: output file name to [`OutputFormat`](semdex_core::OutputFormat)
//! - `compile`: plan and compile every module in host order
//! - `aggregate`: flatten the dependency classpath
//! - `index`: write `javacopts.txt` and invoke the indexer
//!
//! Phases share a [`GenerateContext`] and reach collaborators through
//! [`Services`]. [`Plugin`]s are called before and after each phase.
//!
//! # Example
//!
//! ```ignore
//! let services = Services {
//!     host: &graph,
//!     fetcher: &fetcher,
//!     toolchain: &toolchain,
//!     indexer: &indexer,
//!     reporter: &TracingReporter,
//! };
//! let ctx = Pipeline::new().run(GenerateOptions::new("index.scip", dest), &services)?;
//! println!("{}", ctx.index.unwrap().display());
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{CompiledModule, GenerateContext, GenerateOptions};
pub use diagnostic::{Diagnostic, Position, Severity};
pub use phase::{Phase, PhaseInfo, Services};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
