//! Built-in pipeline phases.
//!
//! - [`ResolveFormatPhase`] - resolves the output format from the file name
//! - [`CompilePhase`] - plans and compiles every module in host order
//! - [`AggregatePhase`] - aggregates the dependency classpath
//! - [`IndexPhase`] - writes javacopts.txt and runs the indexer

mod aggregate;
mod compile;
mod index;
mod resolve;

pub use aggregate::AggregatePhase;
pub use compile::CompilePhase;
pub use index::IndexPhase;
pub use resolve::ResolveFormatPhase;
