//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod explain;
mod generate;
mod output;

pub use check::{CheckReport, ModuleSummary};
pub use explain::{ExplainReport, ModulePlan, PhaseInfo};
pub use generate::{GenerateReport, SkippedModule};
pub use output::{Report, TerminalOutput};
