use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use semdex_manifest::SemdexToml;
use semdex_pipeline::{CoursierFetcher, ManifestGraph};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Index file name the plan is computed for
    #[arg(default_value = "index.scip")]
    pub output: PathBuf,

    /// Path to semdex.toml (defaults to ./semdex.toml)
    #[arg(short, long, default_value = "semdex.toml")]
    pub manifest: PathBuf,

    /// Directory for SemanticDB files (defaults to <root>/out/semdex)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let file = SemdexToml::open(&self.manifest).unwrap_or_exit();
        let graph = ManifestGraph::open(&file)?;
        let fetcher = CoursierFetcher::new(&file.manifest().tools.coursier);

        let destination = ops::destination(self.dest.as_deref(), &file.root())?;

        let report = ops::explain(file.path(), &graph, &fetcher, &self.output, &destination)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
