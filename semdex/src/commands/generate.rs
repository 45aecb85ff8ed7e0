use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use semdex_manifest::SemdexToml;
use semdex_pipeline::{GenerateOptions, ManifestGraph, TracingReporter};

use super::UnwrapOrExit;
use crate::{
    ops::{self, Tools},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Index file to produce; the extension picks the format
    /// (.lsif, .lsif-protobuf, .scip, .scip.ndjson)
    #[arg(default_value = "index.scip")]
    pub output: PathBuf,

    /// Path to semdex.toml (defaults to ./semdex.toml)
    #[arg(short, long, default_value = "semdex.toml")]
    pub manifest: PathBuf,

    /// Directory for SemanticDB files and the index (defaults to <root>/out/semdex)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Drop repeated dependency paths from the aggregated classpath
    #[arg(long)]
    pub dedup_classpath: bool,

    /// Write per-phase JSON snapshots to <dest>/.semdex/debug
    #[arg(long)]
    pub visualize: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let file = SemdexToml::open(&self.manifest).unwrap_or_exit();
        let graph = ManifestGraph::open(&file)?;
        let tools = Tools::from_config(&file.manifest().tools);

        let destination = ops::destination(self.dest.as_deref(), &file.root())?;
        let options = GenerateOptions::new(&self.output, destination)
            .dedup_classpath(self.dedup_classpath);

        let report = ops::generate(
            &tools.services(&graph, &TracingReporter),
            options,
            self.visualize,
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
