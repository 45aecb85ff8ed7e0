use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use semdex_manifest::SemdexToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to semdex.toml (defaults to ./semdex.toml)
    #[arg(short, long, default_value = "semdex.toml")]
    pub manifest: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let file = SemdexToml::open(&self.manifest).unwrap_or_exit();
        let report = ops::check(&file);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
