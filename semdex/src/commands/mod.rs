mod check;
mod completions;
mod explain;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use generate::GenerateCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for semdex_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "semdex")]
#[command(version)]
#[command(about = "Build SCIP and LSIF indexes for Scala and Java workspaces")]
pub(crate) struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every module with SemanticDB and build the index
    Generate(GenerateCommand),

    /// Validate semdex.toml without compiling
    Check(CheckCommand),

    /// Show the pipeline phases and each module's compile plan
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["semdex", "generate"]).unwrap();
        match cli.command {
            Commands::Generate(cmd) => {
                assert_eq!(cmd.output.to_str(), Some("index.scip"));
                assert_eq!(cmd.manifest.to_str(), Some("semdex.toml"));
                assert!(cmd.dest.is_none());
                assert!(!cmd.dedup_classpath);
                assert!(!cmd.visualize);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_global_verbosity_flags() {
        let cli = Cli::try_parse_from(["semdex", "check", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(Cli::try_parse_from(["semdex", "-v", "-q", "check"]).is_err());
    }
}
