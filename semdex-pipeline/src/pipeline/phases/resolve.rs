//! Resolve-format phase - picks the index encoding from the output name.

use eyre::Result;
use semdex_core::OutputFormat;
use tracing::debug;

use crate::{
    GenerateError,
    pipeline::{GenerateContext, Phase, Services},
};

/// Phase that resolves the output format.
///
/// Runs first so an unsupported file name fails the run before any module
/// is compiled.
pub struct ResolveFormatPhase;

impl Phase for ResolveFormatPhase {
    fn name(&self) -> &'static str {
        "resolve-format"
    }

    fn description(&self) -> &'static str {
        "Resolve the index format from the output file name"
    }

    fn run(&self, ctx: &mut GenerateContext, _services: &Services<'_>) -> Result<()> {
        let output = ctx.options.output.to_string_lossy().into_owned();
        let format = OutputFormat::from_filename(&output);
        if !format.is_known() {
            return Err(GenerateError::UnknownFormat { output }.into());
        }
        debug!(%format, "resolved output format");
        ctx.format = Some(format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::GenerateOptions, testing::Fixture};

    fn resolve(output: &str) -> Result<GenerateContext> {
        let fixture = Fixture::new();
        let mut ctx = GenerateContext::new(GenerateOptions::new(output, "/ws/out/semdex"));
        ResolveFormatPhase.run(&mut ctx, &fixture.services())?;
        Ok(ctx)
    }

    #[test]
    fn test_known_extensions() {
        let cases = [
            ("index.lsif", OutputFormat::Lsif),
            ("index.lsif-protobuf", OutputFormat::LsifProtobuf),
            ("index.scip", OutputFormat::Scip),
            ("index.scip.ndjson", OutputFormat::ScipNdjson),
        ];
        for (output, expected) in cases {
            assert_eq!(resolve(output).unwrap().format, Some(expected), "{output}");
        }
    }

    #[test]
    fn test_unknown_extensions_fail_with_options() {
        for output in ["out.xyz", "index", "index.json", ".scip"] {
            let err = resolve(output).unwrap_err();
            let message = err.to_string();
            assert!(message.contains(".lsif, .lsif-protobuf, .scip, .scip.ndjson"), "{message}");
        }
    }
}
