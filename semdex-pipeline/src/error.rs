use thiserror::Error;

use semdex_core::OutputFormat;

/// Fatal failures of a generate run.
///
/// These travel inside `eyre::Report`; callers that need to branch on the
/// cause can `downcast_ref::<GenerateError>()`.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(
        "unknown output format for '{output}', expected a file name ending in one of: {}",
        OutputFormat::supported_list()
    )]
    UnknownFormat { output: String },

    #[error("failed to resolve semantic plugin '{coordinate}': {message}")]
    PluginResolution { coordinate: String, message: String },

    #[error("compilation of module '{module}' failed with {errors} error(s)")]
    Compilation { module: String, errors: usize },

    #[error("compilation of module '{module}' failed: {message}")]
    Toolchain { module: String, message: String },

    #[error("{0}")]
    Indexer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_lists_extensions() {
        let err = GenerateError::UnknownFormat {
            output: "out.xyz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown output format for 'out.xyz', expected a file name ending in one of: \
             .lsif, .lsif-protobuf, .scip, .scip.ndjson"
        );
    }
}
