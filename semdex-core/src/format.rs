//! Output format resolution from the requested index file name.

use std::fmt;

use serde::Serialize;

/// Encoding of the produced index file.
///
/// Derived from the output file name; see [`OutputFormat::from_filename`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// LSIF as newline-delimited JSON.
    Lsif,
    /// LSIF encoded with protobuf.
    LsifProtobuf,
    /// SCIP protobuf.
    Scip,
    /// SCIP as newline-delimited JSON.
    ScipNdjson,
    /// The extension did not match any supported format.
    Unknown,
}

/// Recognized extensions, longest suffix first so `.scip.ndjson` wins over `.scip`.
const EXTENSIONS: &[(&str, OutputFormat)] = &[
    (".lsif-protobuf", OutputFormat::LsifProtobuf),
    (".scip.ndjson", OutputFormat::ScipNdjson),
    (".lsif", OutputFormat::Lsif),
    (".scip", OutputFormat::Scip),
];

impl OutputFormat {
    /// Every extension that resolves to a known format, in display order.
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] =
        &[".lsif", ".lsif-protobuf", ".scip", ".scip.ndjson"];

    /// Resolve the format of an output file name by its extension.
    ///
    /// Only the file name matters; any directory components are ignored.
    pub fn from_filename(name: &str) -> Self {
        let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        EXTENSIONS
            .iter()
            .find(|(ext, _)| file_name.len() > ext.len() && file_name.ends_with(ext))
            .map(|(_, format)| *format)
            .unwrap_or(OutputFormat::Unknown)
    }

    /// Returns true unless this is [`OutputFormat::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, OutputFormat::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Lsif => "lsif",
            OutputFormat::LsifProtobuf => "lsif-protobuf",
            OutputFormat::Scip => "scip",
            OutputFormat::ScipNdjson => "scip-ndjson",
            OutputFormat::Unknown => "unknown",
        }
    }

    /// Comma separated list of supported extensions for error messages.
    pub fn supported_list() -> String {
        Self::SUPPORTED_EXTENSIONS.join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(OutputFormat::from_filename("index.lsif"), OutputFormat::Lsif);
        assert_eq!(
            OutputFormat::from_filename("dump.lsif-protobuf"),
            OutputFormat::LsifProtobuf
        );
        assert_eq!(OutputFormat::from_filename("index.scip"), OutputFormat::Scip);
        assert_eq!(
            OutputFormat::from_filename("index.scip.ndjson"),
            OutputFormat::ScipNdjson
        );
    }

    #[test]
    fn test_directories_are_ignored() {
        assert_eq!(
            OutputFormat::from_filename("out/nested.dir/index.scip"),
            OutputFormat::Scip
        );
        assert_eq!(
            OutputFormat::from_filename("out.scip/index"),
            OutputFormat::Unknown
        );
    }

    #[test]
    fn test_unknown_extensions() {
        for name in ["out.xyz", "index", "index.ndjson", "index.scip.json", ".scip", ""] {
            assert_eq!(
                OutputFormat::from_filename(name),
                OutputFormat::Unknown,
                "{name} should not resolve"
            );
        }
        assert!(!OutputFormat::Unknown.is_known());
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(
            OutputFormat::supported_list(),
            ".lsif, .lsif-protobuf, .scip, .scip.ndjson"
        );
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&OutputFormat::ScipNdjson).unwrap();
        assert_eq!(json, r#""scip-ndjson""#);
    }
}
