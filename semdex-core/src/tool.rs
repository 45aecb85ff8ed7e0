use serde::Serialize;

/// Name embedded in produced indexes.
///
/// Downstream consumers match on this name to enable cross-repository
/// navigation for JVM packages, so it must stay `scip-java`.
pub const TOOL_NAME: &str = "scip-java";

/// `org.scalameta:semanticdb-scalac_<scala version>` release to fetch.
pub const SEMANTICDB_SCALAC_VERSION: &str = "4.8.15";

/// `com.sourcegraph:semanticdb-javac` release to fetch.
pub const SEMANTICDB_JAVAC_VERSION: &str = "0.9.9";

/// Identity of the tool that produced an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolIdentity {
    pub name: String,
    pub version: String,
}

impl ToolIdentity {
    /// The identity of this build of semdex.
    pub fn current() -> Self {
        Self {
            name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
