//! Language variants a module can be compiled with.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How semantic information is extracted from a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Scala 3, which emits SemanticDB natively in a single pass.
    Scala3,
    /// Scala 2, which needs the semanticdb-scalac compiler plugin.
    Scala2,
    /// Java, which needs the semanticdb-javac plugin.
    Java,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Scala3 => "scala3",
            Variant::Scala2 => "scala2",
            Variant::Java => "java",
        }
    }

    pub fn is_scala(&self) -> bool {
        matches!(self, Variant::Scala3 | Variant::Scala2)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scala3" => Ok(Variant::Scala3),
            "scala2" => Ok(Variant::Scala2),
            "java" => Ok(Variant::Java),
            _ => Err(format!(
                "unknown variant '{}', expected 'scala3', 'scala2' or 'java'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Variant::from_str("scala3").unwrap(), Variant::Scala3);
        assert_eq!(Variant::from_str("Scala2").unwrap(), Variant::Scala2);
        assert_eq!(Variant::from_str("JAVA").unwrap(), Variant::Java);
        assert!(Variant::from_str("kotlin").is_err());
    }

    #[test]
    fn test_is_scala() {
        assert!(Variant::Scala3.is_scala());
        assert!(Variant::Scala2.is_scala());
        assert!(!Variant::Java.is_scala());
    }

    #[test]
    fn test_deserialize() {
        let java: Variant = serde_json::from_str(r#""java""#).unwrap();
        assert_eq!(java, Variant::Java);
        assert!(serde_json::from_str::<Variant>(r#""groovy""#).is_err());
    }
}
