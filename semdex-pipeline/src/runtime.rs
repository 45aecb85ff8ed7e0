//! Java runtime version detection.

use std::process::Command;

use eyre::{Result, WrapErr, eyre};

/// Run `<java> -version` and return the runtime's major version.
pub fn detect_java_version(java: &str) -> Result<u32> {
    let output = Command::new(java)
        .arg("-version")
        .output()
        .wrap_err_with(|| {
            format!(
                "failed to run '{} -version'; set workspace.java_version in semdex.toml",
                java
            )
        })?;

    let mut version_output = String::from_utf8_lossy(&output.stderr).to_string();
    if version_output.trim().is_empty() {
        version_output = String::from_utf8_lossy(&output.stdout).to_string();
    }

    parse_major_version(&version_output)
        .ok_or_else(|| eyre!("could not read a Java version from '{} -version'", java))
}

/// Extract the major version from `java -version` output.
pub(crate) fn parse_major_version(output: &str) -> Option<u32> {
    extract_version_token(output).and_then(interpret_version_token)
}

fn extract_version_token(output: &str) -> Option<&str> {
    output.lines().find_map(|line| {
        let start = line.find('"')?;
        let rest = &line[start + 1..];
        let end = rest.find('"')?;
        Some(&rest[..end])
    })
}

/// `1.8.0_362` is Java 8; from Java 9 on the first component is the major.
fn interpret_version_token(token: &str) -> Option<u32> {
    let component = match token.strip_prefix("1.") {
        Some(legacy) => legacy,
        None => token,
    };
    let digits: String = component.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_format() {
        let output = "java version \"1.8.0_362\"\nJava(TM) SE Runtime Environment";
        assert_eq!(parse_major_version(output), Some(8));
    }

    #[test]
    fn test_modern_format() {
        let output = "openjdk version \"17.0.9\" 2023-10-17\nOpenJDK Runtime Environment";
        assert_eq!(parse_major_version(output), Some(17));
        assert_eq!(interpret_version_token("21.0.2"), Some(21));
        assert_eq!(interpret_version_token("25-ea"), Some(25));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(parse_major_version("command not found"), None);
        assert_eq!(interpret_version_token("ea"), None);
    }
}
