//! Compiler toolchains.
//!
//! [`CommandToolchain`] spawns `scalac` and `javac` and turns their console
//! output into [`Diagnostic`]s.

use std::{
    env,
    ffi::OsString,
    path::PathBuf,
    process::{Command, Stdio},
};

use eyre::{Result, WrapErr, bail, eyre};
use semdex_manifest::Variant;
use tracing::debug;

use crate::{
    host::UpstreamOutput,
    pipeline::{Diagnostic, Severity},
    plan::CompileRequest,
    reporter::Reporter,
};

/// Compilers able to run a semantic compilation pass.
pub trait Toolchain {
    /// Compile a Scala (possibly mixed Scala/Java) module.
    fn compile_mixed(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()>;

    /// Compile a Java-only module.
    fn compile_java(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()>;
}

/// Runs the compilers as external processes.
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    scalac: String,
    javac: String,
}

impl CommandToolchain {
    pub fn new(scalac: impl Into<String>, javac: impl Into<String>) -> Self {
        Self {
            scalac: scalac.into(),
            javac: javac.into(),
        }
    }

    /// The compiler runs from the workspace root so that SemanticDB source
    /// paths line up with the root the indexer resolves them against.
    fn command(
        &self,
        program: &str,
        options: &[String],
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
    ) -> Result<Command> {
        let classpath = join_classpath(request, upstream)?;

        let mut cmd = Command::new(program);
        cmd.current_dir(&request.workspace_root)
            .args(options)
            .arg("-d")
            .arg(&request.destination);
        if !classpath.is_empty() {
            cmd.arg("-classpath").arg(&classpath);
        }
        cmd.args(&request.sources);
        Ok(cmd)
    }

    fn run(
        &self,
        program: &str,
        options: &[String],
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        debug!(
            module = %request.module,
            program,
            sources = request.sources.len(),
            "spawning compiler"
        );

        let output = self
            .command(program, options, request, upstream)?
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .wrap_err_with(|| format!("failed to run '{}'", program))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let diagnostics = match request.variant {
            Variant::Scala3 => parse_scala3_output(&text),
            Variant::Scala2 | Variant::Java => parse_javac_style_output(&text),
        };
        for mut diagnostic in diagnostics {
            diagnostic.origin = request.module.clone();
            reporter.report(&diagnostic);
        }

        if !output.status.success() {
            bail!("'{}' exited with {}", program, output.status);
        }
        Ok(())
    }
}

impl Toolchain for CommandToolchain {
    fn compile_mixed(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        self.run(&self.scalac, &request.options, request, upstream, reporter)
    }

    fn compile_java(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        self.run(&self.javac, &request.javac_options, request, upstream, reporter)
    }
}

/// Compile classpath followed by the upstream modules' outputs.
fn join_classpath(
    request: &CompileRequest,
    upstream: Option<&UpstreamOutput>,
) -> Result<OsString> {
    let upstream_outputs = upstream.map(UpstreamOutput::outputs).unwrap_or_default();
    let entries: Vec<&PathBuf> = request.classpath.iter().chain(upstream_outputs).collect();
    env::join_paths(entries)
        .map_err(|e| eyre!("invalid classpath for '{}': {}", request.module, e))
}

/// Parse `path:line: error: message` lines, as printed by javac and Scala 2.
pub fn parse_javac_style_output(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for line in text.lines() {
        if let Some(diagnostic) = parse_javac_style_line(line) {
            diagnostics.push(diagnostic);
        } else if !line.trim().is_empty() {
            debug!(target: "semdex::compiler", "{}", line);
        }
    }
    diagnostics
}

fn parse_javac_style_line(line: &str) -> Option<Diagnostic> {
    const MARKERS: [(&str, Severity); 2] = [
        (": error: ", Severity::Error),
        (": warning: ", Severity::Warning),
    ];
    MARKERS.iter().find_map(|(marker, severity)| {
        let (location, message) = line.split_once(*marker)?;
        let (path, line_no) = location.rsplit_once(':')?;
        let line_no = line_no.trim().parse().ok()?;
        Some(Diagnostic::new(*severity, "compiler", message.trim()).at(path, line_no, None))
    })
}

/// Parse Scala 3 reports:
///
/// ```text
/// -- [E007] Type Mismatch Error: src/A.scala:3:15 ------------
/// 3 |  val x: Int = "a"
///   |               ^^^
///   |               Found:    ("a" : String)
///   |               Required: Int
/// ```
///
/// The header gives the position; the `|` lines after it form the message.
pub fn parse_scala3_output(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut current: Option<(Diagnostic, Vec<String>)> = None;

    for line in text.lines() {
        if let Some(header) = parse_scala3_header(line) {
            if let Some(done) = current.take() {
                diagnostics.push(finish_scala3(done));
            }
            current = Some((header, Vec::new()));
            continue;
        }
        match current.as_mut() {
            Some((_, details)) => {
                if let Some(detail) = scala3_detail(line) {
                    details.push(detail.to_string());
                }
            }
            None if !line.trim().is_empty() => debug!(target: "semdex::compiler", "{}", line),
            None => {}
        }
    }
    if let Some(done) = current.take() {
        diagnostics.push(finish_scala3(done));
    }
    diagnostics
}

fn parse_scala3_header(line: &str) -> Option<Diagnostic> {
    let rest = line.strip_prefix("-- ")?;
    let (title, location) = rest.split_once(": ")?;
    let title = match title.strip_prefix('[') {
        Some(coded) => coded.split_once("] ")?.1,
        None => title,
    };
    let severity = if title.ends_with("Error") {
        Severity::Error
    } else if title.ends_with("Warning") {
        Severity::Warning
    } else {
        return None;
    };

    let location = location.trim_end_matches(['-', ' ']);
    let mut parts = location.rsplitn(3, ':');
    let column = parts.next()?.parse().ok()?;
    let line_no = parts.next()?.parse().ok()?;
    let path = parts.next()?;
    Some(Diagnostic::new(severity, "compiler", title).at(path, line_no, Some(column)))
}

/// Text of a `  |  ...` continuation line, skipping caret markers.
fn scala3_detail(line: &str) -> Option<&str> {
    let text = line.trim_start().strip_prefix('|')?.trim();
    if text.is_empty() || text.chars().all(|c| c == '^') {
        None
    } else {
        Some(text)
    }
}

fn finish_scala3((mut diagnostic, details): (Diagnostic, Vec<String>)) -> Diagnostic {
    if !details.is_empty() {
        diagnostic.message = format!("{}: {}", diagnostic.message, details.join(" "));
    }
    diagnostic
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::{pipeline::Position, testing::CollectingReporter};

    #[test]
    fn test_parse_javac_output() {
        let text = "\
src/App.java:12: error: cannot find symbol
    Foo foo = new Foo();
    ^
src/App.java:3: warning: [deprecation] Date in java.util has been deprecated
1 error
1 warning
";
        let diagnostics = parse_javac_style_output(text);
        assert_eq!(diagnostics.len(), 2);

        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].message, "cannot find symbol");
        assert_eq!(
            diagnostics[0].position,
            Some(Position {
                path: PathBuf::from("src/App.java"),
                line: 12,
                column: None,
            })
        );
        assert_eq!(diagnostics[1].severity, Severity::Warning);
    }

    #[test]
    fn test_parse_scala2_output() {
        let text = "/ws/core/A.scala:7: error: type mismatch;\n found   : String\n";
        let diagnostics = parse_javac_style_output(text);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), "/ws/core/A.scala:7: type mismatch;");
    }

    #[test]
    fn test_parse_scala3_output() {
        let text = "\
-- [E007] Type Mismatch Error: src/A.scala:3:15 ---------------------------------
3 |  val x: Int = \"a\"
  |               ^^^
  |               Found:    (\"a\" : String)
  |               Required: Int
-- Warning: src/B.scala:1:0 ----------------------------------------------------
1 |import scala.language.implicitConversions
  |^
  |unused import
2 errors found
";
        let diagnostics = parse_scala3_output(text);
        assert_eq!(diagnostics.len(), 2);

        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(
            diagnostics[0].message,
            "Type Mismatch Error: Found:    (\"a\" : String) Required: Int"
        );
        assert_eq!(
            diagnostics[0].position.as_ref().map(|p| (p.line, p.column)),
            Some((3, Some(15)))
        );

        assert_eq!(diagnostics[1].severity, Severity::Warning);
        assert_eq!(diagnostics[1].message, "Warning: unused import");
    }

    #[test]
    fn test_scala3_header_requires_position() {
        assert!(parse_scala3_header("-- Error: somewhere").is_none());
        assert!(parse_scala3_header("-- Info: a.scala:1:1").is_none());
    }

    #[test]
    fn test_join_classpath_appends_upstream() {
        let request = CompileRequest {
            module: "app".to_string(),
            variant: Variant::Java,
            sources: vec![],
            options: vec![],
            javac_options: vec![],
            classpath: vec![PathBuf::from("/deps/a.jar")],
            plugin_classpath: vec![],
            destination: PathBuf::from("/out"),
            workspace_root: PathBuf::from("/ws"),
        };
        let upstream = UpstreamOutput::new(vec![PathBuf::from("/ws/out/core/classes")]);

        let joined = join_classpath(&request, Some(&upstream)).unwrap();
        let split: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(
            split,
            vec![PathBuf::from("/deps/a.jar"), PathBuf::from("/ws/out/core/classes")]
        );
    }

    #[test]
    fn test_compiler_runs_from_workspace_root() {
        let toolchain = CommandToolchain::new("scalac", "javac");
        let request = CompileRequest {
            module: "app".to_string(),
            variant: Variant::Java,
            sources: vec![PathBuf::from("src/App.java")],
            options: vec![],
            javac_options: vec![],
            classpath: vec![],
            plugin_classpath: vec![],
            destination: PathBuf::from("/ws/out/semdex"),
            workspace_root: PathBuf::from("/ws"),
        };

        let cmd = toolchain.command("javac", &["-g".to_string()], &request, None).unwrap();
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/ws")));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["-g", "-d", "/ws/out/semdex", "src/App.java"]);
    }

    #[test]
    fn test_missing_compiler_is_an_error() {
        let toolchain = CommandToolchain::new("semdex-test-no-scalac", "semdex-test-no-javac");
        let request = CompileRequest {
            module: "app".to_string(),
            variant: Variant::Java,
            sources: vec![PathBuf::from("App.java")],
            options: vec![],
            javac_options: vec![],
            classpath: vec![],
            plugin_classpath: vec![],
            destination: PathBuf::from("/nonexistent/out"),
            workspace_root: PathBuf::from("/ws"),
        };
        let reporter = CollectingReporter::default();

        assert!(toolchain.compile_java(&request, None, &reporter).is_err());
        assert!(reporter.diagnostics().is_empty());
    }
}
