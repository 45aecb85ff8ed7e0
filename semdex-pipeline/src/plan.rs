//! Per-module compile plans.
//!
//! A [`PlanBuilder`] turns one [`Module`] into a [`Plan`]: either the
//! [`CompileRequest`] to hand to the driver, or a reasoned skip. Each
//! variant has its own plan function; the flags they inject make the
//! compiler emit SemanticDB and stop before code generation.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use semdex_core::Version;
use semdex_manifest::Variant;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{fetch::PluginFetcher, host::HostGraph, host::Module};

/// Scala 3 flag that enables the built-in SemanticDB extraction.
pub const SCALA3_SEMANTICDB: &str = "-Xsemanticdb";

/// Scala 3 flag that stops right after SemanticDB extraction.
pub const SCALA3_STOP_AFTER: &str = "-Ystop-after:extractSemanticDB";

/// Scala 2 flag that stops once the SemanticDB typer has run.
pub const SCALA2_STOP_AFTER: &str = "-Ystop-after:semanticdb-typer";

/// Scalac options that turn warnings into errors.
const FATAL_WARNING_FLAGS: &[&str] = &["-Xfatal-warnings", "-Werror"];

/// Oldest host tool version whose Java compilation honours plugin options.
pub const MIN_JAVA_HOST_VERSION: Version = Version::new(0, 10, 6);

/// First Java release that hides the javac internals from plugins by default.
pub const JAVA_STRONG_ENCAPSULATION: u32 = 17;

const JAVAC_INTERNAL_PACKAGES: &[&str] = &["api", "code", "model", "tree", "util"];

/// Everything the toolchain needs to compile one module semantically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileRequest {
    pub module: String,
    pub variant: Variant,
    pub sources: Vec<PathBuf>,
    /// Final scalac options.
    pub options: Vec<String>,
    /// Final javac options.
    pub javac_options: Vec<String>,
    pub classpath: Vec<PathBuf>,
    /// Compiler plugin jars.
    pub plugin_classpath: Vec<PathBuf>,
    /// Shared destination for SemanticDB output.
    pub destination: PathBuf,
    /// Working directory of the compiler; SemanticDB paths are relative to it.
    pub workspace_root: PathBuf,
}

/// What to do with one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Plan {
    Compile(CompileRequest),
    Skip { module: String, reason: String },
}

impl Plan {
    pub fn module(&self) -> &str {
        match self {
            Plan::Compile(request) => &request.module,
            Plan::Skip { module, .. } => module,
        }
    }
}

/// Computes compile plans against a host graph and a plugin fetcher.
pub struct PlanBuilder<'a> {
    host: &'a dyn HostGraph,
    fetcher: &'a dyn PluginFetcher,
    destination: &'a Path,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(
        host: &'a dyn HostGraph,
        fetcher: &'a dyn PluginFetcher,
        destination: &'a Path,
    ) -> Self {
        Self {
            host,
            fetcher,
            destination,
        }
    }

    /// Build the plan for one module.
    ///
    /// # Errors
    ///
    /// Fails when a required plugin cannot be fetched. An unsupported host
    /// for Java modules is not an error; it yields [`Plan::Skip`].
    pub fn build(&self, module: &Module) -> Result<Plan> {
        let plan = match module.variant {
            Variant::Scala3 => Plan::Compile(self.scala3_plan(module)),
            Variant::Scala2 => Plan::Compile(self.scala2_plan(module)?),
            Variant::Java => self.java_plan(module)?,
        };
        debug!(module = %module.name, variant = %module.variant, "planned module");
        Ok(plan)
    }

    fn base_request(&self, module: &Module) -> CompileRequest {
        CompileRequest {
            module: module.name.clone(),
            variant: module.variant,
            sources: module.sources.clone(),
            options: module.options.clone(),
            javac_options: module.javac_options.clone(),
            classpath: module.classpath.clone(),
            plugin_classpath: Vec::new(),
            destination: self.destination.to_path_buf(),
            workspace_root: self.host.workspace_root().to_path_buf(),
        }
    }

    fn scala3_plan(&self, module: &Module) -> CompileRequest {
        let mut request = self.base_request(module);
        request
            .options
            .retain(|opt| opt != SCALA3_SEMANTICDB && !opt.starts_with("-Ystop-after:"));
        request.options.push(SCALA3_SEMANTICDB.to_string());
        request.options.push(SCALA3_STOP_AFTER.to_string());
        request
    }

    fn scala2_plan(&self, module: &Module) -> Result<CompileRequest> {
        let scala_version = module
            .scala_version
            .as_ref()
            .ok_or_else(|| eyre!("module '{}' has no scala_version", module.name))?;
        let jars = self.fetcher.scalac_plugin(scala_version)?;
        let plugin = semanticdb_jar(&jars, "semanticdb-scalac")
            .ok_or_else(|| eyre!("no semanticdb-scalac jar fetched for Scala {}", scala_version))?;

        let mut request = self.base_request(module);
        request.options.retain(|opt| {
            !FATAL_WARNING_FLAGS.contains(&opt.as_str()) && !opt.starts_with("-Ystop-after:")
        });
        request.options.extend([
            format!("-Xplugin:{}", plugin.display()),
            "-Yrangepos".to_string(),
            format!(
                "-P:semanticdb:sourceroot:{}",
                self.host.workspace_root().display()
            ),
            SCALA2_STOP_AFTER.to_string(),
        ]);
        request.plugin_classpath.extend(jars);
        Ok(request)
    }

    fn java_plan(&self, module: &Module) -> Result<Plan> {
        if let Some(host_version) = self.host.host_version() {
            if *host_version < MIN_JAVA_HOST_VERSION {
                let reason = format!(
                    "Java modules require host version {} or newer, found {}",
                    MIN_JAVA_HOST_VERSION, host_version
                );
                error!(module = %module.name, "skipping module: {}", reason);
                return Ok(Plan::Skip {
                    module: module.name.clone(),
                    reason,
                });
            }
        }

        let jars = self.fetcher.javac_plugin()?;

        let mut request = self.base_request(module);
        request.classpath.extend(jars.iter().cloned());
        request.javac_options.push(format!(
            "-Xplugin:semanticdb -sourceroot:{} -targetroot:{} -build-tool:{}",
            self.host.workspace_root().display(),
            self.destination.display(),
            self.host.build_tool()
        ));
        match self.host.runtime_version() {
            Some(version) => request.javac_options.extend(extra_flags(version)),
            None => warn!(
                module = %module.name,
                "unknown Java runtime version; not adding javac export flags"
            ),
        }
        request.plugin_classpath.extend(jars);
        Ok(Plan::Compile(request))
    }
}

/// javac launcher flags the SemanticDB plugin needs on `version`.
///
/// From Java 17 the compiler internals the plugin reads are no longer
/// exported; older runtimes reject or do not need these flags.
pub fn extra_flags(version: u32) -> Vec<String> {
    if version < JAVA_STRONG_ENCAPSULATION {
        return Vec::new();
    }
    JAVAC_INTERNAL_PACKAGES
        .iter()
        .map(|pkg| {
            format!(
                "-J--add-exports=jdk.compiler/com.sun.tools.javac.{}=ALL-UNNAMED",
                pkg
            )
        })
        .collect()
}

/// Pick the plugin jar among fetched artifacts, preferring one named after it.
fn semanticdb_jar<'p>(jars: &'p [PathBuf], name: &str) -> Option<&'p PathBuf> {
    jars.iter()
        .find(|jar| {
            jar.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(name))
        })
        .or_else(|| jars.first())
}
