//! Runs compile requests through a toolchain.

use std::fs;

use eyre::{Result, WrapErr};
use semdex_manifest::Variant;
use tracing::{debug, info};

use crate::{
    GenerateError,
    host::UpstreamOutput,
    plan::CompileRequest,
    reporter::{ErrorCounter, Reporter},
    toolchain::Toolchain,
};

/// Result of compiling one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Compiled,
    /// The module had no sources.
    NothingToCompile,
}

pub struct Driver<'a> {
    toolchain: &'a dyn Toolchain,
    reporter: &'a dyn Reporter,
}

impl<'a> Driver<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, reporter: &'a dyn Reporter) -> Self {
        Self { toolchain, reporter }
    }

    /// Compile one module, passing its upstream output through untouched.
    ///
    /// # Errors
    ///
    /// Any error diagnostic or toolchain failure fails the module, and
    /// with it the run.
    pub fn compile(
        &self,
        request: &CompileRequest,
        upstream: Option<&UpstreamOutput>,
    ) -> Result<Outcome> {
        if request.sources.is_empty() {
            debug!(module = %request.module, "no sources, nothing to compile");
            return Ok(Outcome::NothingToCompile);
        }

        fs::create_dir_all(&request.destination).wrap_err_with(|| {
            format!(
                "failed to create destination directory '{}'",
                request.destination.display()
            )
        })?;

        info!(module = %request.module, variant = %request.variant, "compiling");

        let counter = ErrorCounter::new(self.reporter);
        let result = match request.variant {
            Variant::Scala3 | Variant::Scala2 => {
                self.toolchain.compile_mixed(request, upstream, &counter)
            }
            Variant::Java => self.toolchain.compile_java(request, upstream, &counter),
        };

        let errors = counter.errors();
        if errors > 0 {
            return Err(GenerateError::Compilation {
                module: request.module.clone(),
                errors,
            }
            .into());
        }
        if let Err(err) = result {
            return Err(GenerateError::Toolchain {
                module: request.module.clone(),
                message: format!("{:#}", err),
            }
            .into());
        }
        Ok(Outcome::Compiled)
    }
}
