//! Execution context shared by all workflow steps in one run.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::model::Model;

/// Default output root for a run: `<basedir>/out/shipmate/`.
pub fn default_output_directory(basedir: &Path) -> PathBuf {
    basedir.join("out").join("shipmate")
}

/// Read-only bundle of validated configuration and run parameters.
///
/// Built once per CLI invocation; steps borrow it for the duration of the
/// run and must not mutate shared state through it. Construction performs
/// no I/O; steps create their own output subdirectories on demand.
#[derive(Debug)]
pub struct Context {
    model: Model,
    basedir: PathBuf,
    output_directory: PathBuf,
    dry_run: bool,
    logger: Logger,
}

impl Context {
    /// Fails with a `config.validation` error when the model does not pass
    /// semantic validation; no workflow may be built from an invalid model.
    pub fn new(
        model: Model,
        basedir: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
        dry_run: bool,
        logger: Logger,
    ) -> Result<Self> {
        let errors = model.validate();
        if !errors.is_empty() {
            return Err(Error::config_validation(errors));
        }

        Ok(Self {
            model,
            basedir: basedir.into(),
            output_directory: output_directory.into(),
            dry_run,
            logger,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Resolve a configured path against the basedir; absolute paths pass
    /// through unchanged.
    pub fn resolve_path(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.basedir.join(path)
        }
    }

    pub fn checksums_dir(&self) -> PathBuf {
        self.output_directory.join("checksums")
    }

    pub fn signatures_dir(&self) -> PathBuf {
        self.output_directory.join("signatures")
    }

    pub fn prepare_dir(&self) -> PathBuf {
        self.output_directory.join("prepare")
    }

    pub fn package_dir(&self) -> PathBuf {
        self.output_directory.join("package")
    }
}
