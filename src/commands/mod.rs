//! Shared command plumbing: config-file and basedir resolution, context
//! construction. Every workflow subcommand goes through [`create_context`]
//! before any workflow is built, so configuration problems abort first.

pub mod workflow;

use std::path::{Path, PathBuf};

use clap::Args;

use shipmate::context::default_output_directory;
use shipmate::{config, Context, Error, Logger, Result};

pub type CmdResult<T> = Result<(T, i32)>;

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// The config file
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// The base directory for resolving relative paths
    #[arg(long, value_name = "PATH")]
    pub basedir: Option<PathBuf>,

    /// Report intended actions without remote side effects
    #[arg(long)]
    pub dry_run: bool,
}

pub(crate) fn create_context(args: &ModelArgs, logger: Logger) -> Result<Context> {
    let config_file = resolve_config_file(args.config_file.as_deref())?;
    let basedir = resolve_basedir(args.basedir.as_deref(), &config_file)?;

    logger.info(format!("configuring with {}", config_file.display()));
    logger.increase_indent();
    logger.info(format!("- basedir set to {}", basedir.display()));
    logger.info(format!("- dry-run set to {}", args.dry_run));
    logger.decrease_indent();

    logger.info("reading configuration");
    let model = config::load(&config_file)?;
    let output_directory = default_output_directory(&basedir);

    Context::new(model, basedir, output_directory, args.dry_run, logger)
}

fn resolve_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::config_not_found(
            format!("Config file not found: {}", path.display()),
            vec![path.display().to_string()],
        ));
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::internal_io(e.to_string(), Some("current dir".to_string())))?;

    config::discover(&cwd).ok_or_else(|| {
        let supported = config::supported_extensions().join("|");
        Error::config_not_found(
            format!(
                "Missing required option '--config-file' or local file named {}.[{}]",
                config::CONFIG_BASENAME,
                supported
            ),
            config::supported_extensions()
                .iter()
                .map(|ext| format!("{}.{}", config::CONFIG_BASENAME, ext))
                .collect(),
        )
        .with_hint("Pass --config-file <path> or create a config file next to your project")
    })
}

fn resolve_basedir(explicit: Option<&Path>, config_file: &Path) -> Result<PathBuf> {
    let basedir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => config_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    if !basedir.is_dir() {
        return Err(Error::config_not_found(
            format!("basedir does not exist: {}", basedir.display()),
            vec![basedir.display().to_string()],
        )
        .with_hint("Pass --basedir <path>"));
    }

    Ok(basedir)
}
