use std::io;

use anstream::println;
use kcheck_release::{ReleaseError, running_kernel_version};
use owo_colors::OwoColorize;

use crate::GlobalArgs;
use crate::commands::OutputFormat;
use crate::config::{self, Config};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] config::Error),
    #[error(transparent)]
    ReleaseError(#[from] ReleaseError),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

pub(crate) fn running(global_args: &GlobalArgs) -> Result<()> {
    let config = Config::new(global_args)?;
    let version = running_kernel_version(|| {
        kcheck_release::read_proc_version(&config.settings.proc_version)
    })?;

    match config.format {
        OutputFormat::Text => println!("{}", version.cyan()),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &version)?;
            println!();
        }
    }

    Ok(())
}
