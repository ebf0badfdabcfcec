use std::io;

use anstream::println;
use kcheck_release::{Version, clean_kernel_version};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::GlobalArgs;
use crate::commands::OutputFormat;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Serialize)]
struct CleanedRelease<'a> {
    release: &'a str,
    version: Version,
}

/// Prints the comparable version of each raw release, in the order given.
pub(crate) fn clean(global_args: &GlobalArgs, releases: &[String]) -> Result<()> {
    let cleaned = releases
        .iter()
        .map(|release| CleanedRelease {
            release,
            version: clean_kernel_version(release),
        })
        .collect::<Vec<_>>();

    match global_args.format {
        OutputFormat::Text => {
            for entry in &cleaned {
                println!("{}", entry.version.cyan());
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &cleaned)?;
            println!();
        }
    }

    Ok(())
}
