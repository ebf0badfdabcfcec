use std::io;

use anstream::println;
use kcheck_release::{Version, clean_kernel_version, installed_releases};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::warn;

use crate::GlobalArgs;
use crate::commands::OutputFormat;
use crate::config::{self, Config};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] config::Error),
    #[error(transparent)]
    ReleaseError(#[from] kcheck_release::ReleaseError),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
struct KernelEntry {
    release: String,
    version: Version,
    running: bool,
}

/// Lists the installed kernels, oldest first, marking the running one.
pub(crate) fn installed(global_args: &GlobalArgs) -> Result<()> {
    let config = Config::new(global_args)?;
    let banner = config.banner()?;
    let source = config.settings.source.resolve(&banner);
    let running = clean_kernel_version(source.running_release(&banner));
    let releases = installed_releases(source, &config.settings.boot_dir, &banner)?;
    let entries = kernel_entries(releases, &running);

    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &entries)?;
            println!();
        }
        OutputFormat::Text if entries.is_empty() => {
            warn!("No installed kernels found (source: {source})");
        }
        OutputFormat::Text => {
            for entry in &entries {
                if entry.running {
                    println!("{} {}", "*".green(), entry.version.green());
                } else {
                    println!("  {}", entry.version);
                }
            }
        }
    }

    Ok(())
}

fn kernel_entries(releases: Vec<String>, running: &Version) -> Vec<KernelEntry> {
    let mut entries = releases
        .into_iter()
        .map(|release| {
            let version = clean_kernel_version(&release);
            KernelEntry {
                running: version == *running,
                release,
                version,
            }
        })
        .collect::<Vec<_>>();

    entries.sort_by(|a, b| a.version.cmp(&b.version));
    entries
}
