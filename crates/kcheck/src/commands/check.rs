use std::io;
use std::process::ExitCode;

use anstream::println;
use kcheck_release::{InstalledSource, RebootStatus, ReleaseError, Version, reboot_status};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::info;

use crate::GlobalArgs;
use crate::commands::OutputFormat;
use crate::config::{self, Config};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("No installed kernels found (source: {kind})")]
    #[diagnostic(help("pass --source or --boot-dir to point at the installed kernels"))]
    NoInstalledKernels { kind: InstalledSource },
    #[error(transparent)]
    ConfigError(#[from] config::Error),
    #[error(transparent)]
    ReleaseError(#[from] ReleaseError),
}

type Result<T> = miette::Result<T, Error>;

/// Monitoring plugin states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Unknown,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Unknown => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    running: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    needs_reboot: Option<bool>,
    message: String,
}

impl From<RebootStatus> for Report {
    fn from(reboot: RebootStatus) -> Self {
        let needs_reboot = reboot.needs_reboot();
        let (status, message) = if needs_reboot {
            (
                Status::Warning,
                format!(
                    "reboot required, running {} but {} is installed",
                    reboot.running, reboot.latest
                ),
            )
        } else {
            (
                Status::Ok,
                format!(
                    "running kernel {} is the latest installed",
                    reboot.running
                ),
            )
        };

        Self {
            status,
            running: Some(reboot.running),
            latest: Some(reboot.latest),
            needs_reboot: Some(needs_reboot),
            message,
        }
    }
}

impl Report {
    fn unknown(err: &Error) -> Self {
        Self {
            status: Status::Unknown,
            running: None,
            latest: None,
            needs_reboot: None,
            message: error_chain(err),
        }
    }
}

/// `Failed to read the running kernel version: failed to open file ...`
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(err), |err| err.source())
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

fn evaluate(global_args: &GlobalArgs) -> Result<RebootStatus> {
    let config = Config::new(global_args)?;
    let banner = config.banner()?;
    let source = config.settings.source.resolve(&banner);

    reboot_status(source, &config.settings.boot_dir, &banner)?
        .ok_or(Error::NoInstalledKernels { kind: source })
}

/// Reports whether the newest installed kernel is the one running, and turns
/// the answer into the process exit code.
pub(crate) fn check(global_args: &GlobalArgs) -> ExitCode {
    let report = match evaluate(global_args) {
        Ok(reboot) => Report::from(reboot),
        Err(err) => {
            let report = Report::unknown(&err);
            info!("{:?}", miette::Report::new(err));
            report
        }
    };

    print_report(&report, global_args.format);
    ExitCode::from(report.status.code())
}

fn print_report(report: &Report, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let label = report.status.label();
            match report.status {
                Status::Ok => println!("{}: {}", label.green(), report.message),
                Status::Warning => println!("{}: {}", label.yellow(), report.message),
                Status::Unknown => println!("{}: {}", label.red(), report.message),
            }
        }
        OutputFormat::Json => {
            if let Err(err) = serde_json::to_writer_pretty(io::stdout(), report) {
                tracing::error!("Failed to write report: {err}");
            }
            println!();
        }
    }
}
