use std::ffi::OsString;
use std::io;
use std::process::Command;

use camino::Utf8Path;
use kcheck_version::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::banner::{banner_release, debian_release, release_token};
use crate::{ReleaseError, clean_kernel_version};

const IMAGE_PREFIX: &str = "vmlinuz-";
const DPKG_INSTALLED: &str = "install ok installed ";

/// Where the list of installed kernels comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum InstalledSource {
    /// `dpkg` on Debian kernels, the boot directory everywhere else.
    #[default]
    Auto,
    /// `vmlinuz-<release>` images in the boot directory.
    Boot,
    /// `kernel` packages known to rpm.
    Rpm,
    /// `linux-image-<abi>` packages known to dpkg.
    Dpkg,
}

impl InstalledSource {
    /// Picks a concrete source for `Auto`, based on the running kernel's banner.
    pub fn resolve(self, banner: &str) -> Self {
        match self {
            Self::Auto if debian_release(banner).is_some() => Self::Dpkg,
            Self::Auto => Self::Boot,
            other => other,
        }
    }

    /// The part of `banner` that compares against what this source lists.
    ///
    /// dpkg reports package versions, so Debian kernels are matched by their
    /// build stamp. Boot images and rpm packages are named after the release
    /// token.
    pub fn running_release(self, banner: &str) -> &str {
        match self.resolve(banner) {
            Self::Dpkg => banner_release(banner),
            _ => release_token(banner).unwrap_or_default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Boot => "boot",
            Self::Rpm => "rpm",
            Self::Dpkg => "dpkg",
        }
    }
}

impl std::fmt::Display for InstalledSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown installed kernel source `{0}`, expected one of auto, boot, rpm, dpkg")]
pub struct UnknownSourceError(String);

impl std::str::FromStr for InstalledSource {
    type Err = UnknownSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "boot" => Ok(Self::Boot),
            "rpm" => Ok(Self::Rpm),
            "dpkg" => Ok(Self::Dpkg),
            other => Err(UnknownSourceError(other.to_string())),
        }
    }
}

/// Lists the raw release strings of every installed kernel.
///
/// `banner` is the running kernel's banner; it decides what `Auto` means.
#[instrument(skip(banner))]
pub fn installed_releases(
    source: InstalledSource,
    boot_dir: &Utf8Path,
    banner: &str,
) -> Result<Vec<String>, ReleaseError> {
    match source.resolve(banner) {
        InstalledSource::Auto | InstalledSource::Boot => {
            let entries = fs_err::read_dir(boot_dir).map_err(|source| ReleaseError::BootDir {
                path: boot_dir.to_path_buf(),
                source,
            })?;
            let names = boot_entry_names(
                entries.map(|entry| entry.map(|entry| entry.file_name())),
                boot_dir,
            )?;

            Ok(parse_boot_entries(names))
        }
        InstalledSource::Rpm => {
            let output = run_query(
                "rpm",
                &["-q", "--queryformat", "%{VERSION}-%{RELEASE}.%{ARCH}\\n", "kernel"],
            )?;
            Ok(parse_query_output(&output))
        }
        InstalledSource::Dpkg => {
            let output = run_query(
                "dpkg-query",
                &["-W", "-f", "${Status} ${Version}\\n", "linux-image-[0-9]*"],
            )?;
            Ok(parse_dpkg_status(&output))
        }
    }
}

/// Collects the UTF-8 file names of a directory listing, failing on the
/// first entry that could not be read.
fn boot_entry_names<I>(entries: I, boot_dir: &Utf8Path) -> Result<Vec<String>, ReleaseError>
where
    I: IntoIterator<Item = io::Result<OsString>>,
{
    let mut names = Vec::new();
    for entry in entries {
        let name = entry.map_err(|source| ReleaseError::BootDir {
            path: boot_dir.to_path_buf(),
            source,
        })?;
        match name.into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!("Skipping non UTF-8 entry {name:?}"),
        }
    }
    Ok(names)
}

/// Release strings of the `vmlinuz-<release>` images among `names`.
///
/// Fedora's rescue images (`vmlinuz-0-rescue-<machine-id>`) are not kernels
/// anyone upgrades to and are skipped.
pub fn parse_boot_entries<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut releases = names
        .into_iter()
        .filter_map(|name| {
            name.as_ref()
                .strip_prefix(IMAGE_PREFIX)
                .filter(|release| !release.is_empty() && !release.contains("-rescue-"))
                .map(str::to_string)
        })
        .collect::<Vec<_>>();

    releases.sort();
    releases
}

/// One release per non-empty line of a package manager query.
pub fn parse_query_output(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Versions of the packages `dpkg-query` reports as installed, from
/// `${Status} ${Version}` lines.
///
/// Removed packages whose configuration is still around
/// (`deinstall ok config-files`) are skipped.
pub fn parse_dpkg_status(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(DPKG_INSTALLED))
        .map(str::trim)
        .filter(|version| !version.is_empty())
        .map(str::to_string)
        .collect()
}

/// The newest of `releases` once each has been cleaned.
pub fn latest_installed<I, S>(releases: I) -> Option<Version>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    releases
        .into_iter()
        .map(|release| clean_kernel_version(release.as_ref()))
        .max()
}

fn run_query(program: &str, args: &[&str]) -> Result<String, ReleaseError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running `{command}`");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ReleaseError::Query {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ReleaseError::QueryFailed {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
