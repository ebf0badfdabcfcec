pub mod banner;
pub mod clean;
mod error;
pub mod installed;

use std::io;

use camino::Utf8Path;
use serde::Serialize;
use tracing::{debug, instrument, warn};

pub use banner::{banner_release, release_token};
pub use clean::clean_release;
pub use error::ReleaseError;
pub use installed::{InstalledSource, installed_releases, latest_installed, parse_dpkg_status};
pub use kcheck_version::{Version, VersionSegment};

/// Where the running kernel describes itself.
pub const PROC_VERSION: &str = "/proc/version";

/// Cleans a raw release string and parses what is left.
pub fn clean_kernel_version(raw: &str) -> Version {
    Version::new(clean_release(raw))
}

/// The version of the running kernel.
///
/// `read_banner` produces a `/proc/version` style line, normally
/// [`proc_version`]. Failing to read it is an error; a banner without a
/// release in it gives an empty [`Version`].
#[instrument(skip_all)]
pub fn running_kernel_version<F>(read_banner: F) -> Result<Version, ReleaseError>
where
    F: FnOnce() -> io::Result<String>,
{
    let banner = read_banner().map_err(ReleaseError::Source)?;
    let release = banner_release(&banner);

    if release.is_empty() {
        warn!("No kernel release found in banner {banner:?}");
    } else {
        debug!("Running kernel release is {release}");
    }

    Ok(clean_kernel_version(release))
}

/// Reads the first line of the kernel banner at `path`.
pub fn read_proc_version(path: &Utf8Path) -> io::Result<String> {
    let content = fs_err::read_to_string(path)?;
    Ok(content.lines().next().unwrap_or_default().to_string())
}

/// Reads the banner of the running kernel from [`PROC_VERSION`].
pub fn proc_version() -> io::Result<String> {
    read_proc_version(Utf8Path::new(PROC_VERSION))
}

/// The running kernel next to the newest installed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebootStatus {
    pub running: Version,
    pub latest: Version,
}

impl RebootStatus {
    /// Pairs `running` with the newest of `installed`, or `None` when nothing
    /// is installed.
    pub fn new<I>(running: Version, installed: I) -> Option<Self>
    where
        I: IntoIterator<Item = Version>,
    {
        let latest = installed.into_iter().max()?;
        Some(Self { running, latest })
    }

    /// A newer kernel than the running one is waiting for the next boot.
    pub fn needs_reboot(&self) -> bool {
        self.latest > self.running
    }
}

/// Compares the running kernel with the kernels `source` lists as installed.
///
/// Both sides are taken in the same form: package versions for dpkg, release
/// names for boot images and rpm. `None` when nothing is installed.
#[instrument(skip(banner))]
pub fn reboot_status(
    source: InstalledSource,
    boot_dir: &Utf8Path,
    banner: &str,
) -> Result<Option<RebootStatus>, ReleaseError> {
    let source = source.resolve(banner);
    let running = clean_kernel_version(source.running_release(banner));
    let releases = installed_releases(source, boot_dir, banner)?;
    debug!("Installed kernels: {releases:?}");

    Ok(RebootStatus::new(
        running,
        releases.iter().map(|release| clean_kernel_version(release)),
    ))
}
