use once_cell::sync::Lazy;
use regex::Regex;

/// The build stamp Debian kernels append to the banner, e.g.
/// `#1 SMP Debian 3.16.7-ckt9-3~deb8u1 (2015-04-24)`.
static DEBIAN_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\d+\s.*\bDebian\s+(\d\S*)").unwrap());

/// The release token of a `/proc/version` style banner: its second word.
///
/// `Linux version 4.0.3-301.fc22.x86_64 (mockbuild@...) ...` gives
/// `4.0.3-301.fc22.x86_64`.
pub fn release_token(banner: &str) -> Option<&str> {
    banner.split_whitespace().nth(1)
}

/// The Debian package version from the build stamp, if the banner has one.
///
/// Debian names its kernels after the ABI (`3.16.0-4-amd64`), which stays the
/// same across security updates, so only the stamp tells two builds apart.
pub fn debian_release(banner: &str) -> Option<&str> {
    DEBIAN_STAMP
        .captures(banner)
        .and_then(|caps| caps.get(1))
        .map(|release| release.as_str())
}

/// The release that should be compared for the kernel described by `banner`.
///
/// Returns an empty string when the banner carries no release at all.
pub fn banner_release(banner: &str) -> &str {
    debian_release(banner)
        .or_else(|| release_token(banner))
        .unwrap_or_default()
}
