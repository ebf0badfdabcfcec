use once_cell::sync::Lazy;
use regex::Regex;

/// `kernel-core-4.0.4-301.fc22.x86_64`, `vmlinuz-4.0.4-301.fc22.x86_64`
static PACKAGE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^[A-Za-z][A-Za-z0-9_-]*?-(\d.*)$").unwrap());

/// `.fc22`, `.fc22.x86_64`, `.el7_9.x86_64`, `.el7uek.x86_64`
static DISTRO_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\.(?:fc|el)\d+(?:[._a-z].*)?$").unwrap());

static ARCH_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\.(?:x86_64|i[3-6]86|aarch64|armv7hl|ppc64le|ppc64|s390x|noarch))+$").unwrap()
});

/// Strips distribution and architecture noise from a kernel release string.
///
/// Fedora and RHEL releases keep `<version>-<revision>` and lose the distro tag
/// and architecture (`4.0.4-301.fc22.x86_64` becomes `4.0.4-301`). Debian
/// releases such as `3.16.7-ckt9-3~deb8u2` are already canonical and come back
/// unchanged. Package and image names in front of the version are dropped too.
///
/// The result is always a substring of the input and cleaning it again is a
/// no-op.
pub fn clean_release(raw: &str) -> &str {
    let mut current = raw;

    loop {
        let next = clean_once(current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn clean_once(raw: &str) -> &str {
    let mut release = raw.trim();

    if let Some(version) = PACKAGE_PREFIX
        .captures(release)
        .and_then(|caps| caps.get(1))
    {
        release = &release[version.start()..];
    }

    if let Some(tag) = DISTRO_TAG.find(release) {
        release = &release[..tag.start()];
    }

    if let Some(arch) = ARCH_SUFFIX.find(release) {
        release = &release[..arch.start()];
    }

    release.trim()
}
