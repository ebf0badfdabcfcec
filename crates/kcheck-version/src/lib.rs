//! Comparable kernel release identifiers.
//!
//! A [`Version`] splits its string into alternating runs of ASCII digits and
//! everything else. Digit runs compare by integer value, other runs compare as
//! plain strings, and a version that is a segment-wise prefix of another sorts
//! first. That is enough to order upstream releases (`2.12 > 2.2`), distro
//! revisions (`3.12-12 > 3.12-2`) and Debian security suffixes
//! (`3.2.4 < 3.2.4+2`) without knowing any packaging format.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::hash::{Hash, Hasher};

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// A maximal run of either digits or non-digits within a version string.
#[derive(Debug, Clone)]
pub enum VersionSegment {
    /// ASCII digits, kept as written. Only the integer value takes part in comparisons.
    Number(String),
    /// Anything else, separators such as `.`, `-`, `~` and `+` included.
    Text(String),
}

impl VersionSegment {
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// The segment exactly as it appeared in the version string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number(digits) => digits,
            Self::Text(text) => text,
        }
    }

    /// Digits with leading zeros removed; a run of zeros collapses to `"0"`.
    ///
    /// Two such strings compare like the integers they spell once their lengths
    /// are compared first, so arbitrarily long runs never overflow.
    fn significant_digits(digits: &str) -> &str {
        match digits.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        }
    }
}

impl std::fmt::Display for VersionSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq for VersionSegment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionSegment {}

impl Hash for VersionSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(digits) => {
                0u8.hash(state);
                Self::significant_digits(digits).hash(state);
            }
            Self::Text(text) => {
                1u8.hash(state);
                text.hash(state);
            }
        }
    }
}

impl PartialOrd for VersionSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                let a = Self::significant_digits(a);
                let b = Self::significant_digits(b);
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

/// A parsed kernel release such as `4.0.4-301` or `3.16.7-ckt9-3~deb8u2`.
///
/// Construction never fails. The original string is kept verbatim and is what
/// [`Display`](std::fmt::Display) prints.
#[derive(Debug, Clone, Default, SerializeDisplay, DeserializeFromStr)]
pub struct Version {
    version: String,
    segments: Vec<VersionSegment>,
}

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        let version = version.into();
        let segments = Self::parse_segments(&version);
        Self { version, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.version
    }

    pub fn segments(&self) -> &[VersionSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn parse_segments(version: &str) -> Vec<VersionSegment> {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut in_digits = false;

        for (index, ch) in version.char_indices() {
            let is_digit = ch.is_ascii_digit();

            if index > start && in_digits != is_digit {
                segments.push(Self::segment(&version[start..index], in_digits));
                start = index;
            }

            in_digits = is_digit;
        }

        if start < version.len() {
            segments.push(Self::segment(&version[start..], in_digits));
        }

        segments
    }

    fn segment(run: &str, is_digits: bool) -> VersionSegment {
        if is_digits {
            VersionSegment::Number(run.to_string())
        } else {
            VersionSegment::Text(run.to_string())
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());

        for i in 0..max_len {
            match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => match a.cmp(b) {
                    Ordering::Equal => continue,
                    other => return other,
                },
                // The exhausted side is a prefix of the other one.
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (None, None) => break,
            }
        }

        Ordering::Equal
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl std::str::FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::new(s))
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Version::new(version)
    }
}

impl From<String> for Version {
    fn from(version: String) -> Self {
        Version::new(version)
    }
}
