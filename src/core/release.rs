//! Typed release and version tags.
//!
//! MATLAB releases are named `R<year><half>` (`R2015a`, `R2014b`). MOSEK ships
//! one MEX build per supported release under `toolbox/<release>/`, so release
//! tags need a total order to pick the newest build a local MATLAB can load.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static RELEASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bR?(\d{4})([ab])\b").expect("valid release pattern"));

/// First or second MATLAB release of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseHalf {
    A,
    B,
}

impl ReleaseHalf {
    fn as_char(&self) -> char {
        match self {
            ReleaseHalf::A => 'a',
            ReleaseHalf::B => 'b',
        }
    }
}

/// Error parsing a release or version tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("invalid MATLAB release '{0}'; expected a tag like R2015a")]
    Release(String),

    #[error("invalid Python version '{0}'; expected a version like 3.11")]
    PythonVersion(String),
}

/// A MATLAB release such as `R2015a`.
///
/// Ordered chronologically: `R2014b < R2015a < R2015b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatlabRelease {
    pub year: u16,
    pub half: ReleaseHalf,
}

impl MatlabRelease {
    pub fn new(year: u16, half: ReleaseHalf) -> Self {
        MatlabRelease { year, half }
    }

    /// Find the first release tag embedded in free-form text.
    ///
    /// MATLAB prints banners and warnings around the value we ask for, so
    /// probe output is searched rather than parsed whole.
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = RELEASE_PATTERN.captures(text)?;
        let year = caps.get(1)?.as_str().parse().ok()?;
        let half = match caps.get(2)?.as_str() {
            "a" | "A" => ReleaseHalf::A,
            _ => ReleaseHalf::B,
        };
        Some(MatlabRelease::new(year, half))
    }

    /// Tag in the lowercase spelling MOSEK uses for toolbox directories.
    pub fn to_lowercase_tag(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Whether this release's year is no later than `other`'s.
    ///
    /// The half is ignored: an `R2015b` build is accepted for `R2015a`.
    pub fn year_not_after(&self, other: &MatlabRelease) -> bool {
        self.year <= other.year
    }
}

impl Ord for MatlabRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.half.cmp(&other.half))
    }
}

impl PartialOrd for MatlabRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for MatlabRelease {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('R')
            .or_else(|| trimmed.strip_prefix('r'))
            .unwrap_or(trimmed);

        if body.len() != 5 || !body.is_char_boundary(4) {
            return Err(TagError::Release(s.to_string()));
        }

        let (year, half) = body.split_at(4);
        let year: u16 = year
            .parse()
            .map_err(|_| TagError::Release(s.to_string()))?;
        let half = match half {
            "a" | "A" => ReleaseHalf::A,
            "b" | "B" => ReleaseHalf::B,
            _ => return Err(TagError::Release(s.to_string())),
        };

        Ok(MatlabRelease::new(year, half))
    }
}

impl fmt::Display for MatlabRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}{}", self.year, self.half.as_char())
    }
}

/// A Python `major.minor` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: Option<u32>,
}

impl PythonVersion {
    /// Major version as a string, as used in `python/<major>` directories.
    pub fn major_tag(&self) -> String {
        self.major.to_string()
    }
}

impl FromStr for PythonVersion {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| TagError::PythonVersion(s.to_string()))?;
        let minor = match parts.next() {
            Some(p) => Some(
                p.parse()
                    .map_err(|_| TagError::PythonVersion(s.to_string()))?,
            ),
            None => None,
        };

        Ok(PythonVersion { major, minor })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{}.{}", self.major, minor),
            None => write!(f, "{}", self.major),
        }
    }
}
