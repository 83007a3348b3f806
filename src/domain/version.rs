use crate::domain::BumpType;
use crate::error::{GitBumpError, Result};
use regex::Regex;
use std::fmt;

/// Semantic version representation
///
/// Only the numeric `major.minor.patch` core is modeled. Ordering follows
/// field order, so it matches semantic-version precedence for release
/// versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from tag text (e.g. "v1.2.3" -> Version(1,2,3))
    ///
    /// A single leading `v` is stripped, then the text must start with
    /// `MAJOR.MINOR.PATCH`. Anything after the numeric prefix (pre-release,
    /// build metadata or arbitrary suffix) is ignored.
    ///
    /// Never substitutes a default: empty text is an error like any other
    /// malformed input.
    pub fn parse(tag: &str) -> Result<Self> {
        let clean_tag = tag.strip_prefix('v').unwrap_or(tag);

        let captures = Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)")
            .ok()
            .and_then(|re| re.captures(clean_tag))
            .ok_or_else(|| GitBumpError::invalid_version(tag))?;

        let component = |index: usize| -> Result<u64> {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .ok_or_else(|| GitBumpError::invalid_version(tag))
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }

    /// Bump version according to bump type
    ///
    /// Lower-significance components reset to zero. `Skip` leaves the version
    /// untouched; callers decide whether a skip produces a tag at all.
    ///
    /// Fails with [GitBumpError::VersionOverflow] when the incremented
    /// component is already `u64::MAX`.
    pub fn bump(&self, bump_type: BumpType) -> Result<Self> {
        let overflow = || GitBumpError::version_overflow(self, bump_type);
        let next = match bump_type {
            BumpType::Major => {
                Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            BumpType::Minor => Version::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpType::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            BumpType::Skip => *self,
        };
        Ok(next)
    }

    /// Tag name for this version, always `v<major>.<minor>.<patch>`
    pub fn tag_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
