//! Next-version resolution from the latest tag and the triggering commit
//!
//! Everything here is pure: no git access, no I/O. The tag workflow in
//! [`crate::cli::orchestration`] gathers the inputs and acts on the result.

use tracing::debug;

use crate::domain::{BumpType, Version};
use crate::error::Result;

/// Outcome of a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A new version should be tagged
    Bump {
        from: Version,
        to: Version,
        bump: BumpType,
    },
    /// The bump was skipped; no tag must be created
    Skipped,
}

impl Resolution {
    /// The version to tag, if any
    pub fn version(&self) -> Option<Version> {
        match self {
            Resolution::Bump { to, .. } => Some(*to),
            Resolution::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Resolution::Skipped)
    }
}

/// Parse tag text into a version. See [`Version::parse`].
pub fn parse_version(tag: &str) -> Result<Version> {
    Version::parse(tag)
}

/// Decide the bump type from commit-message markers. See
/// [`BumpType::from_commit_message`].
pub fn classify_commit_message(message: &str) -> BumpType {
    BumpType::from_commit_message(message)
}

/// Resolve the next version
///
/// # Arguments
/// * `latest_tag` - Latest release tag; `None` or blank means no prior release
///   and the current version is taken as `0.0.0`
/// * `commit_message` - Subject of the most recent commit
/// * `forced` - Override that takes precedence over commit-message markers
///
/// # Returns
/// * `Ok(Resolution::Bump { .. })` - The next version
/// * `Ok(Resolution::Skipped)` - The effective bump type was `skip`
/// * `Err` - `latest_tag` is non-blank and not a valid version
///
/// # Example
/// ```
/// use git_bump::domain::Version;
/// use git_bump::resolver::{resolve, Resolution};
///
/// let next = resolve(Some("v1.0.0"), "[major] break api", None).unwrap();
/// assert_eq!(next.version(), Some(Version::new(2, 0, 0)));
///
/// let none = resolve(Some("v1.9.9"), "whatever", Some("skip".parse().unwrap())).unwrap();
/// assert_eq!(none, Resolution::Skipped);
/// ```
pub fn resolve(
    latest_tag: Option<&str>,
    commit_message: &str,
    forced: Option<BumpType>,
) -> Result<Resolution> {
    let current = match latest_tag.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => parse_version(tag)?,
        None => Version::default(),
    };

    let bump = match forced {
        Some(bump) => {
            debug!(%bump, "using forced bump type");
            bump
        }
        None => {
            let bump = classify_commit_message(commit_message);
            debug!(%bump, message = commit_message, "classified commit message");
            bump
        }
    };

    if bump == BumpType::Skip {
        debug!(%current, "version bump skipped");
        return Ok(Resolution::Skipped);
    }

    let next = current.bump(bump)?;
    debug!(%current, %next, "resolved next version");

    Ok(Resolution::Bump {
        from: current,
        to: next,
        bump,
    })
}

/// Pick the latest tag out of a newline-separated tag list
///
/// The list must already be sorted by descending version; only the first
/// non-blank line is used and no re-sorting happens here.
pub fn latest_tag(tag_list: &str) -> Option<&str> {
    tag_list.lines().map(str::trim).find(|line| !line.is_empty())
}
