//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the source-control
//! operations git-bump needs, allowing for a real `git2`-backed repository
//! and an in-memory mock for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Workflow code depends on the [Repository] trait only.
//!
//! ```rust
//! # use git_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! repo.fetch_tags("origin")?;
//! let latest = repo.list_tags()?.into_iter().next();
//! let subject = repo.head_subject()?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::cmp::Reverse;

use crate::domain::Version;
use crate::error::Result;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// Implementations report failures as [crate::error::GitBumpError]; the
/// publish step wraps create/push failures into a publication error.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation for mocking Git operations
pub trait Repository: Send {
    /// Fetch all tags from a remote
    ///
    /// Equivalent of `git fetch --tags <remote>`.
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Get all tag names, latest version first
    ///
    /// Implementations must return tags ordered by descending version (see
    /// [sort_tags_by_version]); callers only look at the first entry.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Subject line of the HEAD commit
    ///
    /// # Returns
    /// * `Ok(Some(subject))` - First line of the commit message
    /// * `Ok(None)` - The commit message is missing or unreadable
    /// * `Err` - If HEAD cannot be resolved
    fn head_subject(&self) -> Result<Option<String>>;

    /// Create an annotated tag at HEAD
    ///
    /// Fails if a tag with the same name already exists.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;

    /// Delete a local tag
    fn delete_tag(&self, name: &str) -> Result<()>;
}

/// Sort tag names by descending version, like `git tag --sort=-version:refname`
///
/// Tags that parse as semantic versions (after an optional `v`) come first,
/// using full semver precedence so `v1.2.3-rc.1` sorts below `v1.2.3`. Tags
/// with only a numeric `MAJOR.MINOR.PATCH` prefix rank as that release. All
/// other tags follow in reverse lexical order.
pub fn sort_tags_by_version(tags: &mut [String]) {
    tags.sort_by_cached_key(|tag| (Reverse(version_key(tag)), Reverse(tag.clone())));
}

fn version_key(tag: &str) -> Option<semver::Version> {
    let stripped = tag.strip_prefix('v').unwrap_or(tag);

    semver::Version::parse(stripped).ok().or_else(|| {
        Version::parse(tag)
            .ok()
            .map(|v| semver::Version::new(v.major, v.minor, v.patch))
    })
}
