//! Tag workflow orchestration
//!
//! Gathers the inputs for a resolution from the repository, resolves the next
//! version and, for the `tag` command, publishes it. Kept free of clap and
//! terminal output so it can be driven from tests with a mock repository.

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BumpType, Tag, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::publish::publish_tag;
use crate::resolver::{resolve, Resolution};

/// Arguments for the tag workflow
///
/// Mirrors the CLI flags. `None` fields fall back to the configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRequest {
    /// Remote to fetch from and push to
    pub remote: Option<String>,

    /// Bump type overriding commit-message markers
    pub force_bump: Option<BumpType>,

    /// Explicit version; bypasses resolution entirely
    pub version: Option<String>,

    /// Tag annotation; defaults to the configured template
    pub message: Option<String>,

    /// Whether to fetch tags before resolving
    pub fetch: Option<bool>,

    /// Preview mode - don't create tags or push
    pub dry_run: bool,
}

impl TagRequest {
    fn remote<'a>(&'a self, config: &'a Config) -> &'a str {
        self.remote.as_deref().unwrap_or(&config.remote.name)
    }

    fn fetch(&self, config: &Config) -> bool {
        self.fetch.unwrap_or(config.remote.fetch)
    }
}

/// Result of resolving the next version against a repository
#[derive(Debug, Clone, PartialEq)]
pub struct NextVersion {
    /// Latest tag the resolution started from
    pub latest_tag: Option<String>,

    pub resolution: Resolution,

    pub warnings: Vec<BoundaryWarning>,
}

/// What the tag workflow did
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    /// The bump was skipped; nothing was tagged
    Skipped,

    /// Dry run: this tag would have been created and pushed
    Planned { tag: Tag, remote: String },

    /// The tag was created and pushed
    Published { tag: Tag, remote: String },
}

/// Result of a tag workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Latest tag before this run, when resolution took place
    pub latest_tag: Option<String>,

    pub outcome: TagOutcome,

    pub warnings: Vec<BoundaryWarning>,
}

/// Resolve the next version for a repository
///
/// 1. Fetch tags from the remote (a failure only produces a warning)
/// 2. Take the latest tag by version, if any
/// 3. Read the HEAD subject unless a bump type is forced
/// 4. Resolve
pub fn next_version<R: Repository + ?Sized>(
    repo: &R,
    request: &TagRequest,
    config: &Config,
) -> Result<NextVersion> {
    let mut warnings = Vec::new();
    let remote = request.remote(config);

    if request.fetch(config) {
        if let Err(e) = repo.fetch_tags(remote) {
            debug!(remote, error = %e, "tag fetch failed");
            warnings.push(BoundaryWarning::FetchFailed {
                remote: remote.to_string(),
                reason: e.to_string(),
            });
        }
    } else {
        debug!("skipping tag fetch");
    }

    let latest_tag = repo.list_tags()?.into_iter().next();
    if latest_tag.is_none() {
        warnings.push(BoundaryWarning::NoPriorTag);
    }

    let subject = match request.force_bump {
        Some(_) => String::new(),
        None => match repo.head_subject() {
            Ok(Some(subject)) => subject,
            Ok(None) => {
                warnings.push(BoundaryWarning::MissingCommitMessage);
                String::new()
            }
            Err(e) => {
                debug!(error = %e, "cannot read HEAD commit");
                warnings.push(BoundaryWarning::HeadUnreadable {
                    reason: e.to_string(),
                });
                String::new()
            }
        },
    };

    let resolution = resolve(latest_tag.as_deref(), &subject, request.force_bump)?;

    Ok(NextVersion {
        latest_tag,
        resolution,
        warnings,
    })
}

/// Main tag workflow
///
/// Determines the version to tag (explicit or resolved), then creates and
/// pushes the annotated tag unless the bump was skipped or this is a dry run.
///
/// # Returns
///
/// The outcome plus any non-fatal warnings, or the first hard error
/// (invalid version, failed publication).
pub fn run_tag_workflow<R: Repository + ?Sized>(
    repo: &R,
    request: &TagRequest,
    config: &Config,
) -> Result<WorkflowResult> {
    let remote = request.remote(config).to_string();

    let (version, latest_tag, warnings) = match request.version.as_deref() {
        Some(explicit) => {
            let version = Version::parse(explicit.trim())?;
            debug!(%version, "using explicit version");
            (version, None, Vec::new())
        }
        None => {
            let next = next_version(repo, request, config)?;
            match next.resolution.version() {
                Some(version) => (version, next.latest_tag, next.warnings),
                None => {
                    info!("version bump skipped, no tag created");
                    return Ok(WorkflowResult {
                        latest_tag: next.latest_tag,
                        outcome: TagOutcome::Skipped,
                        warnings: next.warnings,
                    });
                }
            }
        }
    };

    let tag = Tag::for_version(&version, request.message.as_deref(), &config.tag.message);

    let outcome = if request.dry_run {
        TagOutcome::Planned { tag, remote }
    } else {
        publish_tag(repo, &remote, &tag)?;
        TagOutcome::Published { tag, remote }
    };

    Ok(WorkflowResult {
        latest_tag,
        outcome,
        warnings,
    })
}
