//! Tag publication: create an annotated tag at HEAD and push it
//!
//! Publication is all-or-nothing from the caller's point of view. When the
//! push fails the freshly created local tag is removed again, so a failed
//! run never leaves a tag behind that a retry would trip over.

use tracing::{info, warn};

use crate::domain::Tag;
use crate::error::{GitBumpError, Result};
use crate::git::Repository;

/// Create `tag` at HEAD and push it to `remote`
///
/// # Returns
/// * `Ok(())` - The tag exists locally and on the remote
/// * `Err(GitBumpError::Publish)` - Nothing was published; the local tag was
///   rolled back where possible
pub fn publish_tag<R: Repository + ?Sized>(repo: &R, remote: &str, tag: &Tag) -> Result<()> {
    repo.create_annotated_tag(&tag.name, &tag.message)
        .map_err(|e| {
            GitBumpError::publish(format!("Cannot create tag '{}': {}", tag.name, e))
        })?;
    info!(tag = %tag.name, "created annotated tag");

    if let Err(push_err) = repo.push_tag(remote, &tag.name) {
        warn!(tag = %tag.name, remote, error = %push_err, "push failed, removing local tag");

        return match repo.delete_tag(&tag.name) {
            Ok(()) => Err(GitBumpError::publish(format!(
                "Cannot push tag '{}' to '{}': {}",
                tag.name, remote, push_err
            ))),
            Err(delete_err) => Err(GitBumpError::publish(format!(
                "Cannot push tag '{}' to '{}': {}; removing the local tag also failed: {}",
                tag.name, remote, push_err, delete_err
            ))),
        };
    }
    info!(tag = %tag.name, remote, "pushed tag");

    Ok(())
}
