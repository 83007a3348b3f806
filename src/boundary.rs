use std::fmt;

/// Non-fatal conditions met while gathering inputs for a resolution.
/// The workflow carries on and these are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Fetching tags failed; local tags were used instead
    FetchFailed { remote: String, reason: String },
    /// The repository has no tags yet; resolution starts from 0.0.0
    NoPriorTag,
    /// HEAD has no readable commit message; it was treated as empty
    MissingCommitMessage,
    /// HEAD could not be read (e.g. no commits yet); the message was treated as empty
    HeadUnreadable { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from remote '{}': {}. Using local tags.",
                    remote, reason
                )
            }
            BoundaryWarning::NoPriorTag => {
                write!(f, "No existing tags found, starting from v0.0.0")
            }
            BoundaryWarning::MissingCommitMessage => {
                write!(
                    f,
                    "HEAD commit message is empty or unreadable, no markers applied"
                )
            }
            BoundaryWarning::HeadUnreadable { reason } => {
                write!(f, "Cannot read HEAD commit: {}. No markers applied.", reason)
            }
        }
    }
}
