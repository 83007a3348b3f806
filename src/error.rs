use std::fmt;
use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum GitBumpError {
    #[error("Invalid version format: '{tag}' - expected [v]MAJOR.MINOR.PATCH")]
    InvalidVersionFormat { tag: String },

    #[error("Cannot apply {bump} bump to {version}: component out of range")]
    VersionOverflow { version: String, bump: String },

    #[error("Invalid bump type: '{0}' - expected one of skip, patch, minor, major")]
    InvalidBumpType(String),

    #[error("Tag publication failed: {0}")]
    Publish(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, GitBumpError>;

impl GitBumpError {
    /// Create a version format error for the offending tag text
    pub fn invalid_version(tag: impl Into<String>) -> Self {
        GitBumpError::InvalidVersionFormat { tag: tag.into() }
    }

    /// Create an overflow error for a bump that does not fit in a component
    pub fn version_overflow(version: impl fmt::Display, bump: impl fmt::Display) -> Self {
        GitBumpError::VersionOverflow {
            version: version.to_string(),
            bump: bump.to_string(),
        }
    }

    /// Create a bump type error for an unrecognized override
    pub fn invalid_bump(value: impl Into<String>) -> Self {
        GitBumpError::InvalidBumpType(value.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        GitBumpError::Publish(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitBumpError::Config(msg.into())
    }
}
