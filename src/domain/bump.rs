use crate::error::GitBumpError;
use std::fmt;
use std::str::FromStr;

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpType {
    Skip,
    Patch,
    Minor,
    Major,
}

/// Commit-message markers in priority order. The first one present wins,
/// wherever it appears in the message.
const MARKERS: [(&str, BumpType); 4] = [
    ("[skip]", BumpType::Skip),
    ("[major]", BumpType::Major),
    ("[minor]", BumpType::Minor),
    ("[patch]", BumpType::Patch),
];

impl BumpType {
    /// Bump applied when a commit message carries no marker
    pub const DEFAULT: BumpType = BumpType::Minor;

    /// Classify a commit message by its bracketed markers
    ///
    /// Matching is a case-insensitive substring scan: `[skip]` beats
    /// `[major]`, which beats `[minor]`, which beats `[patch]`. Messages
    /// without any marker get [`BumpType::DEFAULT`].
    ///
    /// # Example
    /// ```
    /// use git_bump::domain::BumpType;
    ///
    /// assert_eq!(BumpType::from_commit_message("Fix bug [patch]"), BumpType::Patch);
    /// assert_eq!(BumpType::from_commit_message("[skip][major]"), BumpType::Skip);
    /// assert_eq!(BumpType::from_commit_message("no marker here"), BumpType::Minor);
    /// ```
    pub fn from_commit_message(message: &str) -> Self {
        let lowered = message.to_lowercase();

        MARKERS
            .iter()
            .find(|(marker, _)| lowered.contains(marker))
            .map(|(_, bump)| *bump)
            .unwrap_or(Self::DEFAULT)
    }

    /// Lowercase name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::Skip => "skip",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = GitBumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(BumpType::Skip),
            "patch" => Ok(BumpType::Patch),
            "minor" => Ok(BumpType::Minor),
            "major" => Ok(BumpType::Major),
            _ => Err(GitBumpError::invalid_bump(s)),
        }
    }
}
