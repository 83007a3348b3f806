//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text and are unit tested; `display_*`
//! functions print it. Everything decorated goes to stderr: stdout is
//! reserved for the bare result so scripts can capture it.

use crate::boundary::BoundaryWarning;
use crate::cli::TagOutcome;
use crate::resolver::Resolution;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Describe a resolution relative to the latest tag.
///
/// # Examples
/// ```ignore
/// "v1.2.3 -> v1.3.0 (minor)"
/// "v0.0.0 -> v0.1.0 (minor, no prior tag)"
/// "bump skipped at v1.2.3"
/// ```
pub fn format_resolution(latest_tag: Option<&str>, resolution: &Resolution) -> String {
    match resolution {
        Resolution::Bump { from, to, bump } => match latest_tag {
            Some(tag) => format!("{} -> {} ({})", tag, to, bump),
            None => format!("{} -> {} ({}, no prior tag)", from, to, bump),
        },
        Resolution::Skipped => match latest_tag {
            Some(tag) => format!("bump skipped at {}", tag),
            None => "bump skipped, repository has no tags".to_string(),
        },
    }
}

/// Describe the outcome of the tag workflow.
pub fn format_outcome(outcome: &TagOutcome) -> String {
    match outcome {
        TagOutcome::Skipped => "Version bump skipped, no tag created".to_string(),
        TagOutcome::Planned { tag, remote } => format!(
            "Dry run: would create tag {} (\"{}\") and push it to {}",
            tag.name, tag.message, remote
        ),
        TagOutcome::Published { tag, remote } => {
            format!("Created and pushed tag {} to {}", tag.name, remote)
        }
    }
}

/// Display the resolution summary.
pub fn display_resolution(latest_tag: Option<&str>, resolution: &Resolution) {
    display_status(&format_resolution(latest_tag, resolution));
}

/// The bare result line for stdout: the tag name, or `skip`.
pub fn outcome_result(outcome: &TagOutcome) -> &str {
    match outcome {
        TagOutcome::Skipped => "skip",
        TagOutcome::Planned { tag, .. } | TagOutcome::Published { tag, .. } => tag.name.as_str(),
    }
}

/// Display the workflow outcome.
pub fn display_outcome(outcome: &TagOutcome) {
    let message = format_outcome(outcome);
    match outcome {
        TagOutcome::Published { .. } => display_success(&message),
        TagOutcome::Skipped | TagOutcome::Planned { .. } => display_status(&message),
    }
}
