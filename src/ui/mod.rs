//! User interface module - terminal output for the CLI.
//!
//! Everything printed for humans goes through here; diagnostics go through
//! `tracing` instead.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_outcome, display_resolution,
    display_status, display_success, format_outcome, format_resolution, outcome_result,
};

use crate::boundary::BoundaryWarning;

/// Display every collected warning, in order.
pub fn display_warnings(warnings: &[BoundaryWarning]) {
    for warning in warnings {
        display_boundary_warning(warning);
    }
}
