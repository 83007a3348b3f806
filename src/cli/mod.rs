//! Command-line workflow logic, separated from argument parsing in main.rs

pub mod orchestration;

pub use orchestration::{
    next_version, run_tag_workflow, NextVersion, TagOutcome, TagRequest, WorkflowResult,
};
