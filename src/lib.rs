pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod publish;
pub mod resolver;
pub mod ui;

pub use error::{GitBumpError, Result};
