//! Domain logic - pure versioning rules independent of git operations

pub mod bump;
pub mod tag;
pub mod version;

pub use bump::BumpType;
pub use tag::{Tag, DEFAULT_MESSAGE_TEMPLATE};
pub use version::Version;
