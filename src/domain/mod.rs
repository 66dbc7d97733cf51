//! Domain logic - pure version rules independent of the filesystem

pub mod compare;
pub mod version;

pub use compare::compare_versions;
pub use version::{apply, Bump, BumpKind, SemVer};
