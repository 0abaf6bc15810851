//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (git, the filesystem).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: Mock implementations for unit tests
//! - **Flexibility**: Check the index, a revision or an in-memory snapshot
//! - **Clarity**: Clear boundaries between layers

mod content;
mod vcs;

#[cfg(test)]
pub use content::MockContentSource;
pub use content::{ContentError, ContentSource, MemoryContent};
pub use vcs::VersionControl;
