//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `git/` - Git operations (content, change sets, hooks)

pub mod git;
