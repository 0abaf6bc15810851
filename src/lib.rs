//! checkmeta - declared file meta attributes, checked at commit time
//!
//! This library parses `.hgmeta` pattern files into rules, resolves the
//! effective attributes of a path and validates file content against them.
//!
//! - [`core`] - Models, parsing, resolution and validation (no I/O)
//! - [`adapters`] - Git-backed implementations of the core ports
//! - [`config`] - `.checkmeta.toml` project settings
//! - [`output`] - Human and JSON rendering

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
