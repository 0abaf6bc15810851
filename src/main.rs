//! checkmeta - A commit hook that enforces declared file meta attributes
//!
//! Rules in `.hgmeta` pattern files assign attributes such as `encoding(utf-8)`
//! or `bom(false)` to paths; the pre-commit hook rejects a commit whose staged
//! files do not satisfy them.

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

mod cli;
mod commands;

/// Main entry point for the checkmeta CLI
fn main() -> anyhow::Result<()> {
    cli::run()
}
