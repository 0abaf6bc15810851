//! Core domain logic for checkmeta
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Attribute, Rule, EffectiveAttributes, Verdict)
//! - `services/` - Parsing, resolution and validation
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
