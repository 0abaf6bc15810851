//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - file bytes arrive through the
//! [`ContentSource`](crate::core::ports::ContentSource) port.
//!
//! - [`parser`] - Parse pattern files into rules
//! - [`matcher`] - Compile patterns to path matchers
//! - [`resolver`] - Fold matching rules into effective attributes
//! - [`validators`] - Check content against one attribute
//! - [`engine`] - Validate a change set

pub mod engine;
pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod validators;

pub use engine::{LoadError, load_rules, run, validate, validate_file};
pub use matcher::{PatternError, compile, normalize_path};
pub use parser::{ParseError, ParseErrorKind, parse_pattern_file, parse_pattern_files};
pub use resolver::{RuleSet, resolve};
