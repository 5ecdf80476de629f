//! # htmlscript Test Utilities
//!
//! Shared test infrastructure for the htmlscript crates: markup fixtures, fake
//! script analyzers and formatting helpers for snapshots.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_raw_string_hashes)]
//!
//! ## Modules
//!
//! - [`analyzers`] - Deterministic stand-ins for a JavaScript analyzer
//! - [`assertions`] - Formatting helpers for snapshot tests
//! - [`fixtures`] - HTML and XHTML documents with embedded scripts
//! - [`logging`] - Opt-in log output for tests

pub mod analyzers;
pub mod assertions;
pub mod fixtures;
pub mod logging;

pub use analyzers::{ConsoleAnalyzer, ExtraSemiAnalyzer, LeadingWhitespaceAnalyzer};
pub use assertions::{format_diagnostic_messages, format_diagnostics, positions};
pub use logging::init_test_logging;

// Re-export insta for snapshot testing
pub use insta;
