//! Foundation types for htmlscript.
//!
//! This crate provides the types shared by the extraction, configuration and
//! remapping crates.
//!
//! # Type Categories
//!
//! - **Position types**: [`Position`], [`Range`], [`OffsetRange`]
//! - **Mode**: [`MarkupMode`]
//! - **Diagnostic types**: [`Diagnostic`], [`Severity`], [`Fix`]

mod diagnostic;
mod fix;
mod mode;
mod position;
mod severity;

pub use diagnostic::Diagnostic;
pub use fix::{apply_fixes, Fix};
pub use mode::{MarkupMode, DEFAULT_JAVASCRIPT_MIME_TYPES, DEFAULT_XML_EXTENSIONS};
pub use position::{OffsetRange, Position, Range};
pub use severity::Severity;
