//! Lints JavaScript embedded in HTML and XML documents.
//!
//! Script blocks are extracted from the markup, re-indented and laid out in a
//! virtual source whose line numbers match the document's. An external
//! [`Analyzer`] checks that source, and its diagnostics are mapped back onto
//! the document, fix ranges included.
//!
//! ```rust,ignore
//! use htmlscript_linter::prelude::*;
//!
//! let linter = Linter::new(Settings::default(), my_analyzer);
//! let diagnostics = linter.lint(&html, "index.html");
//! ```

mod analyzer;
mod assemble;
pub mod bad_indent;
mod indent;
mod pipeline;
mod remap;

pub use analyzer::Analyzer;
pub use assemble::{Segment, VirtualLine, VirtualSource};
pub use indent::{plan_block, remap_column, transform_column, IndentPlan, LineKind, LinePlan};
pub use pipeline::{Dispatch, Linter, Prepared};
pub use remap::{RemapError, Remapper};

pub use htmlscript_config::{IndentDescriptor, Settings};
pub use htmlscript_types::{apply_fixes, Diagnostic, Fix, MarkupMode, OffsetRange, Severity};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use htmlscript_linter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::pipeline::{Dispatch, Linter};
    pub use htmlscript_config::{IndentDescriptor, Settings};
    pub use htmlscript_types::{Diagnostic, Fix, Severity};
}
