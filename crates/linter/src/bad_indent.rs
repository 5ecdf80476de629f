//! Reports script lines that do not carry the expected indentation.

use crate::IndentPlan;
use htmlscript_extract::ScriptBlock;
use htmlscript_types::{Diagnostic, Severity};

pub const RULE_ID: &str = "bad-indent";
pub const MESSAGE: &str = "Bad line indentation.";

/// One diagnostic per bad-indent line of `block`, in document coordinates.
pub fn check(block: &ScriptBlock, plan: &IndentPlan) -> Vec<Diagnostic> {
    let first_line = block.start_line();

    plan.bad_lines()
        .map(|line| {
            let line = first_line.saturating_add(u32::try_from(line).unwrap_or(u32::MAX));
            tracing::trace!(block = block.index, line, "Bad indentation");
            Diagnostic::new(line, 1, MESSAGE)
                .with_severity(Severity::Error)
                .with_rule(RULE_ID)
        })
        .collect()
}
