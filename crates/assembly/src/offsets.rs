// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Offset table
//!
//! Maps each statement kind to the number of synthetic wrapper lines that
//! precede user SQL in the flattened validator input. The remapper uses
//! this to translate validator line numbers back into document lines.
//!
//! Values are computed from the wrapper templates rather than hard-coded,
//! so the table cannot drift out of sync with the assembler.

use serde::{Deserialize, Serialize};
use sqlform_core::StatementKind;

use crate::templates;

/// Which build variant of an incremental statement is being validated.
///
/// Incremental statements assemble two queries; the remapper must compute
/// offsets against whichever variant the validator actually saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Full rebuild: the non-incremental variant is validated
    #[default]
    Full,
    /// Incremental run: the incremental variant is validated
    Incremental,
}

/// Synthetic wrapper lines prepended before the user's SQL for `kind`.
pub fn offset_for(kind: StatementKind) -> u32 {
    match kind {
        StatementKind::Plain => templates::prefix_line_count(templates::PLAIN_PREFIX),
        StatementKind::Incremental => templates::prefix_line_count(templates::INCREMENTAL_PREFIX),
        StatementKind::Assertion => templates::prefix_line_count(templates::ASSERTION_PREFIX),
        // Each action is dry-run on its own, with no wrapper at all.
        StatementKind::MultiAction => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The empirical constants the whole remapping arithmetic relies on.
    #[test]
    fn offsets_match_the_wrapper_templates() {
        assert_eq!(offset_for(StatementKind::Plain), 2);
        assert_eq!(offset_for(StatementKind::Assertion), 4);
        assert_eq!(offset_for(StatementKind::Incremental), 1);
        assert_eq!(offset_for(StatementKind::MultiAction), 0);
    }
}
