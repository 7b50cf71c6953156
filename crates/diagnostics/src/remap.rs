// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Position remapper
//!
//! Converts a validator-reported position inside the flattened query back
//! into a position in the original document, and builds the diagnostic
//! the editor displays.
//!
//! ## Main-body arithmetic
//!
//! ```text
//! document_line = (main_start + (error_line - offset)) - pre_operations_span
//! ```
//!
//! where `offset` is the wrapper line count for the statement kind and
//! `pre_operations_span` is the inclusive span of the *first*
//! pre-operations block (its text was prepended ahead of the wrapper in
//! the flattened string, so the validator counted those lines once
//! already). The arithmetic is only correct while the assembler templates
//! and the offset table agree; offsets are derived from the templates to
//! keep that true.
//!
//! ## Phase anchors
//!
//! Pre/post-operation errors are not remapped line-precise: they anchor
//! on the line above the first block of their kind with a fixed-width
//! column range. Later blocks of the same kind share that anchor (known
//! limitation, see DESIGN.md). Assertion errors are document-level and
//! always anchor at the origin.

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};
use sqlform_assembly::offset_for;
use sqlform_core::{BlockMetadata, StatementKind};

use crate::denylist::is_suppressed;
use crate::location::{ErrorLocation, parse_error_location};

/// Which dry-run query an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryPhase {
    /// The main statement body
    Main,
    /// A standalone dry-run of the pre-operations text
    PreOperations,
    /// A standalone dry-run of the post-operations text
    PostOperations,
    /// The assertion harness
    Assertion,
}

/// Source tag attached to every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "sqlform";

/// Column width of the anchor range for pre/post-operation diagnostics.
const OPERATION_ANCHOR_WIDTH: u32 = 16;

/// Remap a main-body validator position into document space.
///
/// Input and output are both 1-indexed. Returns `(line, column)`; the
/// degenerate empty-document case (validator line 0 against an unset main
/// body) maps to line 0 rather than underflowing.
pub fn remap_main(
    error: ErrorLocation,
    kind: StatementKind,
    metadata: &BlockMetadata,
) -> (u32, u32) {
    let main_start = metadata.main_body.start_line;
    if error.line == 0 && main_start == 0 {
        return (0, error.column);
    }

    let offset = offset_for(kind);
    let pre_span = metadata.first_pre_operations_span();

    let line = i64::from(main_start) + i64::from(error.line)
        - i64::from(offset)
        - i64::from(pre_span);
    (line.max(0) as u32, error.column)
}

/// Build the diagnostic for one error-bearing dry-run phase.
///
/// The validator location is parsed out of the message itself. Returns
/// `None` when the message matches the wrapper-artifact denylist (pre and
/// post phases only).
pub fn phase_diagnostic(
    phase: QueryPhase,
    message: &str,
    kind: StatementKind,
    metadata: &BlockMetadata,
) -> Option<Diagnostic> {
    let range = match phase {
        QueryPhase::Main => {
            let location = parse_error_location(message);
            let (line, column) = remap_main(location, kind, metadata);
            let position = Position {
                line: line.saturating_sub(1),
                character: column.saturating_sub(1),
            };
            Range {
                start: position,
                end: Position {
                    line: position.line,
                    character: position.character + 1,
                },
            }
        }
        QueryPhase::PreOperations => {
            if is_suppressed(message) {
                return None;
            }
            anchor_range(metadata.pre_operations.first().map(|b| b.start_line))
        }
        QueryPhase::PostOperations => {
            if is_suppressed(message) {
                return None;
            }
            anchor_range(metadata.post_operations.first().map(|b| b.start_line))
        }
        // Assertion errors are reported document-level, never line-level.
        QueryPhase::Assertion => Range {
            start: Position::new(0, 0),
            end: Position::new(0, 0),
        },
    };

    Some(Diagnostic {
        range,
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: message.to_string(),
        ..Default::default()
    })
}

/// Fixed-width anchor on the line above a block's opener.
///
/// Only the first block of a kind is ever anchored; `start_line` is
/// 1-indexed document space, so two `- 1` steps land on the preceding
/// line in 0-indexed LSP space.
fn anchor_range(start_line: Option<u32>) -> Range {
    let document_line = start_line.unwrap_or(0).saturating_sub(1);
    let lsp_line = document_line.saturating_sub(1);
    Range {
        start: Position::new(lsp_line, 0),
        end: Position::new(lsp_line, OPERATION_ANCHOR_WIDTH),
    }
}
