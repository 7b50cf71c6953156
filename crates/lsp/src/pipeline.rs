// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Validation pipeline
//!
//! Wires the pure pieces together for one document round:
//!
//! ```text
//! document text → scan → extract → assemble → dry-run → remap → Vec<Diagnostic>
//! ```
//!
//! Each round produces the complete diagnostic set for the document; the
//! backend publishes it atomically, replacing whatever was shown before.
//! Nothing here is incremental and nothing is retained between rounds
//! (the [`crate::cache`] keyed by document version sits in front of
//! `compile_document`, not inside it).

use sqlform_assembly::{AssembledQuery, ExecutionMode, StatementSource, assemble};
use sqlform_core::{BlockMetadata, StatementKind, block_inner, body_text, scan_lines};
use sqlform_diagnostics::{DryRunValidator, QueryPhase, ValidatorError, phase_diagnostic};
use tower_lsp::lsp_types::Diagnostic;
use tracing::debug;

/// Everything derived from one document snapshot, scan included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStatement {
    /// Block structure of the document
    pub metadata: BlockMetadata,

    /// Statement kind declared by the config block
    pub kind: StatementKind,

    /// Extracted block text, ready for assembly
    pub source: StatementSource,

    /// Inner text of all pre-operations blocks, for the standalone
    /// pre-phase dry-run
    pub pre_operations_text: Option<String>,

    /// Inner text of all post-operations blocks, for the standalone
    /// post-phase dry-run
    pub post_operations_text: Option<String>,
}

/// Scan a document snapshot and extract everything assembly needs.
///
/// Total like the scanner itself: malformed documents compile to a
/// best-effort statement, never an error.
pub fn compile_document(text: &str) -> CompiledStatement {
    let lines: Vec<&str> = text.lines().collect();
    let metadata = scan_lines(lines.iter().copied());

    let config_text = block_inner(&lines, &metadata.config);
    let kind = StatementKind::from_config_text(&config_text);

    let pre_operations_text = joined_inner(&lines, &metadata.pre_operations);
    let post_operations_text = joined_inner(&lines, &metadata.post_operations);
    let body = body_text(&lines, &metadata.main_body);

    let source = match kind {
        StatementKind::Plain => StatementSource::Plain {
            pre_operations: pre_operations_text.clone(),
            body,
        },
        // Both build variants share the document's body and
        // pre-operations text; they differ in wrapping only.
        StatementKind::Incremental => StatementSource::Incremental {
            pre_operations: pre_operations_text.clone(),
            incremental_pre_operations: pre_operations_text.clone(),
            body: body.clone(),
            incremental_body: body,
        },
        StatementKind::Assertion => StatementSource::Assertion { bodies: vec![body] },
        StatementKind::MultiAction => StatementSource::MultiAction {
            actions: split_actions(&body),
        },
    };

    CompiledStatement {
        metadata,
        kind,
        source,
        pre_operations_text,
        post_operations_text,
    }
}

/// Dry-run every phase of a compiled statement and remap the failures.
///
/// Returns the full diagnostic set for the document. A transport error
/// towards the validator aborts the round; SQL problems do not.
pub async fn validate_compiled(
    validator: &dyn DryRunValidator,
    mode: ExecutionMode,
    compiled: &CompiledStatement,
) -> Result<Vec<Diagnostic>, ValidatorError> {
    let mut diagnostics = Vec::new();

    match assemble(&compiled.source) {
        AssembledQuery::Single(sql) => {
            let phase = match compiled.kind {
                StatementKind::Assertion => QueryPhase::Assertion,
                _ => QueryPhase::Main,
            };
            run_phase(validator, phase, &sql, compiled, &mut diagnostics).await?;
        }
        AssembledQuery::Incremental {
            non_incremental,
            incremental,
        } => {
            // Both build variants are dry-run, but only the one the
            // execution mode selects feeds diagnostics; its line numbers
            // are the ones the offsets describe.
            let (selected, other) = match mode {
                ExecutionMode::Full => (non_incremental, incremental),
                ExecutionMode::Incremental => (incremental, non_incremental),
            };
            run_phase(
                validator,
                QueryPhase::Main,
                &selected,
                compiled,
                &mut diagnostics,
            )
            .await?;
            let unselected = validator.dry_run(&other).await?;
            if unselected.has_error {
                debug!(
                    message = %unselected.message,
                    "unselected incremental variant failed dry-run"
                );
            }
        }
        AssembledQuery::Actions(actions) => {
            for sql in &actions {
                run_phase(validator, QueryPhase::Main, sql, compiled, &mut diagnostics).await?;
            }
        }
    }

    if let Some(pre) = &compiled.pre_operations_text {
        run_phase(
            validator,
            QueryPhase::PreOperations,
            pre,
            compiled,
            &mut diagnostics,
        )
        .await?;
    }
    if let Some(post) = &compiled.post_operations_text {
        run_phase(
            validator,
            QueryPhase::PostOperations,
            post,
            compiled,
            &mut diagnostics,
        )
        .await?;
    }

    debug!(
        count = diagnostics.len(),
        kind = ?compiled.kind,
        "validation round complete"
    );
    Ok(diagnostics)
}

/// Convenience wrapper: compile a snapshot and validate it.
pub async fn validate_source(
    validator: &dyn DryRunValidator,
    mode: ExecutionMode,
    text: &str,
) -> Result<Vec<Diagnostic>, ValidatorError> {
    let compiled = compile_document(text);
    validate_compiled(validator, mode, &compiled).await
}

async fn run_phase(
    validator: &dyn DryRunValidator,
    phase: QueryPhase,
    sql: &str,
    compiled: &CompiledStatement,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ValidatorError> {
    let verdict = validator.dry_run(sql).await?;
    if !verdict.has_error {
        return Ok(());
    }
    if let Some(diagnostic) =
        phase_diagnostic(phase, &verdict.message, compiled.kind, &compiled.metadata)
    {
        diagnostics.push(diagnostic);
    }
    Ok(())
}

/// Inner text of a block list, joined in document order. `None` when the
/// list is empty or all blocks are blank.
fn joined_inner(lines: &[&str], blocks: &[sqlform_core::BlockRange]) -> Option<String> {
    let parts: Vec<String> = blocks
        .iter()
        .map(|block| block_inner(lines, block))
        .filter(|inner| !inner.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Split an operations body into independent statements.
fn split_actions(body: &str) -> Vec<String> {
    body.split(';')
        .map(str::trim)
        .filter(|action| !action.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlform_core::BlockRange;

    #[test]
    fn plain_document_compiles_to_a_plain_source() {
        let compiled = compile_document(
            "config { type: \"table\" }\npre_operations { DECLARE x INT64; }\nSELECT x\n",
        );
        assert_eq!(compiled.kind, StatementKind::Plain);
        assert_eq!(compiled.metadata.config, BlockRange::new(1, 1));
        assert_eq!(compiled.metadata.pre_operations, vec![BlockRange::new(2, 2)]);
        assert_eq!(compiled.metadata.main_body, BlockRange::new(3, 3));
        assert_eq!(
            compiled.source,
            StatementSource::Plain {
                pre_operations: Some("DECLARE x INT64;".to_string()),
                body: "SELECT x".to_string(),
            }
        );
        assert_eq!(compiled.post_operations_text, None);
    }

    #[test]
    fn multiple_operation_blocks_join_in_document_order() {
        let compiled = compile_document(
            "pre_operations { DECLARE a INT64; }\npre_operations { DECLARE b INT64; }\nSELECT a\n",
        );
        assert_eq!(
            compiled.pre_operations_text.as_deref(),
            Some("DECLARE a INT64;\nDECLARE b INT64;")
        );
    }

    #[test]
    fn operations_document_splits_into_actions() {
        let compiled = compile_document(
            "config { type: \"operations\" }\nDROP TABLE a;\nCREATE TABLE a AS SELECT 1;\n",
        );
        assert_eq!(compiled.kind, StatementKind::MultiAction);
        assert_eq!(
            compiled.source,
            StatementSource::MultiAction {
                actions: vec![
                    "DROP TABLE a".to_string(),
                    "CREATE TABLE a AS SELECT 1".to_string(),
                ],
            }
        );
    }

    #[test]
    fn compiling_is_deterministic() {
        let text = "config { type: \"incremental\" }\nSELECT 1\n";
        assert_eq!(compile_document(text), compile_document(text));
    }
}
