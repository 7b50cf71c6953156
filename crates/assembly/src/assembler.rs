// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query assembler
//!
//! Turns extracted block text into the flattened string(s) handed to the
//! dry-run validator. The assembler never reorders or rewrites block
//! text; it only concatenates it with the kind-specific wrapper template.
//!
//! Block text extraction happens upstream (see `sqlform_core::extract`);
//! this module is pure string building.

use crate::templates::{
    ASSERTION_PREFIX, ASSERTION_SEPARATOR, ASSERTION_SUFFIX, INCREMENTAL_PREFIX,
    INCREMENTAL_SUFFIX, PLAIN_PREFIX, PLAIN_SUFFIX,
};

/// Extracted block text for one document, keyed by statement kind.
///
/// Every statement kind supplies exactly one variant here and exactly one
/// offset in [`crate::offsets::offset_for`]; adding a kind without both
/// fails to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSource {
    /// Table or view: one body, optional pre-operations text
    Plain {
        pre_operations: Option<String>,
        body: String,
    },
    /// Incremental table: both build variants carry their own body and
    /// their own pre-operations text
    Incremental {
        pre_operations: Option<String>,
        incremental_pre_operations: Option<String>,
        body: String,
        incremental_body: String,
    },
    /// Assertions: every assertion body in the document, in order
    Assertion { bodies: Vec<String> },
    /// Operations file: independent statements, validated one by one
    MultiAction { actions: Vec<String> },
}

/// The flattened validator input for one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembledQuery {
    /// One string to validate
    Single(String),
    /// Both incremental build variants, validated independently
    Incremental {
        non_incremental: String,
        incremental: String,
    },
    /// One string per action, each validated independently
    Actions(Vec<String>),
}

/// Assemble the flattened validator input for a statement.
pub fn assemble(source: &StatementSource) -> AssembledQuery {
    match source {
        StatementSource::Plain {
            pre_operations,
            body,
        } => AssembledQuery::Single(prepend_operations(
            pre_operations,
            format!("{PLAIN_PREFIX}{body}{PLAIN_SUFFIX}"),
        )),
        StatementSource::Incremental {
            pre_operations,
            incremental_pre_operations,
            body,
            incremental_body,
        } => AssembledQuery::Incremental {
            non_incremental: prepend_operations(
                pre_operations,
                format!("{INCREMENTAL_PREFIX}{body}{INCREMENTAL_SUFFIX}"),
            ),
            // The incremental variant is the user's own MERGE/INSERT
            // statement and runs unwrapped.
            incremental: prepend_operations(
                incremental_pre_operations,
                incremental_body.clone(),
            ),
        },
        StatementSource::Assertion { bodies } => AssembledQuery::Single(format!(
            "{ASSERTION_PREFIX}{}{ASSERTION_SUFFIX}",
            bodies.join(ASSERTION_SEPARATOR)
        )),
        StatementSource::MultiAction { actions } => AssembledQuery::Actions(actions.clone()),
    }
}

/// Prepend pre-operations text ahead of an assembled query, if present.
fn prepend_operations(operations: &Option<String>, query: String) -> String {
    match operations {
        Some(text) if !text.is_empty() => format!("{text}\n{query}"),
        _ => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::offset_for;
    use sqlform_core::StatementKind;

    #[test]
    fn plain_statement_is_pre_then_wrapper_then_body() {
        let source = StatementSource::Plain {
            pre_operations: Some("DECLARE x INT64;".to_string()),
            body: "SELECT x".to_string(),
        };
        let AssembledQuery::Single(sql) = assemble(&source) else {
            panic!("plain statements assemble to a single query");
        };
        assert!(sql.starts_with("DECLARE x INT64;\n"));
        assert!(sql.contains(PLAIN_PREFIX));
        assert!(sql.ends_with("SELECT x\n)"));
        // Pre-operations text always precedes the wrapper.
        assert!(sql.find("DECLARE").unwrap() < sql.find("CREATE").unwrap());
    }

    #[test]
    fn plain_statement_without_pre_operations() {
        let source = StatementSource::Plain {
            pre_operations: None,
            body: "SELECT 1".to_string(),
        };
        let AssembledQuery::Single(sql) = assemble(&source) else {
            panic!("plain statements assemble to a single query");
        };
        assert_eq!(sql, format!("{PLAIN_PREFIX}SELECT 1{PLAIN_SUFFIX}"));
    }

    #[test]
    fn user_sql_starts_after_exactly_offset_lines() {
        let source = StatementSource::Plain {
            pre_operations: None,
            body: "SELECT 1".to_string(),
        };
        let AssembledQuery::Single(sql) = assemble(&source) else {
            panic!("plain statements assemble to a single query");
        };
        let offset = offset_for(StatementKind::Plain) as usize;
        assert_eq!(sql.lines().nth(offset), Some("SELECT 1"));
    }

    #[test]
    fn incremental_statement_builds_both_variants() {
        let source = StatementSource::Incremental {
            pre_operations: Some("DECLARE d DATE;".to_string()),
            incremental_pre_operations: Some("DECLARE latest DATE;".to_string()),
            body: "SELECT * FROM events".to_string(),
            incremental_body: "SELECT * FROM events WHERE date > latest".to_string(),
        };
        let AssembledQuery::Incremental {
            non_incremental,
            incremental,
        } = assemble(&source)
        else {
            panic!("incremental statements assemble to two variants");
        };
        assert!(non_incremental.contains(INCREMENTAL_PREFIX));
        assert!(non_incremental.starts_with("DECLARE d DATE;\n"));
        // The incremental variant runs unwrapped, with its own pre text.
        assert_eq!(
            incremental,
            "DECLARE latest DATE;\nSELECT * FROM events WHERE date > latest"
        );
    }

    #[test]
    fn assertion_bodies_join_with_the_marker_comment() {
        let source = StatementSource::Assertion {
            bodies: vec![
                "SELECT id FROM t WHERE id IS NULL".to_string(),
                "SELECT id FROM t GROUP BY id HAVING COUNT(*) > 1".to_string(),
            ],
        };
        let AssembledQuery::Single(sql) = assemble(&source) else {
            panic!("assertions assemble to a single harnessed query");
        };
        assert!(sql.starts_with(ASSERTION_PREFIX));
        assert!(sql.contains("-- assertion boundary"));
        let first = sql.find("id IS NULL").unwrap();
        let marker = sql.find("-- assertion boundary").unwrap();
        let second = sql.find("HAVING COUNT").unwrap();
        assert!(first < marker && marker < second);
    }

    #[test]
    fn multi_action_statements_stay_independent() {
        let actions = vec![
            "GRANT SELECT ON dataset TO GROUP analysts".to_string(),
            "DROP TABLE IF EXISTS scratch.tmp".to_string(),
        ];
        let source = StatementSource::MultiAction {
            actions: actions.clone(),
        };
        assert_eq!(assemble(&source), AssembledQuery::Actions(actions));
    }
}
