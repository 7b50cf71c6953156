// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement kinds
//!
//! The closed set of artifact kinds a document can compile to. The kind
//! decides which wrapper template the assembler applies and which line
//! offset the remapper subtracts, so every kind must be handled in both
//! places; `match` dispatch keeps that exhaustive.

use serde::{Deserialize, Serialize};

/// The kind of statement a document compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Table or view with a single emitted object
    Plain,
    /// Table with a non-incremental and an incremental build variant
    Incremental,
    /// Data-quality assertion
    Assertion,
    /// Sequence of independent statements with no single target object
    MultiAction,
}

impl StatementKind {
    /// Derive the statement kind from the raw text of the config block.
    ///
    /// Looks for the `type:` property the way documents declare it, e.g.
    /// `type: "incremental"`. Unknown or missing types fall back to
    /// [`StatementKind::Plain`], matching a config-less document that is
    /// just a SELECT.
    pub fn from_config_text(config_text: &str) -> Self {
        match config_type_value(config_text) {
            Some("incremental") => StatementKind::Incremental,
            Some("assertion") => StatementKind::Assertion,
            Some("operations") => StatementKind::MultiAction,
            // "table" and "view" both emit a single plain object.
            _ => StatementKind::Plain,
        }
    }
}

/// Extract the quoted value of the first `type:` property, if any.
fn config_type_value(config_text: &str) -> Option<&str> {
    let after_key = match config_text.find("type:") {
        Some(pos) => &config_text[pos + "type:".len()..],
        None => return None,
    };
    let open_quote = after_key.find(['"', '\''])?;
    let rest = &after_key[open_quote + 1..];
    let close_quote = rest.find(['"', '\''])?;
    Some(&rest[..close_quote])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_and_view_are_plain() {
        assert_eq!(
            StatementKind::from_config_text("type: \"table\""),
            StatementKind::Plain
        );
        assert_eq!(
            StatementKind::from_config_text("type: \"view\""),
            StatementKind::Plain
        );
    }

    #[test]
    fn incremental_assertion_and_operations_are_recognized() {
        assert_eq!(
            StatementKind::from_config_text("type: \"incremental\",\nuniqueKey: [\"id\"]"),
            StatementKind::Incremental
        );
        assert_eq!(
            StatementKind::from_config_text("type: 'assertion'"),
            StatementKind::Assertion
        );
        assert_eq!(
            StatementKind::from_config_text("type: \"operations\""),
            StatementKind::MultiAction
        );
    }

    #[test]
    fn missing_or_unknown_type_falls_back_to_plain() {
        assert_eq!(
            StatementKind::from_config_text("schema: \"analytics\""),
            StatementKind::Plain
        );
        assert_eq!(
            StatementKind::from_config_text("type: \"mystery\""),
            StatementKind::Plain
        );
        assert_eq!(StatementKind::from_config_text(""), StatementKind::Plain);
    }
}
