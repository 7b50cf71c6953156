// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Benign-message denylist
//!
//! Some validator complaints are artifacts of the dry-run wrappers, not
//! user mistakes: operation blocks are validated standalone, so a block
//! that only declares variables or sets options trips "incomplete
//! script" style errors. Diagnostics whose message matches an entry here
//! are suppressed before they reach the editor.

/// Known-benign validator message fragments, matched by substring.
const SUPPRESSED_MESSAGES: &[&str] = &[
    "DECLARE statements must be followed by an actual statement",
    "Variable declarations are allowed only at the start of a block or script",
    "Syntax error: Unexpected end of script",
];

/// Whether a validator message is a known wrapper artifact.
pub fn is_suppressed(message: &str) -> bool {
    SUPPRESSED_MESSAGES
        .iter()
        .any(|entry| message.contains(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_artifacts_are_suppressed() {
        assert!(is_suppressed(
            "Syntax error: Unexpected end of script at [3:1]"
        ));
        assert!(is_suppressed(
            "DECLARE statements must be followed by an actual statement"
        ));
    }

    #[test]
    fn genuine_errors_pass_through() {
        assert!(!is_suppressed("Unrecognized name: usre_id at [4:8]"));
        assert!(!is_suppressed(""));
    }
}
