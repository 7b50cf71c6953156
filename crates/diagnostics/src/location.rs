// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Validator error locations
//!
//! The dry-run validator reports positions as a `[<line>:<column>]`
//! fragment buried in a free-text message, e.g.
//!
//! ```text
//! Unrecognized name: usre_id at [4:8]
//! ```
//!
//! Both numbers are 1-indexed within the flattened validator input.
//! `{0, 0}` is the "no location" value, used when the message carries no
//! parsable fragment; parsing never fails.

use serde::{Deserialize, Serialize};

/// A position inside the flattened validator input. 1-indexed;
/// `{0, 0}` means the validator reported no usable location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

impl ErrorLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Whether the validator actually reported a position.
    pub fn is_known(&self) -> bool {
        self.line != 0 || self.column != 0
    }
}

/// Extract the first `[line:column]` fragment from a validator message.
///
/// Degrades to `{0, 0}` when no fragment matches; later fragments are
/// ignored.
pub fn parse_error_location(message: &str) -> ErrorLocation {
    for (index, _) in message.match_indices('[') {
        if let Some(location) = parse_fragment(&message[index + 1..]) {
            return location;
        }
    }
    ErrorLocation::default()
}

/// Parse `<digits>:<digits>]` at the start of `rest`.
fn parse_fragment(rest: &str) -> Option<ErrorLocation> {
    let colon = rest.find(':')?;
    let close = rest.find(']')?;
    if close < colon {
        return None;
    }
    let line: u32 = rest[..colon].parse().ok()?;
    let column: u32 = rest[colon + 1..close].parse().ok()?;
    Some(ErrorLocation::new(line, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bigquery_style_fragment() {
        let location = parse_error_location("Unrecognized name: usre_id at [4:8]");
        assert_eq!(location, ErrorLocation::new(4, 8));
        assert!(location.is_known());
    }

    #[test]
    fn missing_fragment_degrades_to_zero() {
        let location = parse_error_location("Query exceeded resource limits");
        assert_eq!(location, ErrorLocation::default());
        assert!(!location.is_known());
    }

    #[test]
    fn first_fragment_wins() {
        let location = parse_error_location("Syntax error at [2:1]; see also [9:9]");
        assert_eq!(location, ErrorLocation::new(2, 1));
    }

    #[test]
    fn non_numeric_brackets_are_skipped() {
        let location = parse_error_location("Field [name] is invalid at [3:14]");
        assert_eq!(location, ErrorLocation::new(3, 14));
    }

    #[test]
    fn unbalanced_or_malformed_fragments_degrade_to_zero() {
        assert_eq!(parse_error_location("error at [4:"), ErrorLocation::default());
        assert_eq!(parse_error_location("error at [4]"), ErrorLocation::default());
        assert_eq!(parse_error_location("error at 4:8"), ErrorLocation::default());
    }
}
