// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Block text extraction
//!
//! Helpers that turn a [`BlockRange`] back into document text. Extraction
//! is deliberately dumb: the scanner owns all structural knowledge, these
//! functions just slice lines.

use crate::block::BlockRange;

/// The lines a block covers, opener and closer included.
///
/// Returns an empty slice for an absent block or a range that falls
/// outside the document.
pub fn block_lines<'a, 'b>(lines: &'b [&'a str], range: &BlockRange) -> &'b [&'a str] {
    if !range.exists || range.start_line == 0 {
        return &[];
    }
    let start = (range.start_line - 1) as usize;
    let end = range.end_line as usize;
    if start >= lines.len() {
        return &[];
    }
    &lines[start..end.min(lines.len())]
}

/// The text inside a block's braces.
///
/// Strips the opener keyword up to and including the first `{` and the
/// final `}`. The interior is returned verbatim, one line per source line.
pub fn block_inner(lines: &[&str], range: &BlockRange) -> String {
    let covered = block_lines(lines, range);
    if covered.is_empty() {
        return String::new();
    }

    let joined = covered.join("\n");
    let after_open = match joined.find('{') {
        Some(pos) => &joined[pos + 1..],
        None => return String::new(),
    };
    let inner = match after_open.rfind('}') {
        Some(pos) => &after_open[..pos],
        None => after_open,
    };
    inner.trim().to_string()
}

/// The main-body text: every line in the range, joined verbatim.
pub fn body_text(lines: &[&str], range: &BlockRange) -> String {
    block_lines(lines, range).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_source;

    #[test]
    fn inner_text_of_a_multi_line_block() {
        let source = "pre_operations {\n  DECLARE x INT64;\n  SET x = 1;\n}\nSELECT x\n";
        let lines: Vec<&str> = source.lines().collect();
        let meta = scan_source(source);
        let inner = block_inner(&lines, &meta.pre_operations[0]);
        assert_eq!(inner, "DECLARE x INT64;\n  SET x = 1;");
    }

    #[test]
    fn inner_text_of_a_single_line_block() {
        let source = "config { type: \"table\" }\nSELECT 1\n";
        let lines: Vec<&str> = source.lines().collect();
        let meta = scan_source(source);
        assert_eq!(block_inner(&lines, &meta.config), "type: \"table\"");
    }

    #[test]
    fn absent_block_extracts_nothing() {
        let lines = vec!["SELECT 1"];
        assert_eq!(block_inner(&lines, &BlockRange::default()), "");
        assert!(block_lines(&lines, &BlockRange::default()).is_empty());
    }

    #[test]
    fn out_of_range_block_extracts_nothing() {
        let lines = vec!["SELECT 1"];
        assert!(block_lines(&lines, &BlockRange::new(5, 9)).is_empty());
    }

    #[test]
    fn body_text_joins_the_range() {
        let source = "config { type: \"table\" }\nSELECT 1\nFROM t\n";
        let lines: Vec<&str> = source.lines().collect();
        let meta = scan_source(source);
        assert_eq!(body_text(&lines, &meta.main_body), "SELECT 1\nFROM t");
    }
}
