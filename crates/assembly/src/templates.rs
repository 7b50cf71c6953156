// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Wrapper templates
//!
//! The literal SQL text the assembler wraps around user statements before
//! handing them to the dry-run validator. The number of lines each prefix
//! contributes is load-bearing: the remapper subtracts exactly that many
//! lines when translating validator positions back into the document, and
//! [`crate::offsets::offset_for`] derives its value by counting `\n` in
//! these constants. Tests pin the counts; change a prefix and the pinned
//! test will tell you.

/// Prefix for plain table/view statements. Two synthetic lines.
pub const PLAIN_PREFIX: &str = "CREATE OR REPLACE TABLE `sqlform_dry_run._validation` AS\n(\n";

/// Suffix closing the plain wrapper.
pub const PLAIN_SUFFIX: &str = "\n)";

/// Prefix for the non-incremental variant of incremental statements.
/// One synthetic line.
pub const INCREMENTAL_PREFIX: &str = "CREATE TEMP TABLE `sqlform_dry_run._increment` AS (\n";

/// Suffix closing the incremental wrapper.
pub const INCREMENTAL_SUFFIX: &str = "\n)";

/// Prefix of the assertion harness. Four synthetic lines.
pub const ASSERTION_PREFIX: &str =
    "CREATE OR REPLACE VIEW `sqlform_dry_run._assertion` AS\n(\nWITH failing_rows AS (\nSELECT * FROM (\n";

/// Suffix closing the assertion harness.
pub const ASSERTION_SUFFIX: &str = "\n)\n)\n)";

/// Separator between independent assertion bodies: a blank line plus a
/// position marker so validator output stays attributable by eye.
pub const ASSERTION_SEPARATOR: &str = "\n\n-- assertion boundary\n";

/// Number of synthetic lines a prefix contributes before user SQL.
pub fn prefix_line_count(prefix: &str) -> u32 {
    prefix.matches('\n').count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    // These counts are the contract between the assembler and the
    // remapper. If one of them fails, a template was edited without
    // thinking about diagnostic placement.
    #[test]
    fn prefix_line_counts_are_pinned() {
        assert_eq!(prefix_line_count(PLAIN_PREFIX), 2);
        assert_eq!(prefix_line_count(ASSERTION_PREFIX), 4);
        assert_eq!(prefix_line_count(INCREMENTAL_PREFIX), 1);
    }
}
