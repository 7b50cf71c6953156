// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Block result types
//!
//! The scanner reports each recognized region of a document as a
//! [`BlockRange`] and collects them into a [`BlockMetadata`]. All line
//! numbers are 1-indexed, inclusive, and relative to the original document.

use serde::{Deserialize, Serialize};

/// An inclusive line range for one recognized block.
///
/// `{0, 0, false}` is the zero value for a block that never appeared.
/// When `exists` is true, `end_line >= start_line` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    /// First line of the block (1-indexed), including the opener line
    pub start_line: u32,

    /// Last line of the block (1-indexed), including the closing brace line
    pub end_line: u32,

    /// Whether the block was found and closed before end-of-document
    pub exists: bool,
}

impl BlockRange {
    /// Create a closed block range
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
            exists: true,
        }
    }

    /// Number of document lines the block spans, inclusive.
    ///
    /// Zero for an absent block.
    pub fn line_span(&self) -> u32 {
        if self.exists {
            self.end_line - self.start_line + 1
        } else {
            0
        }
    }
}

/// Scan result for one document.
///
/// Recomputed from scratch on every scan; there is no incremental state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// The `config { ... }` block, at most one
    pub config: BlockRange,

    /// The `js { ... }` scripting block, at most one
    pub js: BlockRange,

    /// `pre_operations { ... }` blocks in document order
    pub pre_operations: Vec<BlockRange>,

    /// `post_operations { ... }` blocks in document order
    pub post_operations: Vec<BlockRange>,

    /// Union of all non-blank lines outside every recognized block
    pub main_body: BlockRange,
}

impl BlockMetadata {
    /// Inclusive line span of the first pre-operations block, or zero.
    ///
    /// Only the first block ever participates in position remapping.
    pub fn first_pre_operations_span(&self) -> u32 {
        self.pre_operations
            .first()
            .map(BlockRange::line_span)
            .unwrap_or(0)
    }
}
