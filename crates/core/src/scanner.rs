// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Block scanner
//!
//! Single-pass scanner that partitions a document into its named blocks and
//! the main SQL body.
//!
//! ## Overview
//!
//! The scanner is a small state machine: it tracks which block (if any) is
//! currently open and a running brace counter scoped to that block. Block
//! openers are only recognized while no block is open, so text inside a
//! block can never start a new one. Everything outside a block that is not
//! blank belongs to the main body.
//!
//! The scanner is total: malformed input yields partial or empty metadata,
//! never an error. A block opened but not closed by end-of-document is
//! silently dropped rather than reported as a partial range.
//!
//! ## Known limitation
//!
//! Brace counting is a plain character scan with no awareness of string or
//! comment literals. A `{` inside a quoted string desynchronizes the
//! counter. This matches the behavior existing documents rely on; see
//! DESIGN.md before changing it.

use crate::block::{BlockMetadata, BlockRange};

/// Block opener tokens, matched against the trimmed start of a line.
const CONFIG_OPENER: &str = "config {";
const JS_OPENER: &str = "js {";
const PRE_OPERATIONS_OPENER: &str = "pre_operations {";
const POST_OPERATIONS_OPENER: &str = "post_operations {";

/// Which block the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveBlock {
    None,
    Config,
    Js,
    PreOperations,
    PostOperations,
}

/// Net `{`/`}` delta of a single line.
fn brace_delta(line: &str) -> i64 {
    let mut delta = 0i64;
    for ch in line.chars() {
        match ch {
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}

/// Match a trimmed line against the block opener tokens.
fn opener_for(trimmed: &str) -> Option<ActiveBlock> {
    if trimmed.starts_with(CONFIG_OPENER) {
        Some(ActiveBlock::Config)
    } else if trimmed.starts_with(JS_OPENER) {
        Some(ActiveBlock::Js)
    } else if trimmed.starts_with(PRE_OPERATIONS_OPENER) {
        Some(ActiveBlock::PreOperations)
    } else if trimmed.starts_with(POST_OPERATIONS_OPENER) {
        Some(ActiveBlock::PostOperations)
    } else {
        None
    }
}

/// Scan a document given as a sequence of lines.
///
/// Lines are consumed 0-indexed; every reported range is 1-indexed. The
/// scan is deterministic and side-effect free, so rescanning identical
/// input always yields identical metadata.
pub fn scan_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> BlockMetadata {
    let mut meta = BlockMetadata::default();
    let mut active = ActiveBlock::None;
    let mut depth = 0i64;
    let mut block_start = 0u32;

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index as u32 + 1;
        let delta = brace_delta(line);

        if active == ActiveBlock::None {
            let trimmed = line.trim_start();
            if let Some(kind) = opener_for(trimmed) {
                if delta <= 0 {
                    // Opener and closer on the same line: single-line block.
                    record_block(&mut meta, kind, BlockRange::new(line_number, line_number));
                } else {
                    active = kind;
                    depth = delta;
                    block_start = line_number;
                }
            } else if !line.trim().is_empty() {
                if !meta.main_body.exists {
                    meta.main_body.start_line = line_number;
                    meta.main_body.exists = true;
                }
                meta.main_body.end_line = line_number;
            }
            // Blank lines outside blocks are skipped entirely.
        } else {
            depth += delta;
            if depth <= 0 {
                record_block(&mut meta, active, BlockRange::new(block_start, line_number));
                active = ActiveBlock::None;
                depth = 0;
            }
        }
    }

    // A block still open at end-of-document is dropped: the scanner never
    // retroactively closes a block from file truncation.
    meta
}

/// Scan a document given as a single source string.
pub fn scan_source(source: &str) -> BlockMetadata {
    scan_lines(source.lines())
}

fn record_block(meta: &mut BlockMetadata, kind: ActiveBlock, range: BlockRange) {
    match kind {
        ActiveBlock::Config => meta.config = range,
        ActiveBlock::Js => meta.js = range,
        ActiveBlock::PreOperations => meta.pre_operations.push(range),
        ActiveBlock::PostOperations => meta.post_operations.push(range),
        ActiveBlock::None => unreachable!("no block to record"),
    }
}
