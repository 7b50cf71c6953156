// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlform-core
//!
//! Block-structure model for templated-SQL (`.sqlx`-style) documents.
//!
//! ## Overview
//!
//! A sqlform document mixes a configuration block, an optional scripting
//! block, repeatable pre/post operation blocks, and a main SQL body in a
//! single file:
//!
//! ```text
//! config {
//!   type: "table"
//! }
//!
//! pre_operations {
//!   DECLARE run_date DATE DEFAULT CURRENT_DATE();
//! }
//!
//! SELECT * FROM source_table WHERE date = run_date
//! ```
//!
//! This crate locates those regions without parsing any SQL: the scanner
//! recognizes block keywords and balances braces, nothing more. The
//! resulting [`BlockMetadata`] drives query assembly and error-position
//! remapping in the sibling crates.
//!
//! ## Modules
//!
//! - [`block`]: `BlockRange` / `BlockMetadata` result types
//! - [`scanner`]: the single-pass block scanner
//! - [`statement`]: the closed set of statement kinds
//! - [`extract`]: block text extraction helpers

pub mod block;
pub mod extract;
pub mod scanner;
pub mod statement;

pub use block::{BlockMetadata, BlockRange};
pub use extract::{block_inner, block_lines, body_text};
pub use scanner::{scan_lines, scan_source};
pub use statement::StatementKind;
