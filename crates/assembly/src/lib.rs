// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlform-assembly
//!
//! Builds the flattened SQL string handed to the external dry-run
//! validator, and knows how many synthetic wrapper lines each statement
//! kind prepends before the user's own SQL.
//!
//! ## Overview
//!
//! ```text
//! BlockMetadata + block text
//!         ↓
//!   StatementSource ── assemble ──→ AssembledQuery ──→ dry-run validator
//!                                        │
//!                    offset_for(kind) ───┘ (consumed by the remapper)
//! ```
//!
//! The assembler performs literal string concatenation per kind-specific
//! template and nothing else. Offsets are computed from the template
//! constants themselves, so a template edit can never silently desync the
//! offset table.

pub mod assembler;
pub mod offsets;
pub mod templates;

pub use assembler::{AssembledQuery, StatementSource, assemble};
pub use offsets::{ExecutionMode, offset_for};
