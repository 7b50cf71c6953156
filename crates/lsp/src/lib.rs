// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlform-lsp
//!
//! Language server for sqlform templated-SQL documents.
//!
//! ## Overview
//!
//! The server validates `.sqlx`-style documents against an external
//! dry-run service and reports the failures as editor diagnostics at
//! their original document positions:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP protocol
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │        LSP backend (tower-lsp)          │
//! │  did_open / did_change / did_save       │
//! └──────┬───────────┬───────────┬──────────┘
//!        ↓           ↓           ↓
//! ┌──────────┐ ┌──────────┐ ┌──────────────┐
//! │ Document │ │ Compile  │ │  Validation  │
//! │  Store   │ │  Cache   │ │   Pipeline   │
//! └──────────┘ └──────────┘ └──────┬───────┘
//!                                  ↓
//!                        external dry-run command
//! ```
//!
//! The interesting work (block scanning, query assembly, position
//! remapping) lives in `sqlform-core`, `sqlform-assembly` and
//! `sqlform-diagnostics`; this crate is the glue and the protocol
//! surface.
//!
//! ## Error handling
//!
//! The server degrades gracefully: malformed documents compile to
//! best-effort statements, validator transport failures are logged and
//! leave the previous diagnostics in place, and missing configuration
//! skips validation with a client-visible warning.

pub mod backend;
pub mod cache;
pub mod config;
pub mod document;
pub mod pipeline;
pub mod validator;

// Re-exports for convenience
pub use backend::{LspBackend, LspError};
pub use cache::CompileCache;
pub use config::{ConfigError, EngineConfig};
pub use document::{Document, DocumentError, DocumentStore};
pub use pipeline::{CompiledStatement, compile_document, validate_compiled, validate_source};
pub use validator::CommandValidator;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "sqlform-lsp";
