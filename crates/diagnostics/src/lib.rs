// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlform-diagnostics
//!
//! Translates dry-run validator errors back into document positions and
//! builds the LSP diagnostics the editor displays.
//!
//! ## Coordinate spaces
//!
//! Three coordinate spaces are in play and must never be mixed up:
//!
//! 1. **Validator space**: line/column inside the flattened query string,
//!    1-indexed, reported inside free-text messages as `[line:column]`.
//! 2. **Document space**: line/column in the original multi-block
//!    document, 1-indexed, as produced by the scanner.
//! 3. **LSP space**: 0-indexed positions in the published diagnostics.
//!
//! [`location`] parses validator space out of messages, [`remap`]
//! converts validator space to document space using the block metadata
//! and the wrapper offsets, and conversion to LSP space happens exactly
//! once, at the diagnostic boundary.

pub mod denylist;
pub mod location;
pub mod remap;
pub mod validator;

pub use denylist::is_suppressed;
pub use location::{ErrorLocation, parse_error_location};
pub use remap::{QueryPhase, phase_diagnostic, remap_main};
pub use validator::{DryRunResult, DryRunValidator, ValidatorError};
