// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dry-run validator interface
//!
//! The external validation service is only ever seen through this trait:
//! one SQL string in, one verdict out. The verdict's position, when the
//! service has one, travels inside the message text as a `[line:column]`
//! fragment (see [`crate::location`]); it is never transported as a
//! separate field.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verdict of one dry-run call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunResult {
    /// Whether the validator rejected the query
    pub has_error: bool,

    /// Free-text validator message, empty on success
    #[serde(default)]
    pub message: String,
}

impl DryRunResult {
    /// A passing verdict.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A failing verdict with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            has_error: true,
            message: message.into(),
        }
    }
}

/// Errors reaching or understanding the validation service.
///
/// These are transport failures, not SQL problems: an SQL problem is a
/// successful dry-run with `has_error = true`.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The validator process or connection could not be established
    #[error("failed to launch validator: {0}")]
    Launch(#[source] std::io::Error),

    /// I/O towards the validator failed mid-flight
    #[error("validator I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The validator replied with something that is not a verdict
    #[error("unparsable validator reply: {0}")]
    MalformedReply(#[from] serde_json::Error),

    /// The validator exited abnormally
    #[error("validator exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },
}

/// A dry-run validation service.
#[async_trait]
pub trait DryRunValidator: Send + Sync {
    /// Validate one flattened SQL string without executing it.
    async fn dry_run(&self, sql: &str) -> Result<DryRunResult, ValidatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts_deserialize_from_camel_case() {
        let result: DryRunResult =
            serde_json::from_str(r#"{"hasError": true, "message": "bad at [1:2]"}"#)
                .expect("well-formed verdict");
        assert!(result.has_error);
        assert_eq!(result.message, "bad at [1:2]");
    }

    #[test]
    fn message_defaults_to_empty() {
        let result: DryRunResult =
            serde_json::from_str(r#"{"hasError": false}"#).expect("well-formed verdict");
        assert!(!result.has_error);
        assert!(result.message.is_empty());
    }
}
