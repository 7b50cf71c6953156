// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Command validator
//!
//! Concrete [`DryRunValidator`] that shells out to a configured CLI: the
//! flattened SQL goes to the child's stdin, the child replies with a JSON
//! verdict (`{"hasError": bool, "message": string}`) on stdout. Transport
//! failures surface as [`ValidatorError`]; the caller decides whether to
//! degrade or report.

use std::process::Stdio;

use async_trait::async_trait;
use sqlform_diagnostics::{DryRunResult, DryRunValidator, ValidatorError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::EngineConfig;

/// Dry-run validator backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    program: String,
    args: Vec<String>,
}

impl CommandValidator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build a validator from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.validator_command.clone(),
            config.validator_args.clone(),
        )
    }
}

#[async_trait]
impl DryRunValidator for CommandValidator {
    async fn dry_run(&self, sql: &str) -> Result<DryRunResult, ValidatorError> {
        debug!(program = %self.program, bytes = sql.len(), "spawning dry-run validator");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(ValidatorError::Launch)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(sql.as_bytes()).await?;
            // Dropping stdin closes the pipe so the child sees EOF.
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ValidatorError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let verdict: DryRunResult = serde_json::from_slice(&output.stdout)?;
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let validator = CommandValidator::new("sqlform-validator-that-does-not-exist", vec![]);
        let error = validator
            .dry_run("SELECT 1")
            .await
            .expect_err("program does not exist");
        assert!(matches!(error, ValidatorError::Launch(_)));
    }
}
