// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Engine configuration
//!
//! Settings for the validation engine: which external dry-run command to
//! call, which incremental build variant to validate, and when to run.
//! Settings arrive from the LSP client as a JSON payload under the
//! `"sqlform"` key; until they do, a runtime fallback applies.

use serde_json::Value;
use sqlform_assembly::ExecutionMode;

/// Main engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Which incremental build variant the validator sees
    pub execution_mode: ExecutionMode,

    /// External dry-run command (reads SQL on stdin, replies with a JSON
    /// verdict on stdout)
    pub validator_command: String,

    /// Extra arguments for the dry-run command
    pub validator_args: Vec<String>,

    /// Whether documents are validated on save
    pub validate_on_save: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Full,
            validator_command: String::new(),
            validator_args: Vec::new(),
            validate_on_save: true,
        }
    }
}

impl EngineConfig {
    /// Parse engine config from the LSP client settings payload.
    ///
    /// Expected shape:
    /// {
    ///   "sqlform": {
    ///     "executionMode": "full" | "incremental",
    ///     "validatorCommand": "...",
    ///     "validatorArgs": ["..."],
    ///     "validateOnSave": true
    ///   }
    /// }
    pub fn from_lsp_settings(settings: &Value) -> Option<Self> {
        let section = settings.get("sqlform")?;

        let execution_mode = match section.get("executionMode").and_then(Value::as_str) {
            Some("incremental") => ExecutionMode::Incremental,
            _ => ExecutionMode::Full,
        };

        let validator_command = section.get("validatorCommand")?.as_str()?.to_string();

        let validator_args = section
            .get("validatorArgs")
            .and_then(Value::as_array)
            .map(|args| {
                args.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let validate_on_save = section
            .get("validateOnSave")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Some(Self {
            execution_mode,
            validator_command,
            validator_args,
            validate_on_save,
        })
    }

    /// Default config used when client settings have not arrived yet.
    pub fn default_runtime_fallback() -> Self {
        let validator_command =
            std::env::var("SQLFORM_VALIDATOR").unwrap_or_else(|_| "sqlform-dry-run".to_string());
        Self {
            validator_command,
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validator_command.is_empty() {
            return Err(ConfigError::MissingValidatorCommand);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No dry-run command is configured
    #[error("validator command is required")]
    MissingValidatorCommand,
}
