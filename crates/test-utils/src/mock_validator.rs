// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scripted validator
//!
//! A [`DryRunValidator`] whose verdicts come from a prearranged queue,
//! recording every SQL string it is handed. One queue entry is consumed
//! per call; a drained queue keeps answering "ok" so tests only script
//! the calls they care about.

use std::collections::VecDeque;

use async_trait::async_trait;
use sqlform_diagnostics::{DryRunResult, DryRunValidator, ValidatorError};
use tokio::sync::Mutex;

/// Dry-run validator with scripted verdicts.
#[derive(Debug, Default)]
pub struct MockValidator {
    script: Mutex<VecDeque<DryRunResult>>,
    received: Mutex<Vec<String>>,
}

impl MockValidator {
    /// A validator that accepts everything.
    pub fn passing() -> Self {
        Self::default()
    }

    /// A validator answering with `verdicts` in order, then "ok".
    pub fn scripted(verdicts: impl IntoIterator<Item = DryRunResult>) -> Self {
        Self {
            script: Mutex::new(verdicts.into_iter().collect()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every SQL string handed to the validator so far, in call order.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl DryRunValidator for MockValidator {
    async fn dry_run(&self, sql: &str) -> Result<DryRunResult, ValidatorError> {
        self.received.lock().await.push(sql.to_string());
        let verdict = self.script.lock().await.pop_front();
        Ok(verdict.unwrap_or_else(DryRunResult::ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_verdicts_are_consumed_in_order() {
        let validator = MockValidator::scripted([
            DryRunResult::error("bad at [1:1]"),
            DryRunResult::ok(),
        ]);

        let first = validator.dry_run("SELECT 1").await.expect("mock never fails");
        assert!(first.has_error);
        let second = validator.dry_run("SELECT 2").await.expect("mock never fails");
        assert!(!second.has_error);
        // Queue drained: subsequent calls pass.
        let third = validator.dry_run("SELECT 3").await.expect("mock never fails");
        assert!(!third.has_error);

        assert_eq!(validator.received().await, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
    }
}
