// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlform-test-utils
//!
//! Shared fixtures and mock collaborators for integration tests: canned
//! sqlform documents covering each statement kind, and a scripted
//! validator so pipeline tests never talk to a real service.

pub mod fixtures;
pub mod mock_validator;

pub use mock_validator::MockValidator;
