// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the decision model.

use thiserror::Error;

/// Result type for decision-model operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when parsing decision-model values from their textual forms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
	#[error("unknown decision: {0}")]
	UnknownDecision(String),

	#[error("unknown status code: {0}")]
	UnknownStatusCode(String),
}
