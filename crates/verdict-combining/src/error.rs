// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Construction-time errors for combining algorithms.
//!
//! Nothing here is raised while evaluating a request: per-request failures are
//! Indeterminate [`verdict_core::DecisionResult`]s. These errors fail policy loading.

use thiserror::Error;

use crate::decidable::CombinedElementType;

/// Result type for combining-algorithm construction and registry operations.
pub type Result<T> = std::result::Result<T, CombiningError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CombiningError {
	#[error("unknown combining algorithm: {id}")]
	UnknownAlgorithm { id: String },

	#[error("legacy combining algorithm is not supported: {id}")]
	UnsupportedLegacyAlgorithm { id: String },

	#[error("combining algorithm {id} combines {expected} elements, got {actual} elements")]
	ElementTypeMismatch {
		id: String,
		expected: CombinedElementType,
		actual: CombinedElementType,
	},

	#[error("standard combining algorithm registry is immutable, cannot add {id}")]
	RegistryImmutable { id: String },

	#[error("combining algorithm already registered: {id}")]
	DuplicateAlgorithm { id: String },

	#[error("invalid parameter for combining algorithm {id}: {message}")]
	InvalidParameter { id: String, message: String },
}
