// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Status attached to Indeterminate results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// XACML status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
	Ok,
	MissingAttribute,
	SyntaxError,
	ProcessingError,
}

impl StatusCode {
	pub const OK_URI: &'static str = "urn:oasis:names:tc:xacml:1.0:status:ok";
	pub const MISSING_ATTRIBUTE_URI: &'static str =
		"urn:oasis:names:tc:xacml:1.0:status:missing-attribute";
	pub const SYNTAX_ERROR_URI: &'static str = "urn:oasis:names:tc:xacml:1.0:status:syntax-error";
	pub const PROCESSING_ERROR_URI: &'static str =
		"urn:oasis:names:tc:xacml:1.0:status:processing-error";

	pub fn uri(&self) -> &'static str {
		match self {
			StatusCode::Ok => Self::OK_URI,
			StatusCode::MissingAttribute => Self::MISSING_ATTRIBUTE_URI,
			StatusCode::SyntaxError => Self::SYNTAX_ERROR_URI,
			StatusCode::ProcessingError => Self::PROCESSING_ERROR_URI,
		}
	}
}

impl fmt::Display for StatusCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.uri())
	}
}

impl FromStr for StatusCode {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			Self::OK_URI => Ok(StatusCode::Ok),
			Self::MISSING_ATTRIBUTE_URI => Ok(StatusCode::MissingAttribute),
			Self::SYNTAX_ERROR_URI => Ok(StatusCode::SyntaxError),
			Self::PROCESSING_ERROR_URI => Ok(StatusCode::ProcessingError),
			other => Err(CoreError::UnknownStatusCode(other.to_string())),
		}
	}
}

/// Cause of an Indeterminate decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
	pub code: StatusCode,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
}

impl Status {
	pub fn new(code: StatusCode) -> Self {
		Self {
			code,
			message: None,
			detail: None,
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::Ok)
	}

	pub fn processing_error(message: impl Into<String>) -> Self {
		Self::new(StatusCode::ProcessingError).with_message(message)
	}

	pub fn missing_attribute(message: impl Into<String>) -> Self {
		Self::new(StatusCode::MissingAttribute).with_message(message)
	}

	pub fn syntax_error(message: impl Into<String>) -> Self {
		Self::new(StatusCode::SyntaxError).with_message(message)
	}

	/// Builder: set message.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Builder: set detail.
	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}

	pub fn is_ok(&self) -> bool {
		self.code == StatusCode::Ok
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.message {
			Some(message) => write!(f, "{}: {}", self.code, message),
			None => write!(f, "{}", self.code),
		}
	}
}
