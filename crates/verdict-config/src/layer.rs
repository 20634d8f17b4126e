// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration as produced by one source.

use serde::{Deserialize, Serialize};

use crate::sections::{CombiningConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration. Unset sections and fields leave lower
/// precedence values in place when merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfigLayer {
	pub combining: Option<CombiningConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl EngineConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if let Some(combining) = other.combining {
			self.combining.get_or_insert_with(Default::default).merge(combining);
		}
		if let Some(logging) = other.logging {
			self.logging.get_or_insert_with(Default::default).merge(logging);
		}
	}
}
