// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Combining engine configuration section.

use serde::{Deserialize, Serialize};
use verdict_combining::CombiningOptions;
use verdict_core::Tracking;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CombiningConfigLayer {
	pub track_applicable_policies: Option<bool>,
	pub optimize_rule_order: Option<bool>,
	pub warn_on_ignored_parameters: Option<bool>,
}

impl CombiningConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.track_applicable_policies.is_some() {
			self.track_applicable_policies = other.track_applicable_policies;
		}
		if other.optimize_rule_order.is_some() {
			self.optimize_rule_order = other.optimize_rule_order;
		}
		if other.warn_on_ignored_parameters.is_some() {
			self.warn_on_ignored_parameters = other.warn_on_ignored_parameters;
		}
	}

	pub fn finalize(self) -> CombiningConfig {
		CombiningConfig {
			track_applicable_policies: self.track_applicable_policies.unwrap_or(true),
			optimize_rule_order: self.optimize_rule_order.unwrap_or(true),
			warn_on_ignored_parameters: self.warn_on_ignored_parameters.unwrap_or(true),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombiningConfig {
	pub track_applicable_policies: bool,
	pub optimize_rule_order: bool,
	pub warn_on_ignored_parameters: bool,
}

impl Default for CombiningConfig {
	fn default() -> Self {
		Self {
			track_applicable_policies: true,
			optimize_rule_order: true,
			warn_on_ignored_parameters: true,
		}
	}
}

impl From<&CombiningConfig> for CombiningOptions {
	fn from(config: &CombiningConfig) -> Self {
		CombiningOptions::default()
			.with_optimize_rule_order(config.optimize_rule_order)
			.with_warn_on_ignored_parameters(config.warn_on_ignored_parameters)
			.with_tracking(Tracking::from(config.track_applicable_policies))
	}
}
