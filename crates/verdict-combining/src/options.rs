// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use verdict_core::Tracking;

/// Construction-time switches shared by every algorithm a registry builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombiningOptions {
	/// Let unordered rule-combining algorithms reorder and prune rules. When false every
	/// algorithm evaluates its children in declared order.
	pub optimize_rule_order: bool,
	/// Log a warning when a standard algorithm is handed combiner parameters it ignores.
	pub warn_on_ignored_parameters: bool,
	/// Tracking used when a combining node is evaluated through [`crate::Decidable`].
	pub tracking: Tracking,
}

impl Default for CombiningOptions {
	fn default() -> Self {
		Self {
			optimize_rule_order: true,
			warn_on_ignored_parameters: true,
			tracking: Tracking::Enabled,
		}
	}
}

impl CombiningOptions {
	pub fn with_optimize_rule_order(mut self, optimize_rule_order: bool) -> Self {
		self.optimize_rule_order = optimize_rule_order;
		self
	}

	pub fn with_warn_on_ignored_parameters(mut self, warn: bool) -> Self {
		self.warn_on_ignored_parameters = warn;
		self
	}

	pub fn with_tracking(mut self, tracking: Tracking) -> Self {
		self.tracking = tracking;
		self
	}
}
