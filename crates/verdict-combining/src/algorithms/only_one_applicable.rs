// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Only-one-applicable (XACML 3.0 C.9), policy combining only.
//!
//! Targets are checked first; a child is fully evaluated only once it is known to be
//! the single applicable one.

use std::sync::Arc;

use tracing::{debug, trace};
use verdict_core::{DecisionResult, ExtendedIndeterminate, Status, Tracking};

use crate::decidable::{Applicability, Decidable, EvaluationContext, Policy};
use crate::evaluator::Evaluator;

/// Status message of the Indeterminate returned when several children are applicable.
pub const TOO_MANY_APPLICABLE_POLICIES: &str = "too many applicable policies";

#[derive(Debug)]
pub struct OnlyOneApplicableEvaluator {
	children: Vec<Arc<dyn Policy>>,
}

impl OnlyOneApplicableEvaluator {
	pub fn new(children: Vec<Arc<dyn Policy>>) -> Self {
		Self { children }
	}

	pub fn children(&self) -> &[Arc<dyn Policy>] {
		&self.children
	}
}

impl Evaluator for OnlyOneApplicableEvaluator {
	fn evaluate(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		let mut selected: Option<&Arc<dyn Policy>> = None;

		for (index, child) in self.children.iter().enumerate() {
			match child.is_applicable_by_target(ctx) {
				Applicability::NotApplicable => {}
				Applicability::Indeterminate(status) => {
					trace!(index, policy = %child.policy_ref(), "target indeterminate");
					return DecisionResult::indeterminate(ExtendedIndeterminate::DenyPermit, status)
						.restrict_tracking(tracking);
				}
				Applicability::Applicable => {
					if let Some(first) = selected {
						debug!(
							first = %first.policy_ref(),
							second = %child.policy_ref(),
							"more than one policy applicable"
						);
						let status = Status::processing_error(TOO_MANY_APPLICABLE_POLICIES)
							.with_detail(format!("{}, {}", first.policy_ref(), child.policy_ref()));
						let extended = ExtendedIndeterminate::DenyPermit;
						return DecisionResult::indeterminate(extended, status)
							.restrict_tracking(tracking);
					}
					selected = Some(child);
				}
			}
		}

		match selected {
			Some(child) => child.evaluate_with(ctx, tracking),
			None => DecisionResult::not_applicable().restrict_tracking(tracking),
		}
	}
}
