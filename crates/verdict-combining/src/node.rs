// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A policy or policy-set node: an identifier, a combining algorithm and its children.

use std::sync::Arc;

use tracing::{debug, instrument};
use verdict_core::{CombinerParameter, DecisionResult, PolicyRef, Tracking};

use crate::decidable::{Applicability, CombinedElements, Decidable, EvaluationContext, Policy};
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::registry::AlgorithmRegistry;

/// Policy node whose decision is its children combined by one algorithm.
///
/// The evaluator is resolved and built once, when the node is built, so unknown or
/// legacy algorithms and mismatched children fail policy loading. The node has no
/// target of its own and is always applicable by target.
#[derive(Debug, Clone)]
pub struct CombiningPolicy {
	policy_ref: PolicyRef,
	algorithm_id: String,
	evaluator: Arc<dyn Evaluator>,
	tracking: Tracking,
}

impl CombiningPolicy {
	pub fn build(
		registry: &dyn AlgorithmRegistry,
		policy_ref: PolicyRef,
		algorithm_id: &str,
		params: &[CombinerParameter],
		children: CombinedElements,
	) -> Result<Self> {
		let count = children.len();
		let evaluator = registry.evaluator(algorithm_id, params, children)?;
		debug!(
			policy = %policy_ref,
			algorithm = algorithm_id,
			children = count,
			"combining policy built"
		);

		Ok(Self {
			policy_ref,
			algorithm_id: algorithm_id.to_string(),
			evaluator,
			tracking: registry.options().tracking,
		})
	}

	/// Builder: set the tracking used by [`Decidable::evaluate`].
	pub fn with_tracking(mut self, tracking: Tracking) -> Self {
		self.tracking = tracking;
		self
	}

	pub fn algorithm_id(&self) -> &str {
		&self.algorithm_id
	}

	pub fn tracking(&self) -> Tracking {
		self.tracking
	}
}

impl Decidable for CombiningPolicy {
	/// Evaluates with this node's own tracking. Use this on the root of a policy tree.
	fn evaluate(&self, ctx: &dyn EvaluationContext) -> DecisionResult {
		self.evaluate_with(ctx, self.tracking)
	}

	/// Evaluates the children with the parent's tracking. Unless the result is
	/// NotApplicable, this node's reference is listed ahead of its children's.
	#[instrument(
		level = "debug",
		skip(self, ctx),
		fields(policy = %self.policy_ref, request_id = ctx.request_id())
	)]
	fn evaluate_with(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		let result = self
			.evaluator
			.evaluate(ctx, tracking)
			.with_leading_applicable_policy(self.policy_ref.clone());
		debug!(decision = %result.extended_decision(), "policy combined");
		result
	}
}

impl Policy for CombiningPolicy {
	fn policy_ref(&self) -> &PolicyRef {
		&self.policy_ref
	}

	fn is_applicable_by_target(&self, _ctx: &dyn EvaluationContext) -> Applicability {
		Applicability::Applicable
	}
}
