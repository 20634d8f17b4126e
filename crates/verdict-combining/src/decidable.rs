// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contracts for the elements a combining algorithm combines.
//!
//! Rules, policies and policy sets are built by an external policy-model layer. The
//! combining engine only sees them through [`Decidable`] and the two refinements
//! below, and never inspects the [`EvaluationContext`] it passes through.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use verdict_core::{DecisionResult, Effect, PolicyRef, Status, Tracking};

/// Request-scoped handle for attribute lookup. Opaque to the combining engine.
pub trait EvaluationContext: Send + Sync {
	/// Identifier used to correlate tracing events, if the caller has one.
	fn request_id(&self) -> Option<&str> {
		None
	}
}

/// Anything that evaluates to a [`DecisionResult`] against a request context.
///
/// Implementations must be idempotent for a given context snapshot. Evaluators call
/// `evaluate` at most once per child per evaluation.
pub trait Decidable: Send + Sync + fmt::Debug {
	fn evaluate(&self, ctx: &dyn EvaluationContext) -> DecisionResult;

	/// Evaluates on behalf of a combining parent that asked for `tracking`.
	///
	/// Elements that collect applicable policies themselves override this so that
	/// nothing is collected when the parent does not track.
	fn evaluate_with(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		self.evaluate(ctx).restrict_tracking(tracking)
	}
}

/// A rule as seen by rule-combining algorithms.
///
/// The static properties let overrides algorithms reorder and prune rules once, at
/// construction. A rule's results never carry applicable policies.
pub trait Rule: Decidable {
	fn id(&self) -> &str;

	fn effect(&self) -> Effect;

	/// True if the rule has neither a target nor a condition.
	fn is_always_applicable(&self) -> bool;

	/// True if the rule declares obligation or advice expressions.
	fn has_pep_actions(&self) -> bool;

	/// True if evaluating the rule always yields its effect with no PEP actions.
	fn always_decides(&self) -> bool {
		self.is_always_applicable() && !self.has_pep_actions()
	}
}

/// Outcome of matching a policy's target alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
	Applicable,
	NotApplicable,
	Indeterminate(Status),
}

/// A policy or policy set as seen by policy-combining algorithms.
pub trait Policy: Decidable {
	fn policy_ref(&self) -> &PolicyRef;

	/// Matches only the target, without evaluating the body.
	fn is_applicable_by_target(&self, ctx: &dyn EvaluationContext) -> Applicability;
}

/// Which kind of children an algorithm combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinedElementType {
	Rule,
	Policy,
}

impl CombinedElementType {
	pub fn other(self) -> CombinedElementType {
		match self {
			CombinedElementType::Rule => CombinedElementType::Policy,
			CombinedElementType::Policy => CombinedElementType::Rule,
		}
	}
}

impl fmt::Display for CombinedElementType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CombinedElementType::Rule => f.write_str("rule"),
			CombinedElementType::Policy => f.write_str("policy"),
		}
	}
}

/// Ordered children handed to a combining algorithm.
#[derive(Debug, Clone)]
pub enum CombinedElements {
	Rules(Vec<Arc<dyn Rule>>),
	Policies(Vec<Arc<dyn Policy>>),
}

impl CombinedElements {
	pub fn element_type(&self) -> CombinedElementType {
		match self {
			CombinedElements::Rules(_) => CombinedElementType::Rule,
			CombinedElements::Policies(_) => CombinedElementType::Policy,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			CombinedElements::Rules(rules) => rules.len(),
			CombinedElements::Policies(policies) => policies.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl From<Vec<Arc<dyn Rule>>> for CombinedElements {
	fn from(rules: Vec<Arc<dyn Rule>>) -> Self {
		CombinedElements::Rules(rules)
	}
}

impl From<Vec<Arc<dyn Policy>>> for CombinedElements {
	fn from(policies: Vec<Arc<dyn Policy>>) -> Self {
		CombinedElements::Policies(policies)
	}
}
