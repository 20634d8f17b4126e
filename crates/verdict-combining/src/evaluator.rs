// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The per-node strategy object produced by a combining algorithm.

use std::fmt;

use verdict_core::{DecisionResult, Effect, Tracking};

use crate::decidable::EvaluationContext;

/// Combines the children an algorithm was constructed with into one decision.
///
/// Evaluators are built once at policy load and then shared across concurrent
/// requests; all per-request state lives in the returned [`DecisionResult`].
pub trait Evaluator: Send + Sync + fmt::Debug {
	/// Evaluates the children against `ctx`.
	///
	/// With [`Tracking::Disabled`] the result's applicable-policy list is the
	/// untracked sentinel and no identifiers are collected.
	fn evaluate(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult;
}

/// Returns the same result for every request without evaluating anything.
#[derive(Debug, Clone)]
pub struct ConstantEvaluator {
	result: DecisionResult,
}

impl ConstantEvaluator {
	pub fn new(result: DecisionResult) -> Self {
		Self { result }
	}

	pub fn of_effect(effect: Effect) -> Self {
		Self::new(DecisionResult::of_effect(effect))
	}

	pub fn not_applicable() -> Self {
		Self::new(DecisionResult::not_applicable())
	}

	pub fn result(&self) -> &DecisionResult {
		&self.result
	}
}

impl Evaluator for ConstantEvaluator {
	fn evaluate(&self, _ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		self.result.clone().restrict_tracking(tracking)
	}
}
