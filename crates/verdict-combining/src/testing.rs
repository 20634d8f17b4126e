// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scripted rules and policies for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use verdict_core::{DecisionResult, Effect, Obligation, PepActions, PolicyRef, Status, Tracking};

use crate::decidable::{Applicability, Decidable, EvaluationContext, Policy, Rule};

#[derive(Debug)]
pub(crate) struct TestContext;

impl EvaluationContext for TestContext {
	fn request_id(&self) -> Option<&str> {
		Some("test-request")
	}
}

pub(crate) fn obligation_ids(result: &DecisionResult) -> Vec<String> {
	result
		.pep_actions()
		.obligations()
		.iter()
		.map(|o| o.id.clone())
		.collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleOutcome {
	Applies,
	DoesNotApply,
	Fails,
}

/// Rule with a fixed outcome. Clones share the call counter.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRule {
	id: String,
	effect: Effect,
	outcome: RuleOutcome,
	always_applicable: bool,
	obligations: Vec<String>,
	calls: Arc<AtomicUsize>,
}

impl ScriptedRule {
	pub(crate) fn new(id: &str, effect: Effect, outcome: RuleOutcome) -> Self {
		Self {
			id: id.to_string(),
			effect,
			outcome,
			always_applicable: false,
			obligations: Vec::new(),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// A rule with no target, no condition and no PEP actions.
	pub(crate) fn unconditional(id: &str, effect: Effect) -> Self {
		Self {
			always_applicable: true,
			..Self::new(id, effect, RuleOutcome::Applies)
		}
	}

	pub(crate) fn with_obligation(mut self, id: &str) -> Self {
		self.obligations.push(id.to_string());
		self
	}

	pub(crate) fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl Decidable for ScriptedRule {
	fn evaluate(&self, _ctx: &dyn EvaluationContext) -> DecisionResult {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match self.outcome {
			RuleOutcome::Applies => {
				let mut actions = PepActions::new();
				for id in &self.obligations {
					actions.add_obligation(Obligation::new(id.clone()));
				}
				DecisionResult::of_effect(self.effect).with_pep_actions(actions)
			}
			RuleOutcome::DoesNotApply => DecisionResult::not_applicable(),
			RuleOutcome::Fails => DecisionResult::indeterminate(
				self.effect.indeterminate(),
				Status::processing_error(format!("rule {} failed", self.id)),
			),
		}
	}
}

impl Rule for ScriptedRule {
	fn id(&self) -> &str {
		&self.id
	}

	fn effect(&self) -> Effect {
		self.effect
	}

	fn is_always_applicable(&self) -> bool {
		self.always_applicable
	}

	fn has_pep_actions(&self) -> bool {
		!self.obligations.is_empty()
	}
}

/// Policy with a fixed target outcome and a fixed result. Clones share counters.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedPolicy {
	policy_ref: PolicyRef,
	applicability: Applicability,
	result: DecisionResult,
	evaluations: Arc<AtomicUsize>,
	untracked_evaluations: Arc<AtomicUsize>,
	target_checks: Arc<AtomicUsize>,
}

impl ScriptedPolicy {
	pub(crate) fn new(id: &str, result: DecisionResult) -> Self {
		let policy_ref = PolicyRef::policy(id);
		let result = if result.is_not_applicable() {
			result
		} else {
			result.with_applicable_policy(policy_ref.clone())
		};
		Self {
			policy_ref,
			applicability: Applicability::Applicable,
			result,
			evaluations: Arc::new(AtomicUsize::new(0)),
			untracked_evaluations: Arc::new(AtomicUsize::new(0)),
			target_checks: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub(crate) fn with_applicability(mut self, applicability: Applicability) -> Self {
		self.applicability = applicability;
		self
	}

	pub(crate) fn evaluations(&self) -> usize {
		self.evaluations.load(Ordering::SeqCst)
	}

	/// Evaluations requested by a parent with tracking disabled.
	pub(crate) fn untracked_evaluations(&self) -> usize {
		self.untracked_evaluations.load(Ordering::SeqCst)
	}

	pub(crate) fn target_checks(&self) -> usize {
		self.target_checks.load(Ordering::SeqCst)
	}
}

impl Decidable for ScriptedPolicy {
	fn evaluate(&self, _ctx: &dyn EvaluationContext) -> DecisionResult {
		self.evaluations.fetch_add(1, Ordering::SeqCst);
		self.result.clone()
	}

	fn evaluate_with(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		if !tracking.is_enabled() {
			self.untracked_evaluations.fetch_add(1, Ordering::SeqCst);
		}
		self.evaluate(ctx).restrict_tracking(tracking)
	}
}

impl Policy for ScriptedPolicy {
	fn policy_ref(&self) -> &PolicyRef {
		&self.policy_ref
	}

	fn is_applicable_by_target(&self, _ctx: &dyn EvaluationContext) -> Applicability {
		self.target_checks.fetch_add(1, Ordering::SeqCst);
		self.applicability.clone()
	}
}

pub(crate) fn policies(list: &[ScriptedPolicy]) -> Vec<Arc<dyn Policy>> {
	list.iter()
		.map(|policy| Arc::new(policy.clone()) as Arc<dyn Policy>)
		.collect()
}

pub(crate) fn rules(list: &[ScriptedRule]) -> Vec<Arc<dyn Rule>> {
	list.iter()
		.map(|rule| Arc::new(rule.clone()) as Arc<dyn Rule>)
		.collect()
}
