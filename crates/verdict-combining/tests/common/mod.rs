// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scripted rules and policies shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use verdict_combining::{Applicability, Decidable, EvaluationContext, Policy, Rule};
use verdict_core::{
	DecisionResult, Effect, ExtendedDecision, ExtendedIndeterminate, Obligation, PepActions,
	PolicyRef, Status,
};

#[derive(Debug)]
pub struct TestContext;

impl EvaluationContext for TestContext {
	fn request_id(&self) -> Option<&str> {
		Some("integration-request")
	}
}

/// The seven decisions a child can produce.
pub const ALL_DECISIONS: [ExtendedDecision; 7] = [
	ExtendedDecision::Permit,
	ExtendedDecision::Deny,
	ExtendedDecision::NotApplicable,
	ExtendedDecision::Indeterminate(ExtendedIndeterminate::Empty),
	ExtendedDecision::Indeterminate(ExtendedIndeterminate::Deny),
	ExtendedDecision::Indeterminate(ExtendedIndeterminate::Permit),
	ExtendedDecision::Indeterminate(ExtendedIndeterminate::DenyPermit),
];

/// Every sequence of `len` decisions drawn from [`ALL_DECISIONS`].
pub fn decision_sequences(len: usize) -> Vec<Vec<ExtendedDecision>> {
	let mut sequences = vec![Vec::new()];
	for _ in 0..len {
		sequences = sequences
			.into_iter()
			.flat_map(|prefix| {
				ALL_DECISIONS.iter().map(move |decision| {
					let mut next = prefix.clone();
					next.push(*decision);
					next
				})
			})
			.collect();
	}
	sequences
}

pub fn obligation_ids(result: &DecisionResult) -> Vec<String> {
	result
		.pep_actions()
		.obligations()
		.iter()
		.map(|o| o.id.clone())
		.collect()
}

pub fn policy_ids(result: &DecisionResult) -> Vec<String> {
	result
		.applicable_policies()
		.iter()
		.map(|p| p.id.clone())
		.collect()
}

/// Policy that returns a fixed decision. Permit and Deny carry an obligation named
/// `ob-<id>`; every non-NotApplicable result lists the policy itself.
#[derive(Debug, Clone)]
pub struct StubPolicy {
	policy_ref: PolicyRef,
	applicability: Applicability,
	result: DecisionResult,
	evaluations: Arc<AtomicUsize>,
	target_checks: Arc<AtomicUsize>,
}

impl StubPolicy {
	pub fn new(id: &str, decision: ExtendedDecision) -> Self {
		let policy_ref = PolicyRef::policy(id);
		let result = match decision {
			ExtendedDecision::Permit | ExtendedDecision::Deny => {
				let effect = decision.effect().unwrap_or(Effect::Deny);
				DecisionResult::of_effect(effect).with_pep_actions(
					PepActions::new().with_obligation(Obligation::new(format!("ob-{id}"))),
				)
			}
			ExtendedDecision::NotApplicable => DecisionResult::not_applicable(),
			ExtendedDecision::Indeterminate(extended) => {
				let status = Status::processing_error(format!("{id} failed"));
				DecisionResult::indeterminate(extended, status)
			}
		}
		.with_applicable_policy(policy_ref.clone());

		Self {
			policy_ref,
			applicability: Applicability::Applicable,
			result,
			evaluations: Arc::new(AtomicUsize::new(0)),
			target_checks: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn with_applicability(mut self, applicability: Applicability) -> Self {
		self.applicability = applicability;
		self
	}

	pub fn evaluations(&self) -> usize {
		self.evaluations.load(Ordering::SeqCst)
	}

	pub fn target_checks(&self) -> usize {
		self.target_checks.load(Ordering::SeqCst)
	}
}

impl Decidable for StubPolicy {
	fn evaluate(&self, _ctx: &dyn EvaluationContext) -> DecisionResult {
		self.evaluations.fetch_add(1, Ordering::SeqCst);
		self.result.clone()
	}
}

impl Policy for StubPolicy {
	fn policy_ref(&self) -> &PolicyRef {
		&self.policy_ref
	}

	fn is_applicable_by_target(&self, _ctx: &dyn EvaluationContext) -> Applicability {
		self.target_checks.fetch_add(1, Ordering::SeqCst);
		self.applicability.clone()
	}
}

/// Policies `c0`, `c1`, ... producing `decisions` in order.
pub fn stub_policies(decisions: &[ExtendedDecision]) -> Vec<StubPolicy> {
	decisions
		.iter()
		.enumerate()
		.map(|(index, decision)| StubPolicy::new(&format!("c{index}"), *decision))
		.collect()
}

pub fn as_policies(stubs: &[StubPolicy]) -> Vec<Arc<dyn Policy>> {
	stubs
		.iter()
		.map(|stub| Arc::new(stub.clone()) as Arc<dyn Policy>)
		.collect()
}

/// What a [`StubRule`] does when evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
	Applies,
	DoesNotApply,
	Fails,
}

/// Rule with a fixed outcome and optional obligation. Clones share the call counter.
#[derive(Debug, Clone)]
pub struct StubRule {
	id: String,
	effect: Effect,
	outcome: RuleOutcome,
	always_applicable: bool,
	obligation: Option<String>,
	calls: Arc<AtomicUsize>,
}

impl StubRule {
	pub fn new(id: &str, effect: Effect, outcome: RuleOutcome) -> Self {
		Self {
			id: id.to_string(),
			effect,
			outcome,
			always_applicable: false,
			obligation: None,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// A rule without target or condition: it always applies.
	pub fn always(id: &str, effect: Effect) -> Self {
		Self {
			always_applicable: true,
			..Self::new(id, effect, RuleOutcome::Applies)
		}
	}

	pub fn with_obligation(mut self, id: &str) -> Self {
		self.obligation = Some(id.to_string());
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl Decidable for StubRule {
	fn evaluate(&self, _ctx: &dyn EvaluationContext) -> DecisionResult {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match self.outcome {
			RuleOutcome::Applies => {
				let mut actions = PepActions::new();
				if let Some(id) = &self.obligation {
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

impl Rule for StubRule {
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
		self.obligation.is_some()
	}
}

pub fn as_rules(stubs: &[StubRule]) -> Vec<Arc<dyn Rule>> {
	stubs
		.iter()
		.map(|stub| Arc::new(stub.clone()) as Arc<dyn Rule>)
		.collect()
}
