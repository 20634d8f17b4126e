// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The composite result of evaluating a rule, policy, or policy set.

use serde::{Deserialize, Serialize};

use crate::applicable::{ApplicablePolicyIds, PolicyRef, Tracking};
use crate::decision::{Decision, Effect, ExtendedDecision, ExtendedIndeterminate};
use crate::pep::PepActions;
use crate::status::Status;

/// Decision plus everything that travels with it.
///
/// Invariants enforced by the constructors:
/// - NotApplicable results carry no PEP actions and no applicable policies.
/// - Indeterminate results always carry a [`Status`].
/// - The extended-indeterminate tag only exists on Indeterminate decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
	decision: ExtendedDecision,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	status: Option<Status>,
	#[serde(default)]
	pep_actions: PepActions,
	#[serde(default)]
	applicable_policies: ApplicablePolicyIds,
}

impl DecisionResult {
	pub fn permit() -> Self {
		Self::of_effect(Effect::Permit)
	}

	pub fn deny() -> Self {
		Self::of_effect(Effect::Deny)
	}

	pub fn of_effect(effect: Effect) -> Self {
		Self {
			decision: effect.decision(),
			status: None,
			pep_actions: PepActions::new(),
			applicable_policies: ApplicablePolicyIds::tracked(),
		}
	}

	pub fn not_applicable() -> Self {
		Self {
			decision: ExtendedDecision::NotApplicable,
			status: None,
			pep_actions: PepActions::new(),
			applicable_policies: ApplicablePolicyIds::tracked(),
		}
	}

	pub fn indeterminate(extended: ExtendedIndeterminate, status: Status) -> Self {
		Self {
			decision: ExtendedDecision::Indeterminate(extended),
			status: Some(status),
			pep_actions: PepActions::new(),
			applicable_policies: ApplicablePolicyIds::tracked(),
		}
	}

	/// Builder: set PEP actions. Ignored for NotApplicable and Indeterminate results.
	pub fn with_pep_actions(mut self, pep_actions: PepActions) -> Self {
		if self.decision.effect().is_some() {
			self.pep_actions = pep_actions;
		}
		self
	}

	/// Builder: set the applicable-policy list. Ignored for NotApplicable results.
	pub fn with_applicable_policies(mut self, applicable_policies: ApplicablePolicyIds) -> Self {
		if !self.decision.is_not_applicable() {
			self.applicable_policies = applicable_policies;
		}
		self
	}

	/// Builder: record one more applicable policy. Ignored for NotApplicable results.
	pub fn with_applicable_policy(mut self, policy: PolicyRef) -> Self {
		if !self.decision.is_not_applicable() {
			self.applicable_policies.push(policy);
		}
		self
	}

	/// Builder: record `policy` ahead of the policies already listed. Ignored for
	/// NotApplicable results.
	pub fn with_leading_applicable_policy(mut self, policy: PolicyRef) -> Self {
		if !self.decision.is_not_applicable() {
			self.applicable_policies.prepend(policy);
		}
		self
	}

	/// Builder: drop applicable policies when the caller does not track them.
	pub fn restrict_tracking(mut self, tracking: Tracking) -> Self {
		self.applicable_policies = self.applicable_policies.restrict_to(tracking);
		self
	}

	pub fn extended_decision(&self) -> ExtendedDecision {
		self.decision
	}

	pub fn decision(&self) -> Decision {
		self.decision.decision()
	}

	pub fn extended_indeterminate(&self) -> Option<ExtendedIndeterminate> {
		self.decision.extended_indeterminate()
	}

	pub fn status(&self) -> Option<&Status> {
		self.status.as_ref()
	}

	pub fn pep_actions(&self) -> &PepActions {
		&self.pep_actions
	}

	pub fn applicable_policies(&self) -> &ApplicablePolicyIds {
		&self.applicable_policies
	}

	pub fn is_permit(&self) -> bool {
		matches!(self.decision, ExtendedDecision::Permit)
	}

	pub fn is_deny(&self) -> bool {
		matches!(self.decision, ExtendedDecision::Deny)
	}

	pub fn is_not_applicable(&self) -> bool {
		self.decision.is_not_applicable()
	}

	pub fn is_indeterminate(&self) -> bool {
		self.decision.is_indeterminate()
	}

	pub fn into_parts(
		self,
	) -> (
		ExtendedDecision,
		Option<Status>,
		PepActions,
		ApplicablePolicyIds,
	) {
		(
			self.decision,
			self.status,
			self.pep_actions,
			self.applicable_policies,
		)
	}
}

/// Named, algorithm-specific parameter passed to a combining algorithm at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinerParameter {
	pub name: String,
	pub value: serde_json::Value,
}

impl CombinerParameter {
	pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
		Self {
			name: name.into(),
			value,
		}
	}
}
