// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bookkeeping shared by the evaluators.
//!
//! Children's PEP actions and applicable policies are held back until the final
//! decision is known, and only the ones from children whose decision matches it are
//! released into the result.

use verdict_core::{
	ApplicablePolicyIds, DecisionResult, Effect, ExtendedDecision, ExtendedIndeterminate,
	PepActions, Status, Tracking,
};

/// Accumulates PEP actions and applicable policies of children that all decided `effect`.
#[derive(Debug)]
pub(crate) struct EffectAccumulator {
	effect: Effect,
	seen: bool,
	pep_actions: PepActions,
	policies: ApplicablePolicyIds,
}

impl EffectAccumulator {
	pub(crate) fn new(effect: Effect, tracking: Tracking) -> Self {
		Self {
			effect,
			seen: false,
			pep_actions: PepActions::new(),
			policies: ApplicablePolicyIds::for_tracking(tracking),
		}
	}

	pub(crate) fn add(&mut self, pep_actions: PepActions, policies: &ApplicablePolicyIds) {
		self.seen = true;
		self.pep_actions.merge_owned(pep_actions);
		self.policies.extend_from(policies);
	}

	/// Records that the effect is certain without any child result to merge.
	pub(crate) fn mark_seen(&mut self) {
		self.seen = true;
	}

	pub(crate) fn seen(&self) -> bool {
		self.seen
	}

	pub(crate) fn finish(self) -> DecisionResult {
		DecisionResult::of_effect(self.effect)
			.with_pep_actions(self.pep_actions)
			.with_applicable_policies(self.policies)
	}
}

/// Incremental deny-overrides / permit-overrides reduction.
///
/// Feed child results with [`add`](Self::add) until it returns a short-circuit
/// result, then call [`finish`](Self::finish). The outcome only depends on the set of
/// results fed, except that among short-circuiting results the first one wins and the
/// overridden side's PEP actions keep their feeding order.
#[derive(Debug)]
pub(crate) struct OverridesCombiner {
	overriding: Effect,
	tracking: Tracking,
	overridden: EffectAccumulator,
	evaluated_policies: ApplicablePolicyIds,
	first_indeterminate_dp: Option<Status>,
	first_indeterminate_overriding: Option<Status>,
	first_indeterminate_overridden: Option<Status>,
	first_indeterminate_empty: Option<Status>,
}

impl OverridesCombiner {
	pub(crate) fn new(overriding: Effect, tracking: Tracking) -> Self {
		Self {
			overriding,
			tracking,
			overridden: EffectAccumulator::new(overriding.opposite(), tracking),
			evaluated_policies: ApplicablePolicyIds::for_tracking(tracking),
			first_indeterminate_dp: None,
			first_indeterminate_overriding: None,
			first_indeterminate_overridden: None,
			first_indeterminate_empty: None,
		}
	}

	/// Records that some pruned child would certainly have decided the overridden effect.
	pub(crate) fn assume_overridden(&mut self) {
		self.overridden.mark_seen();
	}

	/// Adds one child result. Returns the final result if it short-circuits.
	pub(crate) fn add(&mut self, result: DecisionResult) -> Option<DecisionResult> {
		let (decision, status, pep_actions, policies) = result.into_parts();

		match decision {
			ExtendedDecision::NotApplicable => None,
			ExtendedDecision::Permit | ExtendedDecision::Deny => {
				if decision.effect() == Some(self.overriding) {
					return Some(
						DecisionResult::of_effect(self.overriding)
							.with_pep_actions(pep_actions)
							.with_applicable_policies(policies.restrict_to(self.tracking)),
					);
				}
				self.evaluated_policies.extend_from(&policies);
				self.overridden.add(pep_actions, &policies);
				None
			}
			ExtendedDecision::Indeterminate(extended) => {
				self.evaluated_policies.extend_from(&policies);
				let status = status.unwrap_or_else(|| {
					Status::processing_error("indeterminate result without status")
				});
				let slot = if extended == ExtendedIndeterminate::DenyPermit {
					&mut self.first_indeterminate_dp
				} else if extended == self.overriding.indeterminate() {
					&mut self.first_indeterminate_overriding
				} else if extended == self.overriding.opposite().indeterminate() {
					&mut self.first_indeterminate_overridden
				} else {
					&mut self.first_indeterminate_empty
				};
				slot.get_or_insert(status);
				None
			}
		}
	}

	/// Resolves the decision once no child short-circuited.
	pub(crate) fn finish(self) -> DecisionResult {
		let overridden_effect = self.overriding.opposite();
		let overridden_possible =
			self.overridden.seen() || self.first_indeterminate_overridden.is_some();

		let (extended, status) = if let Some(status) = self.first_indeterminate_dp {
			(ExtendedIndeterminate::DenyPermit, status)
		} else if let Some(status) = self.first_indeterminate_overriding {
			let extended = if overridden_possible {
				self.overriding.indeterminate().with_effect(overridden_effect)
			} else {
				self.overriding.indeterminate()
			};
			(extended, status)
		} else if self.overridden.seen() {
			return self.overridden.finish();
		} else if let Some(status) = self.first_indeterminate_overridden {
			(overridden_effect.indeterminate(), status)
		} else if let Some(status) = self.first_indeterminate_empty {
			(ExtendedIndeterminate::Empty, status)
		} else {
			return DecisionResult::not_applicable().restrict_tracking(self.tracking);
		};

		DecisionResult::indeterminate(extended, status)
			.with_applicable_policies(self.evaluated_policies)
	}
}
