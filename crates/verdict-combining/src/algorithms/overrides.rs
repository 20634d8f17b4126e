// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deny-overrides and permit-overrides evaluators (XACML 3.0 C.2-C.5).
//!
//! Both algorithms are one evaluator parameterized by the overriding [`Effect`]:
//! Deny for deny-overrides, Permit for permit-overrides.
//!
//! Two evaluation strategies exist:
//!
//! - [`OrderPreservingOverridesEvaluator`] evaluates children in declared order. It is
//!   used for the `ordered-*` identifiers and for policy children.
//! - [`OverridingEffectFirstEvaluator`] is used for unordered rule combining. At
//!   construction it partitions rules by effect, prunes rules that cannot change the
//!   outcome, and evaluates overriding-effect rules first. Its results (decision,
//!   extended indeterminate, PEP actions) are identical to the order-preserving
//!   evaluator's for every input.

use std::sync::Arc;

use tracing::{debug, trace};
use verdict_core::{DecisionResult, Effect, Tracking};

use crate::combiner::OverridesCombiner;
use crate::decidable::{Decidable, EvaluationContext, Rule};
use crate::evaluator::{ConstantEvaluator, Evaluator};

/// Evaluates children in declared order, stopping at the first overriding decision.
#[derive(Debug)]
pub struct OrderPreservingOverridesEvaluator<T: ?Sized> {
	overriding: Effect,
	children: Vec<Arc<T>>,
}

impl<T: ?Sized + Decidable> OrderPreservingOverridesEvaluator<T> {
	pub fn new(overriding: Effect, children: Vec<Arc<T>>) -> Self {
		Self {
			overriding,
			children,
		}
	}

	pub fn overriding(&self) -> Effect {
		self.overriding
	}
}

impl<T: ?Sized + Decidable> Evaluator for OrderPreservingOverridesEvaluator<T> {
	fn evaluate(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		let mut combiner = OverridesCombiner::new(self.overriding, tracking);

		for (index, child) in self.children.iter().enumerate() {
			let result = child.evaluate_with(ctx, tracking);
			trace!(index, decision = %result.extended_decision(), "combined child evaluated");
			if let Some(result) = combiner.add(result) {
				trace!(index, "overriding decision reached");
				return result;
			}
		}

		combiner.finish()
	}
}

/// Rule evaluator that evaluates overriding-effect rules before overridden-effect rules.
#[derive(Debug)]
pub struct OverridingEffectFirstEvaluator {
	overriding: Effect,
	overriding_rules: Vec<Arc<dyn Rule>>,
	/// An always-deciding overriding rule was pruned: the decision is the overriding
	/// effect whenever `overriding_rules` do not short-circuit.
	overriding_certain: bool,
	overridden_rules: Vec<Arc<dyn Rule>>,
	/// An always-deciding overridden rule was pruned.
	overridden_certain: bool,
}

impl OverridingEffectFirstEvaluator {
	/// Partitions and prunes `rules`, collapsing to a [`ConstantEvaluator`] when the
	/// outcome no longer depends on the request.
	///
	/// Pruning keeps every rule whose evaluation can still change the decision or the
	/// PEP actions of the order-preserving evaluation:
	///
	/// - Rules after the first overriding rule that always decides are unreachable in
	///   declared order, and so are all overridden rules. Among the overriding rules
	///   before it, only those up to the last one carrying PEP actions can change the
	///   outcome; with none of those left the result is the constant overriding effect.
	/// - Otherwise, if some overridden rule always decides, overridden rules without
	///   PEP actions add nothing to the (certain) overridden outcome and are dropped.
	pub fn build(overriding: Effect, rules: Vec<Arc<dyn Rule>>) -> Arc<dyn Evaluator> {
		let total = rules.len();
		let mut overriding_rules: Vec<Arc<dyn Rule>> = Vec::new();
		let mut overridden_rules: Vec<Arc<dyn Rule>> = Vec::new();
		let mut overriding_certain = false;
		let mut overridden_certain = false;

		for rule in rules {
			if rule.effect() == overriding {
				if rule.always_decides() {
					debug!(
						rule = rule.id(),
						effect = %overriding,
						"overriding rule always decides, later rules unreachable"
					);
					overriding_certain = true;
					break;
				}
				overriding_rules.push(rule);
			} else if rule.always_decides() {
				overridden_certain = true;
			} else {
				overridden_rules.push(rule);
			}
		}

		if overriding_certain {
			let keep = overriding_rules
				.iter()
				.rposition(|rule| rule.has_pep_actions())
				.map_or(0, |last| last + 1);
			overriding_rules.truncate(keep);
			overridden_rules.clear();
			overridden_certain = false;

			if overriding_rules.is_empty() {
				debug!(
					effect = %overriding,
					rules = total,
					"rule combination collapsed to constant overriding effect"
				);
				return Arc::new(ConstantEvaluator::of_effect(overriding));
			}
		} else if overridden_certain {
			overridden_rules.retain(|rule| rule.has_pep_actions());

			if overriding_rules.is_empty() && overridden_rules.is_empty() {
				let overridden = overriding.opposite();
				debug!(
					effect = %overridden,
					rules = total,
					"rule combination collapsed to constant overridden effect"
				);
				return Arc::new(ConstantEvaluator::of_effect(overridden));
			}
		} else if overriding_rules.is_empty() && overridden_rules.is_empty() {
			return Arc::new(ConstantEvaluator::not_applicable());
		}

		debug!(
			effect = %overriding,
			rules = total,
			overriding_rules = overriding_rules.len(),
			overridden_rules = overridden_rules.len(),
			overriding_certain,
			overridden_certain,
			"rules partitioned by effect"
		);

		Arc::new(Self {
			overriding,
			overriding_rules,
			overriding_certain,
			overridden_rules,
			overridden_certain,
		})
	}

	pub fn overriding(&self) -> Effect {
		self.overriding
	}

	pub fn overriding_rules(&self) -> &[Arc<dyn Rule>] {
		&self.overriding_rules
	}

	pub fn overridden_rules(&self) -> &[Arc<dyn Rule>] {
		&self.overridden_rules
	}
}

impl Evaluator for OverridingEffectFirstEvaluator {
	fn evaluate(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		let mut combiner = OverridesCombiner::new(self.overriding, tracking);

		for rule in &self.overriding_rules {
			let result = rule.evaluate_with(ctx, tracking);
			trace!(
				rule = rule.id(),
				decision = %result.extended_decision(),
				"overriding rule evaluated"
			);
			if let Some(result) = combiner.add(result) {
				return result;
			}
		}

		if self.overriding_certain {
			return DecisionResult::of_effect(self.overriding).restrict_tracking(tracking);
		}

		if self.overridden_certain {
			combiner.assume_overridden();
		}

		for rule in &self.overridden_rules {
			let result = rule.evaluate_with(ctx, tracking);
			trace!(
				rule = rule.id(),
				decision = %result.extended_decision(),
				"overridden rule evaluated"
			);
			if let Some(result) = combiner.add(result) {
				return result;
			}
		}

		combiner.finish()
	}
}
