// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deny-unless-permit and permit-unless-deny (XACML 3.0 C.6, C.7).
//!
//! Both always resolve to Permit or Deny. The winning effect (Permit for
//! deny-unless-permit) short-circuits; otherwise the result is the fallback effect,
//! carrying the PEP actions of every child that decided it. NotApplicable and
//! Indeterminate children are ignored.

use std::sync::Arc;

use tracing::{debug, trace};
use verdict_core::{DecisionResult, Effect, Tracking};

use crate::combiner::EffectAccumulator;
use crate::decidable::{Decidable, EvaluationContext, Rule};
use crate::evaluator::{ConstantEvaluator, Evaluator};

#[derive(Debug)]
pub struct UnlessEvaluator<T: ?Sized> {
	winning: Effect,
	children: Vec<Arc<T>>,
}

impl<T: ?Sized + Decidable> UnlessEvaluator<T> {
	/// `winning` is Permit for deny-unless-permit and Deny for permit-unless-deny.
	pub fn new(winning: Effect, children: Vec<Arc<T>>) -> Self {
		Self { winning, children }
	}

	pub fn winning(&self) -> Effect {
		self.winning
	}

	pub fn fallback(&self) -> Effect {
		self.winning.opposite()
	}
}

impl UnlessEvaluator<dyn Rule> {
	/// Stops at the first winning-effect rule that always decides. Rules before it are
	/// only kept while they are winning-effect rules that can still contribute PEP
	/// actions; with none left the result is the constant winning effect.
	pub fn for_rules(winning: Effect, rules: Vec<Arc<dyn Rule>>) -> Arc<dyn Evaluator> {
		let Some(certain) = rules
			.iter()
			.position(|rule| rule.effect() == winning && rule.always_decides())
		else {
			return Arc::new(Self::new(winning, rules));
		};

		let total = rules.len();
		let mut kept: Vec<Arc<dyn Rule>> = rules[..certain]
			.iter()
			.filter(|rule| rule.effect() == winning)
			.cloned()
			.collect();
		let keep = kept
			.iter()
			.rposition(|rule| rule.has_pep_actions())
			.map_or(0, |last| last + 1);
		kept.truncate(keep);

		if kept.is_empty() {
			debug!(
				effect = %winning,
				rules = total,
				"rule combination collapsed to constant winning effect"
			);
			return Arc::new(ConstantEvaluator::of_effect(winning));
		}

		kept.push(Arc::clone(&rules[certain]));
		debug!(
			effect = %winning,
			rules = total,
			kept = kept.len(),
			"rules after an always-deciding rule dropped"
		);
		Arc::new(Self::new(winning, kept))
	}
}

impl<T: ?Sized + Decidable> Evaluator for UnlessEvaluator<T> {
	fn evaluate(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		let mut fallback = EffectAccumulator::new(self.fallback(), tracking);

		for (index, child) in self.children.iter().enumerate() {
			let result = child.evaluate_with(ctx, tracking);
			trace!(index, decision = %result.extended_decision(), "combined child evaluated");
			match result.extended_decision().effect() {
				Some(effect) if effect == self.winning => {
					trace!(index, "winning decision reached");
					return result.restrict_tracking(tracking);
				}
				Some(_) => {
					let (_, _, pep_actions, policies) = result.into_parts();
					fallback.add(pep_actions, &policies);
				}
				None => {}
			}
		}

		fallback.finish()
	}
}
