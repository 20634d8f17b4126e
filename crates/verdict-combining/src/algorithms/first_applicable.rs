// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! First-applicable (XACML 3.0 C.8): the first child that is not NotApplicable wins.

use std::sync::Arc;

use tracing::{debug, trace};
use verdict_core::{DecisionResult, Tracking};

use crate::decidable::{Decidable, EvaluationContext, Rule};
use crate::evaluator::{ConstantEvaluator, Evaluator};

#[derive(Debug)]
pub struct FirstApplicableEvaluator<T: ?Sized> {
	children: Vec<Arc<T>>,
}

impl<T: ?Sized + Decidable> FirstApplicableEvaluator<T> {
	pub fn new(children: Vec<Arc<T>>) -> Self {
		Self { children }
	}

	pub fn children(&self) -> &[Arc<T>] {
		&self.children
	}
}

impl FirstApplicableEvaluator<dyn Rule> {
	/// Drops rules that follow an always-applicable rule, since evaluation never gets
	/// past it. Collapses to a constant when the first rule always decides.
	pub fn for_rules(mut rules: Vec<Arc<dyn Rule>>) -> Arc<dyn Evaluator> {
		if let Some(first_applicable) = rules.iter().position(|rule| rule.is_always_applicable()) {
			let unreachable = rules.len() - first_applicable - 1;
			if unreachable > 0 {
				debug!(
					rule = rules[first_applicable].id(),
					unreachable, "rules after an always-applicable rule dropped"
				);
			}
			rules.truncate(first_applicable + 1);
		}

		match rules.as_slice() {
			[] => Arc::new(ConstantEvaluator::not_applicable()),
			[only] if only.always_decides() => {
				Arc::new(ConstantEvaluator::of_effect(only.effect()))
			}
			_ => Arc::new(Self::new(rules)),
		}
	}
}

impl<T: ?Sized + Decidable> Evaluator for FirstApplicableEvaluator<T> {
	fn evaluate(&self, ctx: &dyn EvaluationContext, tracking: Tracking) -> DecisionResult {
		for (index, child) in self.children.iter().enumerate() {
			let result = child.evaluate_with(ctx, tracking);
			trace!(index, decision = %result.extended_decision(), "combined child evaluated");
			if !result.is_not_applicable() {
				return result.restrict_tracking(tracking);
			}
		}

		DecisionResult::not_applicable().restrict_tracking(tracking)
	}
}
