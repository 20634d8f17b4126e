// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The standard combining algorithms.
//!
//! [`AlgorithmKind`] is the closed set of supported algorithms. Each kind maps to one
//! identifier per element type it supports (see [`ids`]) and knows which evaluator to
//! build for a given set of children.

mod first_applicable;
mod only_one_applicable;
mod overrides;
mod unless;

use std::fmt;
use std::sync::Arc;

use verdict_core::Effect;

pub use first_applicable::FirstApplicableEvaluator;
pub use only_one_applicable::{OnlyOneApplicableEvaluator, TOO_MANY_APPLICABLE_POLICIES};
pub use overrides::{OrderPreservingOverridesEvaluator, OverridingEffectFirstEvaluator};
pub use unless::UnlessEvaluator;

use crate::decidable::{CombinedElementType, CombinedElements};
use crate::error::{CombiningError, Result};
use crate::evaluator::Evaluator;
use crate::options::CombiningOptions;

/// Algorithm identifiers, exactly as they appear in policies.
pub mod ids {
	use crate::decidable::CombinedElementType;

	pub const RULE_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:rule-combining-algorithm:deny-overrides";
	pub const POLICY_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:policy-combining-algorithm:deny-overrides";
	pub const RULE_ORDERED_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:rule-combining-algorithm:ordered-deny-overrides";
	pub const POLICY_ORDERED_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:policy-combining-algorithm:ordered-deny-overrides";
	pub const RULE_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:rule-combining-algorithm:permit-overrides";
	pub const POLICY_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:policy-combining-algorithm:permit-overrides";
	pub const RULE_ORDERED_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:rule-combining-algorithm:ordered-permit-overrides";
	pub const POLICY_ORDERED_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:3.0:policy-combining-algorithm:ordered-permit-overrides";
	pub const RULE_DENY_UNLESS_PERMIT: &str =
		"urn:oasis:names:tc:xacml:3.0:rule-combining-algorithm:deny-unless-permit";
	pub const POLICY_DENY_UNLESS_PERMIT: &str =
		"urn:oasis:names:tc:xacml:3.0:policy-combining-algorithm:deny-unless-permit";
	pub const RULE_PERMIT_UNLESS_DENY: &str =
		"urn:oasis:names:tc:xacml:3.0:rule-combining-algorithm:permit-unless-deny";
	pub const POLICY_PERMIT_UNLESS_DENY: &str =
		"urn:oasis:names:tc:xacml:3.0:policy-combining-algorithm:permit-unless-deny";
	pub const RULE_FIRST_APPLICABLE: &str =
		"urn:oasis:names:tc:xacml:1.0:rule-combining-algorithm:first-applicable";
	pub const POLICY_FIRST_APPLICABLE: &str =
		"urn:oasis:names:tc:xacml:1.0:policy-combining-algorithm:first-applicable";
	pub const POLICY_ONLY_ONE_APPLICABLE: &str =
		"urn:oasis:names:tc:xacml:1.0:policy-combining-algorithm:only-one-applicable";

	pub const LEGACY_RULE_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.0:rule-combining-algorithm:deny-overrides";
	pub const LEGACY_POLICY_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.0:policy-combining-algorithm:deny-overrides";
	pub const LEGACY_RULE_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.0:rule-combining-algorithm:permit-overrides";
	pub const LEGACY_POLICY_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.0:policy-combining-algorithm:permit-overrides";
	pub const LEGACY_RULE_ORDERED_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.1:rule-combining-algorithm:ordered-deny-overrides";
	pub const LEGACY_POLICY_ORDERED_DENY_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.1:policy-combining-algorithm:ordered-deny-overrides";
	pub const LEGACY_RULE_ORDERED_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.1:rule-combining-algorithm:ordered-permit-overrides";
	pub const LEGACY_POLICY_ORDERED_PERMIT_OVERRIDES: &str =
		"urn:oasis:names:tc:xacml:1.1:policy-combining-algorithm:ordered-permit-overrides";

	/// XACML 1.0/1.1 identifiers that are recognised but not implemented.
	pub const LEGACY: [(&str, CombinedElementType); 8] = [
		(LEGACY_RULE_DENY_OVERRIDES, CombinedElementType::Rule),
		(LEGACY_POLICY_DENY_OVERRIDES, CombinedElementType::Policy),
		(LEGACY_RULE_PERMIT_OVERRIDES, CombinedElementType::Rule),
		(LEGACY_POLICY_PERMIT_OVERRIDES, CombinedElementType::Policy),
		(LEGACY_RULE_ORDERED_DENY_OVERRIDES, CombinedElementType::Rule),
		(LEGACY_POLICY_ORDERED_DENY_OVERRIDES, CombinedElementType::Policy),
		(LEGACY_RULE_ORDERED_PERMIT_OVERRIDES, CombinedElementType::Rule),
		(LEGACY_POLICY_ORDERED_PERMIT_OVERRIDES, CombinedElementType::Policy),
	];
}

/// A standard combining algorithm, independent of the element type it combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
	DenyOverrides,
	OrderedDenyOverrides,
	PermitOverrides,
	OrderedPermitOverrides,
	DenyUnlessPermit,
	PermitUnlessDeny,
	FirstApplicable,
	OnlyOneApplicable,
}

impl AlgorithmKind {
	pub const ALL: [AlgorithmKind; 8] = [
		AlgorithmKind::DenyOverrides,
		AlgorithmKind::OrderedDenyOverrides,
		AlgorithmKind::PermitOverrides,
		AlgorithmKind::OrderedPermitOverrides,
		AlgorithmKind::DenyUnlessPermit,
		AlgorithmKind::PermitUnlessDeny,
		AlgorithmKind::FirstApplicable,
		AlgorithmKind::OnlyOneApplicable,
	];

	/// The identifier of this algorithm for `element_type`, if it supports that type.
	pub fn id(self, element_type: CombinedElementType) -> Option<&'static str> {
		use CombinedElementType::{Policy, Rule};

		let id = match (self, element_type) {
			(AlgorithmKind::DenyOverrides, Rule) => ids::RULE_DENY_OVERRIDES,
			(AlgorithmKind::DenyOverrides, Policy) => ids::POLICY_DENY_OVERRIDES,
			(AlgorithmKind::OrderedDenyOverrides, Rule) => ids::RULE_ORDERED_DENY_OVERRIDES,
			(AlgorithmKind::OrderedDenyOverrides, Policy) => ids::POLICY_ORDERED_DENY_OVERRIDES,
			(AlgorithmKind::PermitOverrides, Rule) => ids::RULE_PERMIT_OVERRIDES,
			(AlgorithmKind::PermitOverrides, Policy) => ids::POLICY_PERMIT_OVERRIDES,
			(AlgorithmKind::OrderedPermitOverrides, Rule) => ids::RULE_ORDERED_PERMIT_OVERRIDES,
			(AlgorithmKind::OrderedPermitOverrides, Policy) => {
				ids::POLICY_ORDERED_PERMIT_OVERRIDES
			}
			(AlgorithmKind::DenyUnlessPermit, Rule) => ids::RULE_DENY_UNLESS_PERMIT,
			(AlgorithmKind::DenyUnlessPermit, Policy) => ids::POLICY_DENY_UNLESS_PERMIT,
			(AlgorithmKind::PermitUnlessDeny, Rule) => ids::RULE_PERMIT_UNLESS_DENY,
			(AlgorithmKind::PermitUnlessDeny, Policy) => ids::POLICY_PERMIT_UNLESS_DENY,
			(AlgorithmKind::FirstApplicable, Rule) => ids::RULE_FIRST_APPLICABLE,
			(AlgorithmKind::FirstApplicable, Policy) => ids::POLICY_FIRST_APPLICABLE,
			(AlgorithmKind::OnlyOneApplicable, Rule) => return None,
			(AlgorithmKind::OnlyOneApplicable, Policy) => ids::POLICY_ONLY_ONE_APPLICABLE,
		};
		Some(id)
	}

	pub fn supports(self, element_type: CombinedElementType) -> bool {
		self.id(element_type).is_some()
	}

	/// The overriding effect of the overrides family.
	pub fn overriding_effect(self) -> Option<Effect> {
		match self {
			AlgorithmKind::DenyOverrides | AlgorithmKind::OrderedDenyOverrides => {
				Some(Effect::Deny)
			}
			AlgorithmKind::PermitOverrides | AlgorithmKind::OrderedPermitOverrides => {
				Some(Effect::Permit)
			}
			_ => None,
		}
	}

	/// True for the `ordered-*` identifiers, which must evaluate in declared order.
	pub fn is_ordered(self) -> bool {
		matches!(
			self,
			AlgorithmKind::OrderedDenyOverrides | AlgorithmKind::OrderedPermitOverrides
		)
	}

	/// Builds the evaluator for `children`.
	///
	/// Rule children of unordered algorithms get the construction-time optimizations
	/// unless `options.optimize_rule_order` is off; policy children are always evaluated
	/// in declared order.
	pub(crate) fn build(
		self,
		id: &str,
		children: CombinedElements,
		options: &CombiningOptions,
	) -> Result<Arc<dyn Evaluator>> {
		let element_type = children.element_type();
		if !self.supports(element_type) {
			return Err(CombiningError::ElementTypeMismatch {
				id: id.to_string(),
				expected: element_type.other(),
				actual: element_type,
			});
		}

		let optimize = options.optimize_rule_order && !self.is_ordered();

		let evaluator: Arc<dyn Evaluator> = match (self, children) {
			(AlgorithmKind::DenyUnlessPermit, children) => {
				unless(Effect::Permit, children, optimize)
			}
			(AlgorithmKind::PermitUnlessDeny, children) => unless(Effect::Deny, children, optimize),
			(AlgorithmKind::FirstApplicable, CombinedElements::Rules(rules)) if optimize => {
				FirstApplicableEvaluator::for_rules(rules)
			}
			(AlgorithmKind::FirstApplicable, CombinedElements::Rules(rules)) => {
				Arc::new(FirstApplicableEvaluator::new(rules))
			}
			(AlgorithmKind::FirstApplicable, CombinedElements::Policies(policies)) => {
				Arc::new(FirstApplicableEvaluator::new(policies))
			}
			(AlgorithmKind::OnlyOneApplicable, CombinedElements::Policies(policies)) => {
				Arc::new(OnlyOneApplicableEvaluator::new(policies))
			}
			(AlgorithmKind::OnlyOneApplicable, CombinedElements::Rules(_)) => {
				return Err(CombiningError::ElementTypeMismatch {
					id: id.to_string(),
					expected: CombinedElementType::Policy,
					actual: CombinedElementType::Rule,
				});
			}
			(overrides, children) => {
				let overriding = match overrides.overriding_effect() {
					Some(effect) => effect,
					None => return Err(CombiningError::UnknownAlgorithm { id: id.to_string() }),
				};
				match children {
					CombinedElements::Rules(rules) if optimize => {
						OverridingEffectFirstEvaluator::build(overriding, rules)
					}
					CombinedElements::Rules(rules) => {
						Arc::new(OrderPreservingOverridesEvaluator::new(overriding, rules))
					}
					CombinedElements::Policies(policies) => {
						Arc::new(OrderPreservingOverridesEvaluator::new(overriding, policies))
					}
				}
			}
		};

		Ok(evaluator)
	}
}

impl fmt::Display for AlgorithmKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			AlgorithmKind::DenyOverrides => "deny-overrides",
			AlgorithmKind::OrderedDenyOverrides => "ordered-deny-overrides",
			AlgorithmKind::PermitOverrides => "permit-overrides",
			AlgorithmKind::OrderedPermitOverrides => "ordered-permit-overrides",
			AlgorithmKind::DenyUnlessPermit => "deny-unless-permit",
			AlgorithmKind::PermitUnlessDeny => "permit-unless-deny",
			AlgorithmKind::FirstApplicable => "first-applicable",
			AlgorithmKind::OnlyOneApplicable => "only-one-applicable",
		};
		f.write_str(name)
	}
}

fn unless(winning: Effect, children: CombinedElements, optimize: bool) -> Arc<dyn Evaluator> {
	match children {
		CombinedElements::Rules(rules) if optimize => UnlessEvaluator::for_rules(winning, rules),
		CombinedElements::Rules(rules) => Arc::new(UnlessEvaluator::new(winning, rules)),
		CombinedElements::Policies(policies) => Arc::new(UnlessEvaluator::new(winning, policies)),
	}
}
