// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end combining scenarios through the public registry API.

mod common;

use std::sync::Arc;

use common::{
	as_policies, as_rules, obligation_ids, policy_ids, RuleOutcome, StubPolicy, StubRule,
	TestContext,
};
use verdict_combining::{
	ids, AlgorithmRegistry, Applicability, CombinedElements, CombiningError, CombiningPolicy,
	Decidable, ExtensibleRegistry, Policy, StandardRegistry, Tracking,
	TOO_MANY_APPLICABLE_POLICIES,
};
use verdict_core::{
	Effect, ExtendedDecision, ExtendedIndeterminate, PolicyRef, StatusCode,
};

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn not_applicable_then_permit_under_permit_overrides() {
	let registry = StandardRegistry::new();
	let children = [
		StubPolicy::new("na", ExtendedDecision::NotApplicable),
		StubPolicy::new("permit", ExtendedDecision::Permit),
	];
	let evaluator = registry
		.evaluator(ids::POLICY_PERMIT_OVERRIDES, &[], as_policies(&children).into())
		.unwrap();

	let result = evaluator.evaluate(&TestContext, Tracking::Enabled);

	assert!(result.is_permit());
	assert_eq!(obligation_ids(&result), vec!["ob-permit"]);
	assert_eq!(policy_ids(&result), vec!["permit"]);
}

#[test]
fn indeterminate_deny_then_permit_under_deny_overrides() {
	let registry = StandardRegistry::new();
	let children = [
		StubPolicy::new(
			"failing",
			ExtendedDecision::Indeterminate(ExtendedIndeterminate::Deny),
		),
		StubPolicy::new("permit", ExtendedDecision::Permit),
	];
	let evaluator = registry
		.evaluator(ids::POLICY_DENY_OVERRIDES, &[], as_policies(&children).into())
		.unwrap();

	let result = evaluator.evaluate(&TestContext, Tracking::Enabled);

	assert_eq!(
		result.extended_decision(),
		ExtendedDecision::Indeterminate(ExtendedIndeterminate::DenyPermit)
	);
	assert!(result.pep_actions().is_empty());
	assert_eq!(
		result.status().and_then(|s| s.message.as_deref()),
		Some("failing failed")
	);
}

#[test]
fn deny_permit_deny_under_deny_overrides_short_circuits() {
	let registry = StandardRegistry::new();
	let first = StubRule::new("d1", Effect::Deny, RuleOutcome::Applies).with_obligation("ob-d1");
	let permit = StubRule::new("p", Effect::Permit, RuleOutcome::Applies).with_obligation("ob-p");
	let second = StubRule::new("d2", Effect::Deny, RuleOutcome::Applies).with_obligation("ob-d2");

	for algorithm in [ids::RULE_DENY_OVERRIDES, ids::RULE_ORDERED_DENY_OVERRIDES] {
		let evaluator = registry
			.evaluator(
				algorithm,
				&[],
				as_rules(&[first.clone(), permit.clone(), second.clone()]).into(),
			)
			.unwrap();

		let result = evaluator.evaluate(&TestContext, Tracking::Enabled);

		assert!(result.is_deny());
		assert_eq!(obligation_ids(&result), vec!["ob-d1"]);
	}
	assert_eq!(second.calls(), 0);
	assert_eq!(permit.calls(), 0);
}

#[test]
fn all_not_applicable_under_first_applicable() {
	let registry = StandardRegistry::new();
	let children = [
		StubRule::new("a", Effect::Permit, RuleOutcome::DoesNotApply),
		StubRule::new("b", Effect::Deny, RuleOutcome::DoesNotApply),
	];
	let evaluator = registry
		.evaluator(ids::RULE_FIRST_APPLICABLE, &[], as_rules(&children).into())
		.unwrap();

	let result = evaluator.evaluate(&TestContext, Tracking::Enabled);

	assert!(result.is_not_applicable());
	assert!(result.pep_actions().is_empty());
	assert!(result.applicable_policies().is_empty());
}

#[test]
fn two_applicable_targets_under_only_one_applicable() {
	let registry = StandardRegistry::new();
	let children = [
		StubPolicy::new("a", ExtendedDecision::Permit)
			.with_applicability(Applicability::NotApplicable),
		StubPolicy::new("b", ExtendedDecision::Permit),
		StubPolicy::new("c", ExtendedDecision::Deny),
	];
	let evaluator = registry
		.evaluator(ids::POLICY_ONLY_ONE_APPLICABLE, &[], as_policies(&children).into())
		.unwrap();

	let result = evaluator.evaluate(&TestContext, Tracking::Enabled);

	assert_eq!(
		result.extended_decision(),
		ExtendedDecision::Indeterminate(ExtendedIndeterminate::DenyPermit)
	);
	let status = result.status().unwrap();
	assert_eq!(status.code, StatusCode::ProcessingError);
	assert_eq!(status.message.as_deref(), Some(TOO_MANY_APPLICABLE_POLICIES));
	for child in &children {
		assert_eq!(child.evaluations(), 0);
		assert_eq!(child.target_checks(), 1);
	}
}

#[test]
fn single_applicable_target_under_only_one_applicable() {
	let registry = StandardRegistry::new();
	let children = [
		StubPolicy::new("a", ExtendedDecision::Permit)
			.with_applicability(Applicability::NotApplicable),
		StubPolicy::new("b", ExtendedDecision::Deny),
	];
	let evaluator = registry
		.evaluator(ids::POLICY_ONLY_ONE_APPLICABLE, &[], as_policies(&children).into())
		.unwrap();

	let result = evaluator.evaluate(&TestContext, Tracking::Enabled);

	assert!(result.is_deny());
	assert_eq!(obligation_ids(&result), vec!["ob-b"]);
	assert_eq!(children[0].evaluations(), 0);
	assert_eq!(children[1].evaluations(), 1);
}

// ============================================================================
// Construction failures
// ============================================================================

#[test]
fn policy_loading_fails_for_bad_algorithms() {
	let registry = StandardRegistry::new();

	let unknown = registry
		.evaluator("urn:example:unknown", &[], CombinedElements::Rules(Vec::new()))
		.unwrap_err();
	assert!(matches!(unknown, CombiningError::UnknownAlgorithm { .. }));

	let legacy = registry
		.evaluator(
			ids::LEGACY_RULE_ORDERED_DENY_OVERRIDES,
			&[],
			CombinedElements::Rules(Vec::new()),
		)
		.unwrap_err();
	assert!(matches!(legacy, CombiningError::UnsupportedLegacyAlgorithm { .. }));

	let mismatch = registry
		.evaluator(
			ids::POLICY_ONLY_ONE_APPLICABLE,
			&[],
			as_rules(&[StubRule::always("r", Effect::Permit)]).into(),
		)
		.unwrap_err();
	assert!(matches!(mismatch, CombiningError::ElementTypeMismatch { .. }));
}

#[test]
fn extensible_registry_resolves_standard_algorithms() {
	let standard = Arc::new(StandardRegistry::new());
	let registry = ExtensibleRegistry::new(Arc::clone(&standard));

	let children = [StubPolicy::new("p", ExtendedDecision::Permit)];
	let evaluator = registry
		.evaluator(ids::POLICY_FIRST_APPLICABLE, &[], as_policies(&children).into())
		.unwrap();

	assert!(evaluator.evaluate(&TestContext, Tracking::Enabled).is_permit());
	assert!(registry.get(ids::LEGACY_POLICY_DENY_OVERRIDES).unwrap().is_legacy());
}

// ============================================================================
// Policy trees
// ============================================================================

fn rule_policy(
	registry: &StandardRegistry,
	id: &str,
	algorithm: &str,
	rules: &[StubRule],
) -> Arc<dyn Policy> {
	Arc::new(
		CombiningPolicy::build(
			registry,
			PolicyRef::policy(id),
			algorithm,
			&[],
			as_rules(rules).into(),
		)
		.unwrap(),
	)
}

#[test]
fn nested_policy_set_lists_contributing_policies() {
	let registry = StandardRegistry::new();
	let admins = rule_policy(
		&registry,
		"admins",
		ids::RULE_PERMIT_OVERRIDES,
		&[StubRule::new("admin", Effect::Permit, RuleOutcome::Applies)
			.with_obligation("audit-admin")],
	);
	let owners = rule_policy(
		&registry,
		"owners",
		ids::RULE_FIRST_APPLICABLE,
		&[StubRule::new("owner", Effect::Permit, RuleOutcome::Applies)
			.with_obligation("audit-owner")],
	);
	let blocked = rule_policy(
		&registry,
		"blocked",
		ids::RULE_DENY_OVERRIDES,
		&[StubRule::new("blocked", Effect::Deny, RuleOutcome::DoesNotApply)],
	);

	let root = CombiningPolicy::build(
		&registry,
		PolicyRef::policy_set("root"),
		ids::POLICY_DENY_UNLESS_PERMIT,
		&[],
		vec![blocked, admins, owners].into(),
	)
	.unwrap();

	let result = root.evaluate(&TestContext);

	assert!(result.is_permit());
	assert_eq!(obligation_ids(&result), vec!["audit-admin"]);
	assert_eq!(policy_ids(&result), vec!["root", "admins"]);
}

#[test]
fn evaluator_is_shared_across_threads() {
	let registry = StandardRegistry::new();
	let children = [
		StubPolicy::new("permit", ExtendedDecision::Permit),
		StubPolicy::new(
			"failing",
			ExtendedDecision::Indeterminate(ExtendedIndeterminate::Permit),
		),
		StubPolicy::new("deny", ExtendedDecision::Deny),
	];
	let evaluator = registry
		.evaluator(ids::POLICY_DENY_OVERRIDES, &[], as_policies(&children).into())
		.unwrap();

	std::thread::scope(|scope| {
		for _ in 0..8 {
			let evaluator = Arc::clone(&evaluator);
			scope.spawn(move || {
				for _ in 0..100 {
					let result = evaluator.evaluate(&TestContext, Tracking::Enabled);
					assert!(result.is_deny());
					assert_eq!(obligation_ids(&result), vec!["ob-deny"]);
					assert_eq!(policy_ids(&result), vec!["deny"]);
				}
			});
		}
	});

	assert_eq!(children[2].evaluations(), 800);
}

// ============================================================================
// Untracked evaluation
// ============================================================================

const RULE_ALGORITHMS: [&str; 7] = [
	ids::RULE_DENY_OVERRIDES,
	ids::RULE_ORDERED_DENY_OVERRIDES,
	ids::RULE_PERMIT_OVERRIDES,
	ids::RULE_ORDERED_PERMIT_OVERRIDES,
	ids::RULE_DENY_UNLESS_PERMIT,
	ids::RULE_PERMIT_UNLESS_DENY,
	ids::RULE_FIRST_APPLICABLE,
];

#[test]
fn untracked_rule_sets_never_return_a_tracked_list() {
	let registry = StandardRegistry::new();

	for algorithm in RULE_ALGORITHMS {
		for outcome in [RuleOutcome::DoesNotApply, RuleOutcome::Fails] {
			let rules = [StubRule::new("r", Effect::Deny, outcome)];
			let evaluator = registry
				.evaluator(algorithm, &[], as_rules(&rules).into())
				.unwrap();

			let result = evaluator.evaluate(&TestContext, Tracking::Disabled);

			assert!(
				!result.applicable_policies().is_tracking(),
				"{algorithm} with {outcome:?} gave a tracked {}",
				result.extended_decision()
			);
		}
	}
}

#[test]
fn untracked_policy_tree_collects_nothing() {
	let registry = StandardRegistry::new();
	let admins = rule_policy(
		&registry,
		"admins",
		ids::RULE_PERMIT_OVERRIDES,
		&[StubRule::new("admin", Effect::Permit, RuleOutcome::Applies)],
	);
	let root = CombiningPolicy::build(
		&registry,
		PolicyRef::policy_set("root"),
		ids::POLICY_DENY_OVERRIDES,
		&[],
		vec![admins].into(),
	)
	.unwrap();

	let tracked = root.evaluate(&TestContext);
	let untracked = root.evaluate_with(&TestContext, Tracking::Disabled);

	assert_eq!(policy_ids(&tracked), vec!["root", "admins"]);
	assert!(untracked.is_permit());
	assert!(!untracked.applicable_policies().is_tracking());
}
