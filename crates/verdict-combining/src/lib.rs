// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XACML combining algorithms for the Verdict policy decision point.
//!
//! A policy or policy set combines the decisions of its children (rules, or nested
//! policies and policy sets) with a combining algorithm named by identifier. This
//! crate provides:
//!
//! - The [`Decidable`], [`Rule`] and [`Policy`] contracts children implement
//! - Evaluators for deny-overrides, permit-overrides (and their ordered variants),
//!   deny-unless-permit, permit-unless-deny, first-applicable and only-one-applicable
//! - [`StandardRegistry`], built once per PDP and shared, plus [`ExtensibleRegistry`]
//!   for custom algorithms
//! - [`CombiningPolicy`], a ready-made policy node binding an algorithm to children
//!
//! Unknown algorithms, legacy XACML 1.x identifiers and rule/policy mismatches are
//! [`CombiningError`]s raised while building; evaluation itself never fails and reports
//! problems as Indeterminate results.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use verdict_combining::{
//!     ids, AlgorithmRegistry, Decidable, EvaluationContext, Rule, StandardRegistry, Tracking,
//! };
//! use verdict_core::{DecisionResult, Effect};
//!
//! #[derive(Debug)]
//! struct AllowAll;
//!
//! impl Decidable for AllowAll {
//!     fn evaluate(&self, _ctx: &dyn EvaluationContext) -> DecisionResult {
//!         DecisionResult::permit()
//!     }
//! }
//!
//! impl Rule for AllowAll {
//!     fn id(&self) -> &str { "allow-all" }
//!     fn effect(&self) -> Effect { Effect::Permit }
//!     fn is_always_applicable(&self) -> bool { true }
//!     fn has_pep_actions(&self) -> bool { false }
//! }
//!
//! struct Request;
//! impl EvaluationContext for Request {}
//!
//! let registry = StandardRegistry::new();
//! let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(AllowAll)];
//! let evaluator = registry
//!     .evaluator(ids::RULE_DENY_OVERRIDES, &[], rules.into())
//!     .unwrap();
//!
//! assert!(evaluator.evaluate(&Request, Tracking::Enabled).is_permit());
//! ```

pub mod algorithms;
mod combiner;
pub mod decidable;
pub mod error;
pub mod evaluator;
pub mod node;
pub mod options;
pub mod registry;

#[cfg(test)]
mod testing;

pub use algorithms::{
	ids, AlgorithmKind, FirstApplicableEvaluator, OnlyOneApplicableEvaluator,
	OrderPreservingOverridesEvaluator, OverridingEffectFirstEvaluator, UnlessEvaluator,
	TOO_MANY_APPLICABLE_POLICIES,
};
pub use decidable::{
	Applicability, CombinedElementType, CombinedElements, Decidable, EvaluationContext, Policy,
	Rule,
};
pub use error::{CombiningError, Result};
pub use evaluator::{ConstantEvaluator, Evaluator};
pub use node::CombiningPolicy;
pub use options::CombiningOptions;
pub use registry::{
	AlgorithmRegistry, CombiningAlgorithm, CombiningAlgorithmExtension, ExtensibleRegistry,
	StandardRegistry,
};
pub use verdict_core::Tracking;
