// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decision model for the Verdict policy decision point.
//!
//! This crate provides the result algebra shared by rules, policies, policy sets and
//! the combining algorithms that reduce them (`verdict-combining`):
//!
//! - [`Decision`] / [`ExtendedDecision`]: Permit, Deny, NotApplicable, Indeterminate{..}
//! - [`ExtendedIndeterminate`]: the `{}`, `{D}`, `{P}`, `{DP}` sub-kinds and their union
//! - [`PepActions`]: obligations and advice in accumulation order
//! - [`ApplicablePolicyIds`]: the audit trail of contributing policies, or a sentinel
//!   when the caller does not track it
//! - [`DecisionResult`]: everything above bundled as one value
//!
//! # Example
//!
//! ```
//! use verdict_core::{
//!     DecisionResult, ExtendedIndeterminate, Obligation, PepActions, PolicyRef, Status,
//! };
//!
//! let permit = DecisionResult::permit()
//!     .with_pep_actions(PepActions::new().with_obligation(Obligation::new("audit")))
//!     .with_applicable_policy(PolicyRef::policy("urn:example:policy:documents"));
//! assert!(permit.is_permit());
//!
//! let failed = DecisionResult::indeterminate(
//!     ExtendedIndeterminate::Deny,
//!     Status::missing_attribute("subject role"),
//! );
//! assert!(failed.pep_actions().is_empty());
//! ```

pub mod applicable;
pub mod decision;
pub mod error;
pub mod pep;
pub mod result;
pub mod status;

pub use applicable::{ApplicablePolicyIds, PolicyKind, PolicyRef, Tracking};
pub use decision::{Decision, Effect, ExtendedDecision, ExtendedIndeterminate};
pub use error::{CoreError, Result};
pub use pep::{Advice, AttributeAssignment, Obligation, PepActions};
pub use result::{CombinerParameter, DecisionResult};
pub use status::{Status, StatusCode};
