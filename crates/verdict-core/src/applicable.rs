// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Applicable policy tracking.
//!
//! The applicable-policy list is an audit trail of which policies and policy sets
//! contributed to a decision. Callers that do not need it pass [`Tracking::Disabled`],
//! in which case [`ApplicablePolicyIds`] is a sentinel whose mutators do nothing and no
//! identifiers are cloned.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a referenced policy element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
	Policy,
	PolicySet,
}

/// Reference to a policy or policy set that was used in evaluating a decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyRef {
	pub kind: PolicyKind,
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
}

impl PolicyRef {
	pub fn policy(id: impl Into<String>) -> Self {
		Self {
			kind: PolicyKind::Policy,
			id: id.into(),
			version: None,
		}
	}

	pub fn policy_set(id: impl Into<String>) -> Self {
		Self {
			kind: PolicyKind::PolicySet,
			id: id.into(),
			version: None,
		}
	}

	/// Builder: set version.
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}
}

impl fmt::Display for PolicyRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.version {
			Some(version) => write!(f, "{}@{}", self.id, version),
			None => f.write_str(&self.id),
		}
	}
}

/// Whether the caller wants applicable policies recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracking {
	#[default]
	Enabled,
	Disabled,
}

impl Tracking {
	pub fn is_enabled(self) -> bool {
		matches!(self, Tracking::Enabled)
	}
}

impl From<bool> for Tracking {
	fn from(enabled: bool) -> Self {
		if enabled {
			Tracking::Enabled
		} else {
			Tracking::Disabled
		}
	}
}

/// Ordered list of policies that contributed to a decision, or the "not tracked" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicablePolicyIds(Option<Vec<PolicyRef>>);

impl Default for ApplicablePolicyIds {
	fn default() -> Self {
		Self::tracked()
	}
}

impl ApplicablePolicyIds {
	/// An empty list that records pushes.
	pub fn tracked() -> Self {
		Self(Some(Vec::new()))
	}

	/// The sentinel: pushes and extends are ignored.
	pub fn untracked() -> Self {
		Self(None)
	}

	pub fn for_tracking(tracking: Tracking) -> Self {
		match tracking {
			Tracking::Enabled => Self::tracked(),
			Tracking::Disabled => Self::untracked(),
		}
	}

	pub fn from_refs(refs: Vec<PolicyRef>) -> Self {
		Self(Some(refs))
	}

	pub fn is_tracking(&self) -> bool {
		self.0.is_some()
	}

	pub fn tracking(&self) -> Tracking {
		Tracking::from(self.is_tracking())
	}

	pub fn push(&mut self, policy: PolicyRef) {
		if let Some(ids) = &mut self.0 {
			ids.push(policy);
		}
	}

	/// Inserts `policy` ahead of the existing references.
	pub fn prepend(&mut self, policy: PolicyRef) {
		if let Some(ids) = &mut self.0 {
			ids.insert(0, policy);
		}
	}

	/// Appends `other`'s references; a no-op when this list is the sentinel.
	pub fn extend_from(&mut self, other: &ApplicablePolicyIds) {
		if let (Some(ids), Some(more)) = (&mut self.0, &other.0) {
			ids.extend(more.iter().cloned());
		}
	}

	/// Drops all references if `tracking` is disabled, otherwise returns self unchanged.
	pub fn restrict_to(self, tracking: Tracking) -> Self {
		match tracking {
			Tracking::Enabled => self,
			Tracking::Disabled => Self::untracked(),
		}
	}

	pub fn as_slice(&self) -> &[PolicyRef] {
		self.0.as_deref().unwrap_or(&[])
	}

	pub fn iter(&self) -> std::slice::Iter<'_, PolicyRef> {
		self.as_slice().iter()
	}

	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	pub fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}

	pub fn into_vec(self) -> Vec<PolicyRef> {
		self.0.unwrap_or_default()
	}
}

impl<'a> IntoIterator for &'a ApplicablePolicyIds {
	type Item = &'a PolicyRef;
	type IntoIter = std::slice::Iter<'a, PolicyRef>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
