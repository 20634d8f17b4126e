// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decision values and the extended-indeterminate algebra.
//!
//! XACML 3.0 refines a plain `Indeterminate` into four sub-kinds that record which
//! determinate outcomes could not be ruled out:
//!
//! - `Indeterminate{}`: neither Deny nor Permit was possible
//! - `Indeterminate{D}`: the element would have been Deny (or NotApplicable), never Permit
//! - `Indeterminate{P}`: the converse
//! - `Indeterminate{DP}`: both remain possible
//!
//! [`ExtendedDecision`] carries the sub-kind only on its `Indeterminate` variant, so a
//! tag attached to a determinate decision cannot be represented.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Terminal decision produced by every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
	Permit,
	Deny,
	NotApplicable,
	Indeterminate,
}

impl Decision {
	pub fn as_str(&self) -> &'static str {
		match self {
			Decision::Permit => "Permit",
			Decision::Deny => "Deny",
			Decision::NotApplicable => "NotApplicable",
			Decision::Indeterminate => "Indeterminate",
		}
	}
}

impl fmt::Display for Decision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Decision {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Permit" => Ok(Decision::Permit),
			"Deny" => Ok(Decision::Deny),
			"NotApplicable" => Ok(Decision::NotApplicable),
			"Indeterminate" => Ok(Decision::Indeterminate),
			other => Err(CoreError::UnknownDecision(other.to_string())),
		}
	}
}

/// Rule effect. Also used by combining algorithms to name their overriding side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
	Permit,
	Deny,
}

impl Effect {
	/// The decision a rule with this effect produces when it applies.
	pub fn decision(self) -> ExtendedDecision {
		match self {
			Effect::Permit => ExtendedDecision::Permit,
			Effect::Deny => ExtendedDecision::Deny,
		}
	}

	pub fn opposite(self) -> Effect {
		match self {
			Effect::Permit => Effect::Deny,
			Effect::Deny => Effect::Permit,
		}
	}

	/// The indeterminate sub-kind of an element with this effect that failed to evaluate.
	pub fn indeterminate(self) -> ExtendedIndeterminate {
		match self {
			Effect::Permit => ExtendedIndeterminate::Permit,
			Effect::Deny => ExtendedIndeterminate::Deny,
		}
	}
}

impl fmt::Display for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Effect::Permit => f.write_str("Permit"),
			Effect::Deny => f.write_str("Deny"),
		}
	}
}

/// Which determinate decisions an Indeterminate result could not rule out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedIndeterminate {
	/// `Indeterminate{}`
	Empty,
	/// `Indeterminate{D}`
	Deny,
	/// `Indeterminate{P}`
	Permit,
	/// `Indeterminate{DP}`
	DenyPermit,
}

impl ExtendedIndeterminate {
	pub fn includes_deny(self) -> bool {
		matches!(
			self,
			ExtendedIndeterminate::Deny | ExtendedIndeterminate::DenyPermit
		)
	}

	pub fn includes_permit(self) -> bool {
		matches!(
			self,
			ExtendedIndeterminate::Permit | ExtendedIndeterminate::DenyPermit
		)
	}

	/// Returns true if this sub-kind leaves the given effect possible.
	pub fn includes(self, effect: Effect) -> bool {
		match effect {
			Effect::Deny => self.includes_deny(),
			Effect::Permit => self.includes_permit(),
		}
	}

	fn from_flags(deny: bool, permit: bool) -> Self {
		match (deny, permit) {
			(false, false) => ExtendedIndeterminate::Empty,
			(true, false) => ExtendedIndeterminate::Deny,
			(false, true) => ExtendedIndeterminate::Permit,
			(true, true) => ExtendedIndeterminate::DenyPermit,
		}
	}

	/// Combines two sub-kinds: the result leaves possible every decision either side did.
	///
	/// `union` is commutative and associative, with `Empty` as identity and
	/// `DenyPermit` as absorbing element.
	pub fn union(self, other: ExtendedIndeterminate) -> ExtendedIndeterminate {
		Self::from_flags(
			self.includes_deny() || other.includes_deny(),
			self.includes_permit() || other.includes_permit(),
		)
	}

	/// Widens this sub-kind with a determinate effect that was also observed.
	pub fn with_effect(self, effect: Effect) -> ExtendedIndeterminate {
		self.union(effect.indeterminate())
	}
}

impl fmt::Display for ExtendedIndeterminate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ExtendedIndeterminate::Empty => f.write_str("{}"),
			ExtendedIndeterminate::Deny => f.write_str("{D}"),
			ExtendedIndeterminate::Permit => f.write_str("{P}"),
			ExtendedIndeterminate::DenyPermit => f.write_str("{DP}"),
		}
	}
}

/// A decision together with its extended-indeterminate sub-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedDecision {
	Permit,
	Deny,
	NotApplicable,
	Indeterminate(ExtendedIndeterminate),
}

impl ExtendedDecision {
	pub fn decision(&self) -> Decision {
		match self {
			ExtendedDecision::Permit => Decision::Permit,
			ExtendedDecision::Deny => Decision::Deny,
			ExtendedDecision::NotApplicable => Decision::NotApplicable,
			ExtendedDecision::Indeterminate(_) => Decision::Indeterminate,
		}
	}

	/// The sub-kind, present only for Indeterminate decisions.
	pub fn extended_indeterminate(&self) -> Option<ExtendedIndeterminate> {
		match self {
			ExtendedDecision::Indeterminate(ext) => Some(*ext),
			_ => None,
		}
	}

	/// The effect this decision represents, if it is Permit or Deny.
	pub fn effect(&self) -> Option<Effect> {
		match self {
			ExtendedDecision::Permit => Some(Effect::Permit),
			ExtendedDecision::Deny => Some(Effect::Deny),
			_ => None,
		}
	}

	pub fn is_indeterminate(&self) -> bool {
		matches!(self, ExtendedDecision::Indeterminate(_))
	}

	pub fn is_not_applicable(&self) -> bool {
		matches!(self, ExtendedDecision::NotApplicable)
	}
}

impl fmt::Display for ExtendedDecision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ExtendedDecision::Indeterminate(ext) => write!(f, "Indeterminate{ext}"),
			other => f.write_str(other.decision().as_str()),
		}
	}
}

impl From<Effect> for ExtendedDecision {
	fn from(effect: Effect) -> Self {
		effect.decision()
	}
}
