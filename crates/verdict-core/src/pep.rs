// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! PEP actions: obligations and advice returned alongside a decision.
//!
//! Both collections are ordered by accumulation and may contain duplicates. The same
//! [`PepActions`] type is used as the mutable accumulator during combination and as the
//! snapshot held by a finished [`crate::DecisionResult`].

use serde::{Deserialize, Serialize};

/// A single attribute assignment carried by an obligation or advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeAssignment {
	pub attribute_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	pub value: serde_json::Value,
}

impl AttributeAssignment {
	pub fn new(attribute_id: impl Into<String>, value: serde_json::Value) -> Self {
		Self {
			attribute_id: attribute_id.into(),
			category: None,
			issuer: None,
			value,
		}
	}

	/// Builder: set category.
	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	/// Builder: set issuer.
	pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
		self.issuer = Some(issuer.into());
		self
	}
}

/// An action the PEP must perform for the decision to be enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
	pub id: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub assignments: Vec<AttributeAssignment>,
}

impl Obligation {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			assignments: Vec::new(),
		}
	}

	/// Builder: append an attribute assignment.
	pub fn with_assignment(mut self, assignment: AttributeAssignment) -> Self {
		self.assignments.push(assignment);
		self
	}
}

/// Supplementary information the PEP may ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
	pub id: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub assignments: Vec<AttributeAssignment>,
}

impl Advice {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			assignments: Vec::new(),
		}
	}

	/// Builder: append an attribute assignment.
	pub fn with_assignment(mut self, assignment: AttributeAssignment) -> Self {
		self.assignments.push(assignment);
		self
	}
}

/// Obligations and advice in accumulation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PepActions {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	obligations: Vec<Obligation>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	advice: Vec<Advice>,
}

impl PepActions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_parts(obligations: Vec<Obligation>, advice: Vec<Advice>) -> Self {
		Self {
			obligations,
			advice,
		}
	}

	pub fn add_obligation(&mut self, obligation: Obligation) {
		self.obligations.push(obligation);
	}

	pub fn add_advice(&mut self, advice: Advice) {
		self.advice.push(advice);
	}

	/// Builder: append an obligation.
	pub fn with_obligation(mut self, obligation: Obligation) -> Self {
		self.add_obligation(obligation);
		self
	}

	/// Builder: append advice.
	pub fn with_advice(mut self, advice: Advice) -> Self {
		self.add_advice(advice);
		self
	}

	/// Appends all of `other`'s obligations and advice after the existing ones.
	pub fn merge(&mut self, other: &PepActions) {
		self.obligations.extend(other.obligations.iter().cloned());
		self.advice.extend(other.advice.iter().cloned());
	}

	/// Like [`merge`](Self::merge) but takes ownership, avoiding clones.
	pub fn merge_owned(&mut self, other: PepActions) {
		if self.is_empty() {
			*self = other;
			return;
		}
		self.obligations.extend(other.obligations);
		self.advice.extend(other.advice);
	}

	pub fn obligations(&self) -> &[Obligation] {
		&self.obligations
	}

	pub fn advice(&self) -> &[Advice] {
		&self.advice
	}

	pub fn is_empty(&self) -> bool {
		self.obligations.is_empty() && self.advice.is_empty()
	}

	pub fn len(&self) -> usize {
		self.obligations.len() + self.advice.len()
	}

	pub fn into_parts(self) -> (Vec<Obligation>, Vec<Advice>) {
		(self.obligations, self.advice)
	}
}
