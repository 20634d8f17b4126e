// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Combining-algorithm registries.
//!
//! [`StandardRegistry`] is built once with every standard algorithm and the legacy
//! identifiers, then shared read-only (usually behind an `Arc`) by whatever builds
//! policy trees. Custom algorithms go in an [`ExtensibleRegistry`] layered on top of it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};
use verdict_core::CombinerParameter;

use crate::algorithms::{ids, AlgorithmKind};
use crate::decidable::{CombinedElementType, CombinedElements};
use crate::error::{CombiningError, Result};
use crate::evaluator::Evaluator;
use crate::options::CombiningOptions;

/// A non-standard combining algorithm.
pub trait CombiningAlgorithmExtension: Send + Sync + fmt::Debug {
	fn id(&self) -> &str;

	fn element_type(&self) -> CombinedElementType;

	/// Builds the evaluator for one policy node. `children` always match
	/// [`element_type`](Self::element_type).
	fn evaluator(
		&self,
		params: &[CombinerParameter],
		children: CombinedElements,
	) -> Result<Arc<dyn Evaluator>>;
}

/// A registered algorithm.
#[derive(Debug, Clone)]
pub enum CombiningAlgorithm {
	Standard {
		id: &'static str,
		kind: AlgorithmKind,
		element_type: CombinedElementType,
	},
	/// A pre-3.0 identifier. Building an evaluator always fails.
	Legacy {
		id: &'static str,
		element_type: CombinedElementType,
	},
	Extension(Arc<dyn CombiningAlgorithmExtension>),
}

impl CombiningAlgorithm {
	pub fn id(&self) -> &str {
		match self {
			CombiningAlgorithm::Standard { id, .. } | CombiningAlgorithm::Legacy { id, .. } => id,
			CombiningAlgorithm::Extension(extension) => extension.id(),
		}
	}

	pub fn element_type(&self) -> CombinedElementType {
		match self {
			CombiningAlgorithm::Standard { element_type, .. }
			| CombiningAlgorithm::Legacy { element_type, .. } => *element_type,
			CombiningAlgorithm::Extension(extension) => extension.element_type(),
		}
	}

	pub fn is_legacy(&self) -> bool {
		matches!(self, CombiningAlgorithm::Legacy { .. })
	}

	/// Builds the evaluator bound to `children`.
	///
	/// Fails for legacy identifiers and when `children` are of the wrong element type.
	#[instrument(
		level = "debug",
		skip(self, params, children, options),
		fields(algorithm = %self.id(), children = children.len())
	)]
	pub fn evaluator(
		&self,
		params: &[CombinerParameter],
		children: CombinedElements,
		options: &CombiningOptions,
	) -> Result<Arc<dyn Evaluator>> {
		let expected = self.element_type();
		let actual = children.element_type();
		if expected != actual {
			return Err(CombiningError::ElementTypeMismatch {
				id: self.id().to_string(),
				expected,
				actual,
			});
		}

		match self {
			CombiningAlgorithm::Legacy { id, .. } => {
				warn!(algorithm = id, "legacy combining algorithm rejected");
				Err(CombiningError::UnsupportedLegacyAlgorithm { id: id.to_string() })
			}
			CombiningAlgorithm::Standard { id, kind, .. } => {
				if !params.is_empty() && options.warn_on_ignored_parameters {
					let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
					warn!(
						algorithm = id,
						parameters = ?names,
						"combiner parameters ignored by standard algorithm"
					);
				}
				let evaluator = kind.build(id, children, options)?;
				debug!(algorithm = id, "evaluator built");
				Ok(evaluator)
			}
			CombiningAlgorithm::Extension(extension) => extension.evaluator(params, children),
		}
	}
}

/// Lookup of combining algorithms by identifier.
pub trait AlgorithmRegistry: Send + Sync + fmt::Debug {
	fn get(&self, id: &str) -> Result<&CombiningAlgorithm>;

	fn add_extension(&mut self, extension: Arc<dyn CombiningAlgorithmExtension>) -> Result<()>;

	fn options(&self) -> &CombiningOptions;

	/// Resolves `id` and builds its evaluator for `children`.
	fn evaluator(
		&self,
		id: &str,
		params: &[CombinerParameter],
		children: CombinedElements,
	) -> Result<Arc<dyn Evaluator>> {
		self.get(id)?.evaluator(params, children, self.options())
	}
}

/// Every standard algorithm plus the rejected legacy identifiers. Immutable.
#[derive(Debug)]
pub struct StandardRegistry {
	algorithms: HashMap<&'static str, CombiningAlgorithm>,
	options: CombiningOptions,
}

impl StandardRegistry {
	pub fn new() -> Self {
		Self::with_options(CombiningOptions::default())
	}

	pub fn with_options(options: CombiningOptions) -> Self {
		let mut algorithms = HashMap::new();

		for kind in AlgorithmKind::ALL {
			for element_type in [CombinedElementType::Rule, CombinedElementType::Policy] {
				if let Some(id) = kind.id(element_type) {
					algorithms.insert(
						id,
						CombiningAlgorithm::Standard {
							id,
							kind,
							element_type,
						},
					);
				}
			}
		}

		for (id, element_type) in ids::LEGACY {
			algorithms.insert(id, CombiningAlgorithm::Legacy { id, element_type });
		}

		debug!(
			algorithms = algorithms.len(),
			optimize_rule_order = options.optimize_rule_order,
			"standard combining algorithm registry built"
		);

		Self {
			algorithms,
			options,
		}
	}

	pub fn contains(&self, id: &str) -> bool {
		self.algorithms.contains_key(id)
	}

	pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.algorithms.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.algorithms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.algorithms.is_empty()
	}
}

impl Default for StandardRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl AlgorithmRegistry for StandardRegistry {
	fn get(&self, id: &str) -> Result<&CombiningAlgorithm> {
		self.algorithms
			.get(id)
			.ok_or_else(|| CombiningError::UnknownAlgorithm { id: id.to_string() })
	}

	fn add_extension(&mut self, extension: Arc<dyn CombiningAlgorithmExtension>) -> Result<()> {
		Err(CombiningError::RegistryImmutable {
			id: extension.id().to_string(),
		})
	}

	fn options(&self) -> &CombiningOptions {
		&self.options
	}
}

/// Custom algorithms on top of a shared [`StandardRegistry`].
#[derive(Debug)]
pub struct ExtensibleRegistry {
	standard: Arc<StandardRegistry>,
	extensions: HashMap<String, CombiningAlgorithm>,
}

impl ExtensibleRegistry {
	pub fn new(standard: Arc<StandardRegistry>) -> Self {
		Self {
			standard,
			extensions: HashMap::new(),
		}
	}

	pub fn standard(&self) -> &Arc<StandardRegistry> {
		&self.standard
	}

	pub fn extension_count(&self) -> usize {
		self.extensions.len()
	}
}

impl AlgorithmRegistry for ExtensibleRegistry {
	fn get(&self, id: &str) -> Result<&CombiningAlgorithm> {
		if let Ok(algorithm) = self.standard.get(id) {
			return Ok(algorithm);
		}
		self.extensions
			.get(id)
			.ok_or_else(|| CombiningError::UnknownAlgorithm { id: id.to_string() })
	}

	fn add_extension(&mut self, extension: Arc<dyn CombiningAlgorithmExtension>) -> Result<()> {
		let id = extension.id().to_string();
		if self.standard.contains(&id) || self.extensions.contains_key(&id) {
			return Err(CombiningError::DuplicateAlgorithm { id });
		}
		debug!(
			algorithm = %id,
			element_type = %extension.element_type(),
			"combining algorithm extension registered"
		);
		self.extensions
			.insert(id, CombiningAlgorithm::Extension(extension));
		Ok(())
	}

	fn options(&self) -> &CombiningOptions {
		self.standard.options()
	}
}
