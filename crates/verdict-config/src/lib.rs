// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Verdict policy decision point.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Consistent environment variable naming (`VERDICT_*`)
//! - Tracing subscriber setup from the `[logging]` section
//! - Construction of the shared combining-algorithm registry from the `[combining]` section
//!
//! # Usage
//!
//! ```ignore
//! use verdict_config::{init_tracing, load_config};
//!
//! let config = load_config()?;
//! init_tracing(&config.logging)?;
//! let registry = std::sync::Arc::new(config.standard_registry());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;
pub mod subscriber;

pub use error::ConfigError;
pub use layer::EngineConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};
pub use subscriber::init_tracing;

use tracing::{debug, info};
use verdict_combining::{CombiningOptions, StandardRegistry};

/// Fully resolved engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
	pub combining: CombiningConfig,
	pub logging: LoggingConfig,
}

impl EngineConfig {
	pub fn combining_options(&self) -> CombiningOptions {
		CombiningOptions::from(&self.combining)
	}

	/// Builds the standard registry with the configured options.
	pub fn standard_registry(&self) -> StandardRegistry {
		StandardRegistry::with_options(self.combining_options())
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`VERDICT_*`)
/// 2. Config file (`/etc/verdict/pdp.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<EngineConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

/// Load configuration from environment only.
pub fn load_config_from_env() -> Result<EngineConfig, ConfigError> {
	let mut merged = EngineConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<EngineConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<EngineConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = EngineConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: EngineConfigLayer) -> Result<EngineConfig, ConfigError> {
	let combining = layer.combining.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&logging)?;

	info!(
		track_applicable_policies = combining.track_applicable_policies,
		optimize_rule_order = combining.optimize_rule_order,
		log_level = %logging.level,
		log_format = %logging.format,
		"Engine configuration loaded"
	);

	Ok(EngineConfig { combining, logging })
}

fn validate_config(logging: &LoggingConfig) -> Result<(), ConfigError> {
	if logging.level.trim().is_empty() {
		return Err(ConfigError::Validation(
			"logging.level must not be empty".to_string(),
		));
	}

	Ok(())
}
