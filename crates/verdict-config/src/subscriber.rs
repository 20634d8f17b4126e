// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracing subscriber installation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::ConfigError;
use crate::sections::{LogFormat, LoggingConfig};

/// Builds the filter: `RUST_LOG` if set, otherwise the configured level.
///
/// An unparsable `RUST_LOG` is an error rather than a silent fallback.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
	match std::env::var(EnvFilter::DEFAULT_ENV) {
		Ok(directives) => filter_from(Some(&directives), config),
		Err(std::env::VarError::NotPresent) => filter_from(None, config),
		Err(e) => Err(ConfigError::InvalidValue {
			key: EnvFilter::DEFAULT_ENV.to_string(),
			message: e.to_string(),
		}),
	}
}

fn filter_from(rust_log: Option<&str>, config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
	match rust_log.filter(|directives| !directives.trim().is_empty()) {
		Some(directives) => {
			EnvFilter::try_new(directives).map_err(|e| ConfigError::InvalidValue {
				key: EnvFilter::DEFAULT_ENV.to_string(),
				message: e.to_string(),
			})
		}
		None => EnvFilter::try_new(&config.level).map_err(|e| ConfigError::InvalidValue {
			key: "logging.level".to_string(),
			message: e.to_string(),
		}),
	}
}

/// Installs the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
	let filter = env_filter(config)?;
	let registry = tracing_subscriber::registry().with(filter);

	let result = match config.format {
		LogFormat::Text => registry.with(fmt::layer()).try_init(),
		LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
	};

	result.map_err(|e| ConfigError::Logging(e.to_string()))
}
