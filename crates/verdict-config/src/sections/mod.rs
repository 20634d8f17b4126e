// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod combining;
mod logging;

pub use combining::{CombiningConfig, CombiningConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
