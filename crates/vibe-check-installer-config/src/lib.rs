// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locating and storing client configuration files.
//!
//! This crate provides:
//! - Platform-aware resolution of client config paths ([`LocateEnv`], [`locate`])
//! - Validated reads of JSON object documents ([`read_config`])
//! - Atomic, durable writes through a same-directory temp file ([`write_atomic`])

pub mod error;
pub mod paths;
pub mod store;

pub use error::StoreError;
pub use paths::{expand_home, locate, LocateEnv, OsFamily};
pub use store::{read_config, to_pretty_json, write_atomic};
