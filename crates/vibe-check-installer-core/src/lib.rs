// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the vibe-check configuration installer.
//!
//! This crate owns the pieces of the installer that never touch the disk:
//! - [`ManagedEntry`]: how a client should launch the vibe-check server
//! - [`MergeOptions`]: identity, ownership sentinel and transport for one run
//! - [`merge_managed_entry`]: the ownership-aware merge of a desired entry
//!   into a client's configuration document
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vibe_check_installer_core::{merge_managed_entry, ConfigDocument, MergeOptions};
//!
//! let document: ConfigDocument = serde_json::from_value(json!({ "theme": "dark" })).unwrap();
//! let desired = json!({ "command": "npx", "args": ["-y", "@pv-bhat/vibe-check-mcp"] });
//! let options = MergeOptions::new("vibe-check", "vibe-check-mcp");
//!
//! let result = merge_managed_entry(&document, desired.as_object().unwrap(), &options, "mcpServers")
//! 	.unwrap();
//! assert!(result.changed());
//! assert_eq!(result.document["theme"], "dark");
//! ```

pub mod entry;
pub mod error;
pub mod merge;

pub use entry::{
	DevOptions, EntryShape, ManagedEntry, MergeOptions, Transport, DEFAULT_ENTRY_ID, DEFAULT_SENTINEL,
	MANAGED_BY_KEY,
};
pub use error::MergeError;
pub use merge::{merge_managed_entry, tagged_entry, MergeResult, MergeStatus};

/// A client configuration file: always a JSON object at the top level.
pub type ConfigDocument = serde_json::Map<String, serde_json::Value>;
