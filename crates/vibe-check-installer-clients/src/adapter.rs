// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use vibe_check_installer_config::{locate, read_config, write_atomic, LocateEnv, StoreError};
use vibe_check_installer_core::{
	merge_managed_entry, ConfigDocument, EntryShape, ManagedEntry, MergeError, MergeOptions,
	MergeResult, Transport,
};

/// Provider keys the vibe-check server reads at runtime. At least one must be set.
pub const CREDENTIAL_ENV_KEYS: &[&str] = &[
	"GEMINI_API_KEY",
	"OPENAI_API_KEY",
	"OPENROUTER_API_KEY",
	"ANTHROPIC_API_KEY",
];

/// Static, user-facing description of a client.
#[derive(Debug, Clone)]
pub struct ClientDescriptor {
	/// Registry key, as passed to `--client`.
	pub name: &'static str,
	pub display_name: &'static str,
	/// Where the config usually lives, for humans.
	pub path_hint: &'static str,
	pub transports: &'static [Transport],
	pub default_transport: Transport,
	pub required_env_keys: &'static [&'static str],
	pub notes: &'static str,
	pub docs_url: &'static str,
}

impl ClientDescriptor {
	pub fn supports(&self, transport: Transport) -> bool {
		self.transports.contains(&transport)
	}
}

/// One supported application.
///
/// Implementations usually only provide [`describe`](Self::describe) and
/// [`candidate_paths`](Self::candidate_paths) and override the collection key
/// or entry shape where the application differs.
pub trait ClientAdapter: Send + Sync {
	fn describe(&self) -> &'static ClientDescriptor;

	/// Default locations, most preferred first.
	fn candidate_paths(&self, env: &LocateEnv) -> Vec<PathBuf>;

	fn name(&self) -> &'static str {
		self.describe().name
	}

	/// Top-level key holding the server entries.
	fn collection_key(&self) -> &'static str {
		"mcpServers"
	}

	fn entry_shape(&self) -> EntryShape {
		EntryShape::Flat
	}

	/// Render the entry payload this client expects.
	fn shape_entry(&self, entry: &ManagedEntry) -> Map<String, Value> {
		entry.payload(self.entry_shape())
	}

	fn locate(&self, custom: Option<&Path>, env: &LocateEnv) -> Option<PathBuf> {
		locate(custom, &self.candidate_paths(env), env)
	}

	fn read(&self, path: &Path, raw: Option<&str>) -> Result<ConfigDocument, StoreError> {
		read_config(path, raw, self.describe().display_name)
	}

	fn merge<'a>(
		&self,
		document: &'a ConfigDocument,
		entry: &ManagedEntry,
		options: &MergeOptions,
	) -> Result<MergeResult<'a>, MergeError> {
		merge_managed_entry(
			document,
			&self.shape_entry(entry),
			options,
			self.collection_key(),
		)
	}

	fn write_atomic(&self, path: &Path, document: &ConfigDocument) -> Result<(), StoreError> {
		write_atomic(path, document)
	}

	/// One-click install link, for clients that register a URL handler.
	fn quick_install_link(&self, _id: &str, _entry: &Map<String, Value>) -> Option<String> {
		None
	}
}
