// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Managed entry and merge option types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Field carrying the ownership sentinel on every managed entry.
pub const MANAGED_BY_KEY: &str = "managedBy";

/// Identifier the installer registers the server under unless overridden.
pub const DEFAULT_ENTRY_ID: &str = "vibe-check-mcp";

/// Sentinel tagging entries this installer owns.
pub const DEFAULT_SENTINEL: &str = "vibe-check-mcp";

/// How the client talks to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
	/// Client spawns the server and speaks over stdin/stdout.
	Stdio,
	/// Server listens on a local HTTP port.
	Http,
}

impl Transport {
	pub fn as_str(&self) -> &'static str {
		match self {
			Transport::Stdio => "stdio",
			Transport::Http => "http",
		}
	}
}

impl fmt::Display for Transport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Development flags for editor-style clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevOptions {
	pub watch: bool,
	pub debug: Option<String>,
}

impl DevOptions {
	/// True when no development behaviour was requested.
	pub fn is_empty(&self) -> bool {
		!self.watch && self.debug.is_none()
	}

	fn to_value(&self) -> Value {
		let mut dev = Map::new();
		if self.watch {
			dev.insert("watch".to_string(), Value::Bool(true));
		}
		if let Some(debug) = &self.debug {
			dev.insert("debug".to_string(), Value::String(debug.clone()));
		}
		Value::Object(dev)
	}
}

/// Per-invocation merge options. Built fresh from CLI flags on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
	/// Key of the entry inside the client's collection.
	pub id: String,
	/// Value written to `managedBy`; the only proof of ownership.
	pub sentinel: String,
	pub transport: Transport,
	pub url: Option<String>,
	pub dev: Option<DevOptions>,
}

impl MergeOptions {
	pub fn new(id: impl Into<String>, sentinel: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			sentinel: sentinel.into(),
			transport: Transport::Stdio,
			url: None,
			dev: None,
		}
	}

	pub fn with_transport(mut self, transport: Transport, url: Option<String>) -> Self {
		self.transport = transport;
		self.url = url;
		self
	}

	pub fn with_dev(mut self, dev: DevOptions) -> Self {
		self.dev = if dev.is_empty() { None } else { Some(dev) };
		self
	}
}

impl Default for MergeOptions {
	fn default() -> Self {
		Self::new(DEFAULT_ENTRY_ID, DEFAULT_SENTINEL)
	}
}

/// Shape a client expects its entries in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
	/// `{command, args, env}` only.
	Flat,
	/// Flat fields plus `transport`, `url` for network transports, and `dev`
	/// when development flags were requested.
	Editor,
}

/// How a client should launch the vibe-check server.
///
/// The sentinel is deliberately absent: ownership is attached by the merge
/// engine, never by whoever builds the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedEntry {
	pub command: String,
	pub args: Vec<String>,
	pub env: BTreeMap<String, String>,
	pub transport: Transport,
	pub url: Option<String>,
	pub dev: Option<DevOptions>,
}

impl ManagedEntry {
	/// Build an entry for the transport and dev flags carried by `options`.
	pub fn from_options(
		options: &MergeOptions,
		command: impl Into<String>,
		args: Vec<String>,
		env: BTreeMap<String, String>,
	) -> Self {
		Self {
			command: command.into(),
			args,
			env,
			transport: options.transport,
			url: options.url.clone(),
			dev: options.dev.clone(),
		}
	}

	/// Render the JSON payload for a given client shape.
	pub fn payload(&self, shape: EntryShape) -> Map<String, Value> {
		let mut payload = Map::new();
		payload.insert("command".to_string(), json!(self.command));
		payload.insert("args".to_string(), json!(self.args));
		payload.insert("env".to_string(), json!(self.env));

		if shape == EntryShape::Editor {
			payload.insert("transport".to_string(), json!(self.transport));
			if self.transport == Transport::Http {
				if let Some(url) = &self.url {
					payload.insert("url".to_string(), json!(url));
				}
			}
			if let Some(dev) = self.dev.as_ref().filter(|d| !d.is_empty()) {
				payload.insert("dev".to_string(), dev.to_value());
			}
		}

		payload
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry(transport: Transport, url: Option<&str>, dev: Option<DevOptions>) -> ManagedEntry {
		let options = MergeOptions::default()
			.with_transport(transport, url.map(str::to_string))
			.with_dev(dev.unwrap_or_default());
		ManagedEntry::from_options(
			&options,
			"npx",
			vec!["-y".to_string(), "@pv-bhat/vibe-check-mcp".to_string()],
			BTreeMap::new(),
		)
	}

	#[test]
	fn flat_payload_has_only_launch_fields() {
		let payload = entry(Transport::Http, Some("http://127.0.0.1:2091/mcp"), None)
			.payload(EntryShape::Flat);

		let keys: Vec<_> = payload.keys().cloned().collect();
		assert_eq!(keys, vec!["command", "args", "env"]);
	}

	#[test]
	fn editor_payload_omits_url_for_stdio() {
		let payload = entry(Transport::Stdio, Some("http://ignored"), None).payload(EntryShape::Editor);

		assert_eq!(payload["transport"], "stdio");
		assert!(!payload.contains_key("url"));
		assert!(!payload.contains_key("dev"));
	}

	#[test]
	fn editor_payload_includes_url_for_http() {
		let payload = entry(Transport::Http, Some("http://127.0.0.1:2091/mcp"), None)
			.payload(EntryShape::Editor);

		assert_eq!(payload["transport"], "http");
		assert_eq!(payload["url"], "http://127.0.0.1:2091/mcp");
	}

	#[test]
	fn editor_payload_includes_only_requested_dev_fields() {
		let dev = DevOptions {
			watch: false,
			debug: Some("node".to_string()),
		};
		let payload = entry(Transport::Stdio, None, Some(dev)).payload(EntryShape::Editor);

		assert_eq!(payload["dev"], json!({ "debug": "node" }));
	}

	#[test]
	fn empty_dev_options_are_dropped() {
		let options = MergeOptions::default().with_dev(DevOptions::default());
		assert!(options.dev.is_none());
	}

	#[test]
	fn transport_serializes_lowercase() {
		assert_eq!(serde_json::to_value(Transport::Http).unwrap(), json!("http"));
		assert_eq!(Transport::Stdio.to_string(), "stdio");
	}
}
