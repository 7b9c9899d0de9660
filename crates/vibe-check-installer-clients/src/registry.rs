// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;

use crate::adapter::ClientAdapter;
use crate::clients::{ClaudeCode, ClaudeDesktop, Cursor, VsCode, Windsurf};

/// Client adapters keyed by their `--client` name.
pub struct ClientRegistry {
	clients: BTreeMap<&'static str, Box<dyn ClientAdapter>>,
}

impl ClientRegistry {
	pub fn new() -> Self {
		Self {
			clients: BTreeMap::new(),
		}
	}

	/// Registry with every built-in client.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.register(Box::new(ClaudeDesktop));
		registry.register(Box::new(ClaudeCode));
		registry.register(Box::new(Cursor));
		registry.register(Box::new(Windsurf));
		registry.register(Box::new(VsCode));
		registry
	}

	pub fn register(&mut self, client: Box<dyn ClientAdapter>) {
		let name = client.name();
		tracing::debug!(client = %name, "registering client adapter");
		self.clients.insert(name, client);
	}

	/// Look up a client by name, ignoring case and surrounding whitespace.
	pub fn get(&self, name: &str) -> Option<&dyn ClientAdapter> {
		let key = name.trim().to_ascii_lowercase();
		self.clients.get(key.as_str()).map(|c| c.as_ref())
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> Vec<&'static str> {
		self.clients.keys().copied().collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &dyn ClientAdapter> {
		self.clients.values().map(|c| c.as_ref())
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}

impl Default for ClientRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}
