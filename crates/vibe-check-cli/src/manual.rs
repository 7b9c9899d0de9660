// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Manual setup instructions, shown when a client's config file cannot be found.

use colored::Colorize;
use serde_json::{Map, Value};
use vibe_check_installer_clients::ClientAdapter;
use vibe_check_installer_config::to_pretty_json;
use vibe_check_installer_core::{tagged_entry, ConfigDocument, MergeOptions};

use crate::InstallError;

/// The document a user would write by hand: just the collection with the
/// tagged entry in it.
pub fn manual_snippet(
	client: &dyn ClientAdapter,
	entry: &Map<String, Value>,
	options: &MergeOptions,
) -> ConfigDocument {
	let mut collection = Map::new();
	collection.insert(
		options.id.clone(),
		Value::Object(tagged_entry(entry, &options.sentinel)),
	);

	let mut snippet = ConfigDocument::new();
	snippet.insert(client.collection_key().to_string(), Value::Object(collection));
	snippet
}

/// Render the full fallback message for `client`.
///
/// `has_credentials` is false when none of the client's credential keys were
/// set, in which case the message reminds the user to set one.
pub fn manual_instructions(
	client: &dyn ClientAdapter,
	entry: &Map<String, Value>,
	options: &MergeOptions,
	has_credentials: bool,
) -> Result<String, InstallError> {
	let descriptor = client.describe();
	let snippet = to_pretty_json(&manual_snippet(client, entry, options))?;
	let tagged = tagged_entry(entry, &options.sentinel);

	let mut lines = vec![
		format!(
			"{} {} configuration was not found.",
			"!".yellow(),
			descriptor.display_name.bold()
		),
		format!("Expected location: {}", descriptor.path_hint),
		String::new(),
		"Create the file if needed and add:".to_string(),
		String::new(),
		snippet.trim_end().to_string(),
		String::new(),
	];

	if let Some(link) = client.quick_install_link(&options.id, &tagged) {
		lines.push(format!("Quick install: {link}"));
	}
	if !descriptor.notes.is_empty() {
		lines.push(format!("Notes: {}", descriptor.notes));
	}
	lines.push(format!("Docs: {}", descriptor.docs_url));

	if !has_credentials {
		lines.push(format!(
			"Set at least one of {} before starting the server.",
			descriptor.required_env_keys.join(", ")
		));
	}

	let mut text = lines.join("\n");
	text.push('\n');
	Ok(text)
}
