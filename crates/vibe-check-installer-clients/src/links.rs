// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Quick-install deep links understood by some clients.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

/// Percent-encode everything but unreserved characters. Spaces become `%20`,
/// never `+`, since the handlers decode with plain URI decoding.
fn encode_component(raw: &str) -> String {
	urlencoding::encode(raw).into_owned()
}

/// `cursor://anysphere.cursor-deeplink/mcp/install?name=<id>&config=<base64 entry>`
pub fn cursor_install_link(id: &str, entry: &Map<String, Value>) -> String {
	let config = STANDARD.encode(Value::Object(entry.clone()).to_string());
	format!(
		"cursor://anysphere.cursor-deeplink/mcp/install?name={}&config={}",
		encode_component(id),
		encode_component(&config)
	)
}

/// `vscode:mcp/install?<percent-encoded {"name": id, ...entry}>`
pub fn vscode_install_link(id: &str, entry: &Map<String, Value>) -> String {
	let mut payload = Map::new();
	payload.insert("name".to_string(), Value::String(id.to_string()));
	payload.extend(entry.clone());
	format!(
		"vscode:mcp/install?{}",
		encode_component(&Value::Object(payload).to_string())
	)
}
