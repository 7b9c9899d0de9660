// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use serde_json::{Map, Value};
use vibe_check_installer_config::LocateEnv;
use vibe_check_installer_core::{EntryShape, Transport};

use crate::adapter::{ClientAdapter, ClientDescriptor, CREDENTIAL_ENV_KEYS};
use crate::links::vscode_install_link;

static DESCRIPTOR: ClientDescriptor = ClientDescriptor {
	name: "vscode",
	display_name: "Visual Studio Code",
	path_hint: ".vscode/mcp.json (workspace) or <VS Code user dir>/User/mcp.json",
	transports: &[Transport::Stdio, Transport::Http],
	default_transport: Transport::Stdio,
	required_env_keys: CREDENTIAL_ENV_KEYS,
	notes: "Entries live under \"servers\". Use --dev-watch / --dev-debug to enable VS Code's MCP development mode.",
	docs_url: "https://code.visualstudio.com/docs/copilot/chat/mcp-servers",
};

/// Visual Studio Code. Uses the editor entry shape under `servers`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VsCode;

impl ClientAdapter for VsCode {
	fn describe(&self) -> &'static ClientDescriptor {
		&DESCRIPTOR
	}

	fn candidate_paths(&self, env: &LocateEnv) -> Vec<PathBuf> {
		let workspace = env.cwd_join(".vscode/mcp.json");
		let profiles = env
			.app_config_roots()
			.into_iter()
			.map(|root| root.join("Code").join("User").join("mcp.json"));

		workspace.into_iter().chain(profiles).collect()
	}

	fn collection_key(&self) -> &'static str {
		"servers"
	}

	fn entry_shape(&self) -> EntryShape {
		EntryShape::Editor
	}

	fn quick_install_link(&self, id: &str, entry: &Map<String, Value>) -> Option<String> {
		Some(vscode_install_link(id, entry))
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::clients::test_support::linux_env;
	use serde_json::json;
	use vibe_check_installer_core::{
		ConfigDocument, DevOptions, ManagedEntry, MergeOptions, MergeStatus,
	};

	fn options(transport: Transport, dev: DevOptions) -> MergeOptions {
		MergeOptions::new("vibe-check", "vibe-check-mcp")
			.with_transport(transport, Some("http://127.0.0.1:2091/mcp".to_string()))
			.with_dev(dev)
	}

	fn entry(options: &MergeOptions) -> ManagedEntry {
		ManagedEntry::from_options(options, "npx", vec!["-y".to_string()], BTreeMap::new())
	}

	#[test]
	fn test_workspace_then_user_profile() {
		let env = linux_env("/home/ada".as_ref(), "/work/app".as_ref());

		assert_eq!(
			VsCode.candidate_paths(&env),
			vec![
				PathBuf::from("/work/app/.vscode/mcp.json"),
				PathBuf::from("/home/ada/.config/Code/User/mcp.json"),
			]
		);
	}

	#[test]
	fn test_merges_editor_shape_under_servers() {
		let options = options(
			Transport::Http,
			DevOptions {
				watch: true,
				debug: None,
			},
		);
		let document = ConfigDocument::new();

		let result = VsCode.merge(&document, &entry(&options), &options).unwrap();

		assert_eq!(result.status, MergeStatus::Inserted);
		assert_eq!(
			result.document["servers"]["vibe-check"],
			json!({
				"command": "npx",
				"args": ["-y"],
				"env": {},
				"transport": "http",
				"url": "http://127.0.0.1:2091/mcp",
				"dev": { "watch": true },
				"managedBy": "vibe-check-mcp",
			})
		);
		assert!(!result.document.contains_key("mcpServers"));
	}

	#[test]
	fn test_stdio_without_dev_flags_stays_lean() {
		let options = options(Transport::Stdio, DevOptions::default());
		let document = ConfigDocument::new();

		let result = VsCode.merge(&document, &entry(&options), &options).unwrap();
		let stored = &result.document["servers"]["vibe-check"];

		assert_eq!(stored["transport"], "stdio");
		assert!(stored.get("url").is_none());
		assert!(stored.get("dev").is_none());
	}
}
