// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use serde_json::{Map, Value};
use vibe_check_installer_config::LocateEnv;
use vibe_check_installer_core::Transport;

use crate::adapter::{ClientAdapter, ClientDescriptor, CREDENTIAL_ENV_KEYS};
use crate::links::cursor_install_link;

static DESCRIPTOR: ClientDescriptor = ClientDescriptor {
	name: "cursor",
	display_name: "Cursor",
	path_hint: ".cursor/mcp.json (project) or ~/.cursor/mcp.json (global)",
	transports: &[Transport::Stdio, Transport::Http],
	default_transport: Transport::Stdio,
	required_env_keys: CREDENTIAL_ENV_KEYS,
	notes: "A project-level .cursor/mcp.json takes precedence over the global file.",
	docs_url: "https://docs.cursor.com/context/model-context-protocol",
};

/// Cursor editor. Project config first, then the global one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cursor;

impl ClientAdapter for Cursor {
	fn describe(&self) -> &'static ClientDescriptor {
		&DESCRIPTOR
	}

	fn candidate_paths(&self, env: &LocateEnv) -> Vec<PathBuf> {
		[env.cwd_join(".cursor/mcp.json"), env.home_join(".cursor/mcp.json")]
			.into_iter()
			.flatten()
			.collect()
	}

	fn quick_install_link(&self, id: &str, entry: &Map<String, Value>) -> Option<String> {
		Some(cursor_install_link(id, entry))
	}
}
