// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use vibe_check_installer_config::LocateEnv;
use vibe_check_installer_core::Transport;

use crate::adapter::{ClientAdapter, ClientDescriptor, CREDENTIAL_ENV_KEYS};

static DESCRIPTOR: ClientDescriptor = ClientDescriptor {
	name: "windsurf",
	display_name: "Windsurf",
	path_hint: "~/.codeium/windsurf/mcp_config.json",
	transports: &[Transport::Stdio, Transport::Http],
	default_transport: Transport::Stdio,
	required_env_keys: CREDENTIAL_ENV_KEYS,
	notes: "Press refresh in the Cascade MCP panel after installing.",
	docs_url: "https://docs.windsurf.com/windsurf/cascade/mcp",
};

/// Windsurf editor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Windsurf;

impl ClientAdapter for Windsurf {
	fn describe(&self) -> &'static ClientDescriptor {
		&DESCRIPTOR
	}

	fn candidate_paths(&self, env: &LocateEnv) -> Vec<PathBuf> {
		env.home_join(".codeium/windsurf/mcp_config.json")
			.into_iter()
			.collect()
	}
}
