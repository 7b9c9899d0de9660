// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use vibe_check_installer_config::LocateEnv;
use vibe_check_installer_core::Transport;

use crate::adapter::{ClientAdapter, ClientDescriptor, CREDENTIAL_ENV_KEYS};

static DESCRIPTOR: ClientDescriptor = ClientDescriptor {
	name: "claude-code",
	display_name: "Claude Code",
	path_hint: "~/.claude.json",
	transports: &[Transport::Stdio, Transport::Http],
	default_transport: Transport::Stdio,
	required_env_keys: CREDENTIAL_ENV_KEYS,
	notes: "~/.claude.json is created the first time Claude Code runs. `claude mcp list` shows the result.",
	docs_url: "https://docs.anthropic.com/en/docs/claude-code/mcp",
};

/// Claude Code command-line agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClaudeCode;

impl ClientAdapter for ClaudeCode {
	fn describe(&self) -> &'static ClientDescriptor {
		&DESCRIPTOR
	}

	fn candidate_paths(&self, env: &LocateEnv) -> Vec<PathBuf> {
		env.home_join(".claude.json").into_iter().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clients::test_support::linux_env;

	#[test]
	fn test_candidate_is_home_dotfile() {
		let env = linux_env("/home/ada".as_ref(), "/work".as_ref());

		assert_eq!(
			ClaudeCode.candidate_paths(&env),
			vec![PathBuf::from("/home/ada/.claude.json")]
		);
		assert_eq!(ClaudeCode.collection_key(), "mcpServers");
	}
}
