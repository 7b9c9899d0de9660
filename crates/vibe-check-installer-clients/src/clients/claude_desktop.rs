// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use vibe_check_installer_config::LocateEnv;
use vibe_check_installer_core::Transport;

use crate::adapter::{ClientAdapter, ClientDescriptor, CREDENTIAL_ENV_KEYS};

static DESCRIPTOR: ClientDescriptor = ClientDescriptor {
	name: "claude",
	display_name: "Claude Desktop",
	path_hint: "~/Library/Application Support/Claude/claude_desktop_config.json (macOS), \
	            %APPDATA%\\Claude\\claude_desktop_config.json (Windows), \
	            ~/.config/Claude/claude_desktop_config.json (Linux)",
	transports: &[Transport::Stdio],
	default_transport: Transport::Stdio,
	required_env_keys: CREDENTIAL_ENV_KEYS,
	notes: "Restart Claude Desktop after installing. Open Settings > Developer once if the config file does not exist yet.",
	docs_url: "https://modelcontextprotocol.io/quickstart/user",
};

/// Claude Desktop app.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClaudeDesktop;

impl ClientAdapter for ClaudeDesktop {
	fn describe(&self) -> &'static ClientDescriptor {
		&DESCRIPTOR
	}

	fn candidate_paths(&self, env: &LocateEnv) -> Vec<PathBuf> {
		env.app_config_roots()
			.into_iter()
			.map(|root| root.join("Claude").join("claude_desktop_config.json"))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clients::test_support::linux_env;
	use vibe_check_installer_config::OsFamily;

	#[test]
	fn test_linux_candidates_follow_xdg() {
		let mut env = linux_env("/home/ada".as_ref(), "/work".as_ref());
		env.xdg_config_home = Some(PathBuf::from("/xdg"));

		assert_eq!(
			ClaudeDesktop.candidate_paths(&env),
			vec![
				PathBuf::from("/xdg/Claude/claude_desktop_config.json"),
				PathBuf::from("/home/ada/.config/Claude/claude_desktop_config.json"),
			]
		);
	}

	#[test]
	fn test_macos_candidate() {
		let mut env = linux_env("/Users/ada".as_ref(), "/work".as_ref());
		env.os = OsFamily::MacOs;

		assert_eq!(
			ClaudeDesktop.candidate_paths(&env),
			vec![PathBuf::from(
				"/Users/ada/Library/Application Support/Claude/claude_desktop_config.json"
			)]
		);
	}

	#[test]
	fn test_stdio_only() {
		assert!(ClaudeDesktop.describe().supports(Transport::Stdio));
		assert!(!ClaudeDesktop.describe().supports(Transport::Http));
		assert!(ClaudeDesktop.quick_install_link("x", &Default::default()).is_none());
	}
}
