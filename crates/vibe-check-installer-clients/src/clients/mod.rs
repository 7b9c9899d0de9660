// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod claude_code;
mod claude_desktop;
mod cursor;
mod vscode;
mod windsurf;

pub use claude_code::ClaudeCode;
pub use claude_desktop::ClaudeDesktop;
pub use cursor::Cursor;
pub use vscode::VsCode;
pub use windsurf::Windsurf;

#[cfg(test)]
pub(crate) mod test_support {
	use std::path::Path;

	use vibe_check_installer_config::{LocateEnv, OsFamily};

	pub fn linux_env(home: &Path, cwd: &Path) -> LocateEnv {
		LocateEnv {
			os: OsFamily::Linux,
			home: Some(home.to_path_buf()),
			app_data: None,
			xdg_config_home: None,
			cwd: Some(cwd.to_path_buf()),
		}
	}
}
