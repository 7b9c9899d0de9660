// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform-aware resolution of client configuration paths.

use std::path::{Path, PathBuf};

/// Operating system family, as far as config locations are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
	MacOs,
	Windows,
	Linux,
}

impl OsFamily {
	pub fn current() -> Self {
		if cfg!(target_os = "macos") {
			OsFamily::MacOs
		} else if cfg!(windows) {
			OsFamily::Windows
		} else {
			OsFamily::Linux
		}
	}
}

/// Inputs to path resolution, captured once per run.
#[derive(Debug, Clone)]
pub struct LocateEnv {
	pub os: OsFamily,
	pub home: Option<PathBuf>,
	/// `%APPDATA%` on Windows.
	pub app_data: Option<PathBuf>,
	/// `$XDG_CONFIG_HOME` on Linux.
	pub xdg_config_home: Option<PathBuf>,
	/// Working directory, for workspace-scoped clients.
	pub cwd: Option<PathBuf>,
}

impl LocateEnv {
	/// Capture the environment of the running process.
	pub fn from_process() -> Self {
		let env = Self {
			os: OsFamily::current(),
			home: dirs::home_dir(),
			app_data: non_empty_var("APPDATA"),
			xdg_config_home: non_empty_var("XDG_CONFIG_HOME"),
			cwd: std::env::current_dir().ok(),
		};

		tracing::debug!(
			os = ?env.os,
			home = ?env.home,
			app_data = ?env.app_data,
			xdg_config_home = ?env.xdg_config_home,
			cwd = ?env.cwd,
			"captured locate environment"
		);

		env
	}

	/// Join `relative` onto the home directory.
	pub fn home_join(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
		self.home.as_ref().map(|home| home.join(relative))
	}

	/// Join `relative` onto the working directory.
	pub fn cwd_join(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
		self.cwd.as_ref().map(|cwd| cwd.join(relative))
	}

	/// Per-user application config roots, most specific first.
	///
	/// - macOS: `~/Library/Application Support`
	/// - Windows: `%APPDATA%`, then `~/AppData/Roaming`
	/// - Linux: `$XDG_CONFIG_HOME`, then `~/.config`
	pub fn app_config_roots(&self) -> Vec<PathBuf> {
		let roots = match self.os {
			OsFamily::MacOs => vec![self.home_join("Library/Application Support")],
			OsFamily::Windows => vec![self.app_data.clone(), self.home_join("AppData/Roaming")],
			OsFamily::Linux => vec![self.xdg_config_home.clone(), self.home_join(".config")],
		};

		let mut unique: Vec<PathBuf> = Vec::new();
		for root in roots.into_iter().flatten() {
			if !unique.contains(&root) {
				unique.push(root);
			}
		}
		unique
	}
}

fn non_empty_var(key: &str) -> Option<PathBuf> {
	std::env::var_os(key)
		.filter(|value| !value.is_empty())
		.map(PathBuf::from)
}

/// Expand a leading `~` to the home directory. Other paths are returned as is.
pub fn expand_home(path: &Path, env: &LocateEnv) -> PathBuf {
	let Some(home) = env.home.as_ref() else {
		return path.to_path_buf();
	};

	match path.strip_prefix("~") {
		Ok(rest) if rest.as_os_str().is_empty() => home.clone(),
		Ok(rest) => home.join(rest),
		Err(_) => path.to_path_buf(),
	}
}

/// Resolve the config file to operate on.
///
/// An explicit path wins and is not checked for existence. Otherwise the
/// first candidate that exists is returned; `None` means the client has
/// never been set up on this machine.
pub fn locate(custom: Option<&Path>, candidates: &[PathBuf], env: &LocateEnv) -> Option<PathBuf> {
	if let Some(custom) = custom {
		let path = expand_home(custom, env);
		tracing::debug!(path = %path.display(), "using explicit config path");
		return Some(path);
	}

	for candidate in candidates {
		if candidate.exists() {
			tracing::debug!(path = %candidate.display(), "found config file");
			return Some(candidate.clone());
		}
		tracing::trace!(path = %candidate.display(), "config candidate missing");
	}

	tracing::debug!(candidates = candidates.len(), "no config file found");
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn env_with_home(os: OsFamily, home: &Path) -> LocateEnv {
		LocateEnv {
			os,
			home: Some(home.to_path_buf()),
			app_data: None,
			xdg_config_home: None,
			cwd: None,
		}
	}

	#[test]
	fn test_expand_home_replaces_tilde_prefix() {
		let env = env_with_home(OsFamily::Linux, Path::new("/home/ada"));

		assert_eq!(
			expand_home(Path::new("~/.cursor/mcp.json"), &env),
			PathBuf::from("/home/ada/.cursor/mcp.json")
		);
		assert_eq!(expand_home(Path::new("~"), &env), PathBuf::from("/home/ada"));
	}

	#[test]
	fn test_expand_home_leaves_other_paths_alone() {
		let env = env_with_home(OsFamily::Linux, Path::new("/home/ada"));

		assert_eq!(
			expand_home(Path::new("/etc/mcp.json"), &env),
			PathBuf::from("/etc/mcp.json")
		);
		assert_eq!(
			expand_home(Path::new("~other/mcp.json"), &env),
			PathBuf::from("~other/mcp.json")
		);
	}

	#[test]
	fn test_explicit_path_is_returned_even_if_missing() {
		let env = env_with_home(OsFamily::Linux, Path::new("/home/ada"));

		let found = locate(Some(Path::new("~/missing.json")), &[], &env);
		assert_eq!(found, Some(PathBuf::from("/home/ada/missing.json")));
	}

	#[test]
	fn test_first_existing_candidate_wins() {
		let tmp = TempDir::new().unwrap();
		let first = tmp.path().join("a.json");
		let second = tmp.path().join("b.json");
		let third = tmp.path().join("c.json");
		std::fs::write(&second, "{}").unwrap();
		std::fs::write(&third, "{}").unwrap();

		let env = env_with_home(OsFamily::Linux, tmp.path());
		let found = locate(None, &[first, second.clone(), third], &env);

		assert_eq!(found, Some(second));
	}

	#[test]
	fn test_no_candidate_is_not_found() {
		let tmp = TempDir::new().unwrap();
		let env = env_with_home(OsFamily::Linux, tmp.path());

		assert_eq!(locate(None, &[tmp.path().join("nope.json")], &env), None);
	}

	#[test]
	fn test_linux_roots_prefer_xdg() {
		let mut env = env_with_home(OsFamily::Linux, Path::new("/home/ada"));
		env.xdg_config_home = Some(PathBuf::from("/xdg"));

		assert_eq!(
			env.app_config_roots(),
			vec![PathBuf::from("/xdg"), PathBuf::from("/home/ada/.config")]
		);
	}

	#[test]
	fn test_roots_are_deduplicated() {
		let mut env = env_with_home(OsFamily::Linux, Path::new("/home/ada"));
		env.xdg_config_home = Some(PathBuf::from("/home/ada/.config"));

		assert_eq!(env.app_config_roots(), vec![PathBuf::from("/home/ada/.config")]);
	}

	#[test]
	fn test_windows_roots_use_app_data() {
		let mut env = env_with_home(OsFamily::Windows, Path::new("C:/Users/ada"));
		env.app_data = Some(PathBuf::from("D:/Roaming"));

		assert_eq!(
			env.app_config_roots(),
			vec![
				PathBuf::from("D:/Roaming"),
				PathBuf::from("C:/Users/ada/AppData/Roaming")
			]
		);
	}

	#[test]
	fn test_macos_root_is_application_support() {
		let env = env_with_home(OsFamily::MacOs, Path::new("/Users/ada"));

		assert_eq!(
			env.app_config_roots(),
			vec![PathBuf::from("/Users/ada/Library/Application Support")]
		);
	}

	#[test]
	fn test_missing_home_yields_no_roots() {
		let env = LocateEnv {
			os: OsFamily::MacOs,
			home: None,
			app_data: None,
			xdg_config_home: None,
			cwd: None,
		};

		assert!(env.app_config_roots().is_empty());
		assert!(env.home_join(".claude.json").is_none());
	}
}
