// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validated reads and atomic writes of client config documents.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use vibe_check_installer_core::ConfigDocument;

use crate::StoreError;

/// Read `path` as a JSON object.
///
/// When `raw` is given it is parsed instead of the file contents. `context`
/// names the client in error messages.
pub fn read_config(
	path: &Path,
	raw: Option<&str>,
	context: &str,
) -> Result<ConfigDocument, StoreError> {
	let contents = match raw {
		Some(raw) => raw.to_string(),
		None => std::fs::read_to_string(path).map_err(|source| StoreError::Io {
			path: path.to_path_buf(),
			source,
		})?,
	};

	let value: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
		context: context.to_string(),
		path: path.to_path_buf(),
		source,
	})?;

	match value {
		Value::Object(document) => {
			debug!(path = %path.display(), keys = document.len(), "loaded config document");
			Ok(document)
		}
		_ => Err(StoreError::NotAnObject {
			context: context.to_string(),
			path: path.to_path_buf(),
		}),
	}
}

/// Serialize a document the way it is stored on disk: two-space indentation
/// and a trailing newline.
pub fn to_pretty_json(document: &ConfigDocument) -> Result<String, StoreError> {
	let mut json = serde_json::to_string_pretty(document)?;
	json.push('\n');
	Ok(json)
}

/// Replace `path` with `document` atomically.
///
/// The document is written to a temporary file in the target's directory,
/// restricted to the owner, synced, and renamed over the target. Readers see
/// either the old or the new file. On failure the temporary file is removed
/// and the target is left as it was.
pub fn write_atomic(path: &Path, document: &ConfigDocument) -> Result<(), StoreError> {
	let json = to_pretty_json(document)?;
	let target = resolve_target(path)?;

	let dir = match target.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => Path::new(".").to_path_buf(),
	};
	let write_err = |source| StoreError::Write {
		path: target.clone(),
		source,
	};

	std::fs::create_dir_all(&dir).map_err(write_err)?;

	let file_name = target
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| "config".to_string());
	let mut tmp = tempfile::Builder::new()
		.prefix(&format!(".{file_name}."))
		.suffix(".tmp")
		.tempfile_in(&dir)
		.map_err(write_err)?;

	restrict_permissions(tmp.path()).map_err(write_err)?;
	tmp.write_all(json.as_bytes()).map_err(write_err)?;
	tmp.as_file().sync_all().map_err(write_err)?;

	tmp.persist(&target).map_err(|e| StoreError::Persist {
		path: target.clone(),
		source: e.error,
	})?;

	sync_dir(&dir);

	info!(path = %target.display(), bytes = json.len(), "wrote config atomically");
	Ok(())
}

/// The file a write to `path` must replace. A symlinked config is written
/// through to the file it points at so the link itself is kept.
fn resolve_target(path: &Path) -> Result<PathBuf, StoreError> {
	let is_symlink = std::fs::symlink_metadata(path)
		.map(|meta| meta.file_type().is_symlink())
		.unwrap_or(false);
	if !is_symlink {
		return Ok(path.to_path_buf());
	}

	let resolved = std::fs::canonicalize(path).map_err(|source| StoreError::Write {
		path: path.to_path_buf(),
		source,
	})?;
	debug!(link = %path.display(), target = %resolved.display(), "writing through symlink");
	Ok(resolved)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
	use std::os::unix::fs::PermissionsExt;
	std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
	Ok(())
}

/// Flush the rename itself to disk. Best effort.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
	if let Err(e) = std::fs::File::open(dir).and_then(|d| d.sync_all()) {
		debug!(dir = %dir.display(), error = %e, "failed to sync config directory");
	}
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
