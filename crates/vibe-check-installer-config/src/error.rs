// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Config store error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing a client config file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// The file could not be read.
	#[error("failed to read {}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The file is not valid JSON.
	#[error("{context} config at {} is not valid JSON", path.display())]
	Parse {
		context: String,
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// The file parsed, but its top level is an array or scalar.
	#[error("{context} config must be a JSON object ({})", path.display())]
	NotAnObject { context: String, path: PathBuf },

	/// The document could not be serialized.
	#[error("failed to serialize config")]
	Serialize(#[from] serde_json::Error),

	/// Creating, writing or syncing the temporary file failed.
	#[error("failed to write {}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Renaming the temporary file onto the target failed.
	#[error("failed to replace {}", path.display())]
	Persist {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl StoreError {
	/// True when the file exists but its contents are unusable.
	pub fn is_format_error(&self) -> bool {
		matches!(self, Self::Parse { .. } | Self::NotAnObject { .. })
	}
}

#[cfg(test)]
mod tests {
	use std::error::Error as _;

	use super::*;

	#[test]
	fn test_cause_is_reported_once() {
		let err = StoreError::Io {
			path: PathBuf::from("mcp.json"),
			source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
		};

		assert_eq!(err.to_string(), "failed to read mcp.json");
		assert_eq!(err.source().unwrap().to_string(), "no such file");
	}

	#[test]
	fn test_parse_error_keeps_serde_cause() {
		let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err = StoreError::Parse {
			context: "Cursor".to_string(),
			path: PathBuf::from("mcp.json"),
			source,
		};

		assert_eq!(err.to_string(), "Cursor config at mcp.json is not valid JSON");
		assert!(err.source().is_some());
		assert!(err.is_format_error());
	}
}
