// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;
use vibe_check_installer_config::StoreError;
use vibe_check_installer_core::{MergeError, Transport};

/// Fatal outcomes of a single client install.
#[derive(Debug, Error)]
pub enum InstallError {
	#[error("unknown client '{name}'; valid clients: {}", valid.join(", "))]
	UnknownClient { name: String, valid: Vec<String> },

	#[error("{client} does not support the {transport} transport")]
	UnsupportedTransport { client: String, transport: Transport },

	#[error("--config can only be used with a single --client ({count} given)")]
	ConfigWithManyClients { count: usize },

	#[error("--id must not be empty")]
	EmptyId,

	#[error("stdin is not a terminal; pass --non-interactive to install without a confirmation prompt")]
	NotInteractive,

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Merge(#[from] MergeError),

	#[error("confirmation prompt failed")]
	Prompt(#[from] dialoguer::Error),

	#[error("failed to write output")]
	Io(#[from] std::io::Error),
}

impl InstallError {
	/// Errors caused by how the installer was invoked rather than by the target file.
	pub fn is_usage_error(&self) -> bool {
		matches!(
			self,
			Self::UnknownClient { .. }
				| Self::UnsupportedTransport { .. }
				| Self::ConfigWithManyClients { .. }
				| Self::EmptyId
				| Self::NotInteractive
		)
	}
}
