// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Merge error types.

/// Errors raised before the merge engine mutates anything.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
	/// The entry collection exists but is not a JSON object.
	#[error("'{key}' must be a JSON object mapping server names to entries")]
	CollectionNotObject { key: String },
}
