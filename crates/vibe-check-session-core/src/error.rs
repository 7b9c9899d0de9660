// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
	#[error("session id must not be empty")]
	EmptySessionId,

	#[error("constitution rule must not be empty")]
	EmptyRule,

	#[error("session {session_id} already has the maximum of {limit} rules")]
	TooManyRules { session_id: String, limit: usize },
}
