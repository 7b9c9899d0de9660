// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session state for the vibe-check server.
//!
//! A [`SessionStore`] is created once at process start and passed by
//! reference to every request handler. It keeps, per session id, the
//! constitution rules the agent must follow and a short history of recent
//! interactions. Idle sessions are evicted by calling
//! [`SessionStore::sweep`] with the current time; nothing runs in the
//! background.

pub mod error;
pub mod store;

pub use error::SessionError;
pub use store::{
	Interaction, SessionStore, DEFAULT_HISTORY_LIMIT, DEFAULT_SESSION_TTL_SECS, MAX_RULES_PER_SESSION,
};
