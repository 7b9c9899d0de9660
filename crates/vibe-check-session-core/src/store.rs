// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::SessionError;

/// Interactions kept per session before the oldest is dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Seconds a session may stay untouched before [`SessionStore::sweep`] evicts it.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60;

pub const MAX_RULES_PER_SESSION: usize = 50;

/// One recorded exchange between an agent and the vibe-check tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
	pub input: String,
	pub response: String,
	pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SessionState {
	rules: Vec<String>,
	history: VecDeque<Interaction>,
	last_touched: DateTime<Utc>,
}

impl SessionState {
	fn new(now: DateTime<Utc>) -> Self {
		Self {
			rules: Vec::new(),
			history: VecDeque::new(),
			last_touched: now,
		}
	}
}

/// Per-session constitution rules and interaction history.
#[derive(Debug, Clone)]
pub struct SessionStore {
	sessions: HashMap<String, SessionState>,
	ttl: Duration,
	history_limit: usize,
}

impl SessionStore {
	pub fn new() -> Self {
		Self::with_limits(Duration::seconds(DEFAULT_SESSION_TTL_SECS), DEFAULT_HISTORY_LIMIT)
	}

	pub fn with_limits(ttl: Duration, history_limit: usize) -> Self {
		Self {
			sessions: HashMap::new(),
			ttl,
			history_limit: history_limit.max(1),
		}
	}

	fn touch(
		&mut self,
		session_id: &str,
		now: DateTime<Utc>,
	) -> Result<&mut SessionState, SessionError> {
		let session_id = session_id.trim();
		if session_id.is_empty() {
			return Err(SessionError::EmptySessionId);
		}
		let state = self
			.sessions
			.entry(session_id.to_string())
			.or_insert_with(|| SessionState::new(now));
		if now > state.last_touched {
			state.last_touched = now;
		}
		Ok(state)
	}

	/// Append a rule to the session's constitution.
	///
	/// Rules are trimmed. A rule already present is not added twice.
	pub fn update_constitution(
		&mut self,
		session_id: &str,
		rule: &str,
		now: DateTime<Utc>,
	) -> Result<(), SessionError> {
		let rule = rule.trim();
		if rule.is_empty() {
			return Err(SessionError::EmptyRule);
		}
		let id = session_id.trim().to_string();
		let state = self.touch(session_id, now)?;
		if state.rules.iter().any(|r| r == rule) {
			debug!(session_id = %id, "rule already present");
			return Ok(());
		}
		if state.rules.len() >= MAX_RULES_PER_SESSION {
			return Err(SessionError::TooManyRules {
				session_id: id,
				limit: MAX_RULES_PER_SESSION,
			});
		}
		state.rules.push(rule.to_string());
		debug!(session_id = %id, rules = state.rules.len(), "constitution updated");
		Ok(())
	}

	/// Replace the session's constitution. Empty rules are skipped.
	pub fn reset_constitution(
		&mut self,
		session_id: &str,
		rules: &[String],
		now: DateTime<Utc>,
	) -> Result<(), SessionError> {
		let mut cleaned: Vec<String> = Vec::new();
		for rule in rules.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
			if !cleaned.iter().any(|c| c == rule) {
				cleaned.push(rule.to_string());
			}
		}
		if cleaned.len() > MAX_RULES_PER_SESSION {
			return Err(SessionError::TooManyRules {
				session_id: session_id.trim().to_string(),
				limit: MAX_RULES_PER_SESSION,
			});
		}
		let state = self.touch(session_id, now)?;
		state.rules = cleaned;
		Ok(())
	}

	/// Rules for the session, in the order they were added. Unknown sessions
	/// have none.
	pub fn check_constitution(&self, session_id: &str) -> Vec<String> {
		self.sessions
			.get(session_id.trim())
			.map(|s| s.rules.clone())
			.unwrap_or_default()
	}

	pub fn record_interaction(
		&mut self,
		session_id: &str,
		input: &str,
		response: &str,
		now: DateTime<Utc>,
	) -> Result<(), SessionError> {
		let limit = self.history_limit;
		let state = self.touch(session_id, now)?;
		state.history.push_back(Interaction {
			input: input.to_string(),
			response: response.to_string(),
			recorded_at: now,
		});
		while state.history.len() > limit {
			state.history.pop_front();
		}
		Ok(())
	}

	/// Recorded interactions, oldest first.
	pub fn history(&self, session_id: &str) -> Vec<Interaction> {
		self.sessions
			.get(session_id.trim())
			.map(|s| s.history.iter().cloned().collect())
			.unwrap_or_default()
	}

	/// Evict sessions idle for longer than the TTL. Returns how many were removed.
	pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
		let ttl = self.ttl;
		let before = self.sessions.len();
		self.sessions.retain(|_, state| now - state.last_touched <= ttl);
		let evicted = before - self.sessions.len();
		if evicted > 0 {
			info!(evicted, remaining = self.sessions.len(), "swept idle sessions");
		}
		evicted
	}

	pub fn len(&self) -> usize {
		self.sessions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sessions.is_empty()
	}
}

impl Default for SessionStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use proptest::prelude::*;

	fn t0() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
	}

	#[test]
	fn test_rules_accumulate_in_order_without_duplicates() {
		let mut store = SessionStore::new();
		store.update_constitution("s1", "no mocks", t0()).unwrap();
		store.update_constitution("s1", " small diffs ", t0()).unwrap();
		store.update_constitution("s1", "no mocks", t0()).unwrap();

		assert_eq!(store.check_constitution("s1"), vec!["no mocks", "small diffs"]);
		assert!(store.check_constitution("other").is_empty());
	}

	#[test]
	fn test_empty_inputs_are_rejected() {
		let mut store = SessionStore::new();

		assert_eq!(
			store.update_constitution("", "rule", t0()),
			Err(SessionError::EmptySessionId)
		);
		assert_eq!(
			store.update_constitution("s1", "   ", t0()),
			Err(SessionError::EmptyRule)
		);
		assert!(store.is_empty());
	}

	#[test]
	fn test_rule_limit() {
		let mut store = SessionStore::new();
		for i in 0..MAX_RULES_PER_SESSION {
			store.update_constitution("s1", &format!("rule {i}"), t0()).unwrap();
		}

		let err = store.update_constitution("s1", "one more", t0()).unwrap_err();
		assert!(matches!(
			err,
			SessionError::TooManyRules { limit, .. } if limit == MAX_RULES_PER_SESSION
		));
	}

	#[test]
	fn test_reset_replaces_rules() {
		let mut store = SessionStore::new();
		store.update_constitution("s1", "old", t0()).unwrap();

		store
			.reset_constitution("s1", &["a".to_string(), "".to_string(), "b".to_string()], t0())
			.unwrap();

		assert_eq!(store.check_constitution("s1"), vec!["a", "b"]);
	}

	#[test]
	fn test_history_is_bounded_and_drops_oldest() {
		let mut store = SessionStore::new();
		for i in 0..(DEFAULT_HISTORY_LIMIT + 3) {
			store
				.record_interaction("s1", &format!("q{i}"), &format!("a{i}"), t0())
				.unwrap();
		}

		let history = store.history("s1");
		assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
		assert_eq!(history[0].input, "q3");
		assert_eq!(history.last().unwrap().response, "a12");
	}

	#[test]
	fn test_sweep_evicts_only_idle_sessions() {
		let mut store = SessionStore::new();
		store.record_interaction("idle", "q", "a", t0()).unwrap();
		store
			.record_interaction("active", "q", "a", t0() + Duration::minutes(50))
			.unwrap();

		assert_eq!(store.sweep(t0() + Duration::minutes(61)), 1);
		assert_eq!(store.len(), 1);
		assert_eq!(store.history("active").len(), 1);
		assert!(store.history("idle").is_empty());
	}

	#[test]
	fn test_session_exactly_at_ttl_survives() {
		let mut store = SessionStore::new();
		store.update_constitution("s1", "rule", t0()).unwrap();

		assert_eq!(store.sweep(t0() + Duration::seconds(DEFAULT_SESSION_TTL_SECS)), 0);
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn test_interaction_serializes_with_timestamp() {
		let interaction = Interaction {
			input: "plan".to_string(),
			response: "looks fine".to_string(),
			recorded_at: t0(),
		};

		let value = serde_json::to_value(&interaction).unwrap();
		assert_eq!(value["recorded_at"], "2025-01-01T12:00:00Z");
	}

	proptest! {
		/// History never exceeds the limit and always ends with the newest entry.
		#[test]
		fn history_stays_bounded(count in 0usize..40, limit in 1usize..15) {
			let mut store = SessionStore::with_limits(Duration::seconds(DEFAULT_SESSION_TTL_SECS), limit);
			for i in 0..count {
				store.record_interaction("s", &i.to_string(), "", t0()).unwrap();
			}

			let history = store.history("s");
			prop_assert_eq!(history.len(), count.min(limit));
			if count > 0 {
				prop_assert_eq!(history.last().unwrap().input.clone(), (count - 1).to_string());
			}
		}
	}
}
