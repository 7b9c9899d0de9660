// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ownership-aware merge of a managed entry into a configuration document.
//!
//! The engine distinguishes four situations for the entry at `options.id`:
//!
//! | Existing entry                    | Outcome                         |
//! |-----------------------------------|---------------------------------|
//! | absent                            | inserted, tagged with sentinel  |
//! | ours, deeply equal to candidate   | untouched (already up to date)  |
//! | ours, different                   | replaced                        |
//! | untagged or tagged by another tool| untouched, conflict reported    |
//!
//! Only the `managedBy` sentinel decides ownership. Key presence alone never
//! grants permission to overwrite.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::entry::{MergeOptions, MANAGED_BY_KEY};
use crate::error::MergeError;
use crate::ConfigDocument;

/// What the merge decided for the managed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStatus {
	Inserted,
	Updated,
	UpToDate,
	/// The entry belongs to the user or another tool.
	Conflict {
		owner: Option<String>,
		reason: String,
	},
}

/// Result of [`merge_managed_entry`].
///
/// When nothing changed the caller's document is handed back borrowed;
/// otherwise `document` is a fresh copy and the input is left untouched.
#[derive(Debug, Clone)]
pub struct MergeResult<'a> {
	pub document: Cow<'a, ConfigDocument>,
	pub status: MergeStatus,
}

impl MergeResult<'_> {
	pub fn changed(&self) -> bool {
		matches!(self.status, MergeStatus::Inserted | MergeStatus::Updated)
	}

	/// Human-readable explanation when no change was made because of a conflict.
	pub fn reason(&self) -> Option<&str> {
		match &self.status {
			MergeStatus::Conflict { reason, .. } => Some(reason),
			_ => None,
		}
	}

	pub fn into_document(self) -> ConfigDocument {
		self.document.into_owned()
	}
}

/// Merge `desired` into `document[collection_key][options.id]`.
///
/// Any `managedBy` on `desired` is discarded and replaced with
/// `options.sentinel`. Pure: performs no I/O and never mutates `document`.
pub fn merge_managed_entry<'a>(
	document: &'a ConfigDocument,
	desired: &Map<String, Value>,
	options: &MergeOptions,
	collection_key: &str,
) -> Result<MergeResult<'a>, MergeError> {
	let collection = match document.get(collection_key) {
		None | Some(Value::Null) => None,
		Some(Value::Object(map)) => Some(map),
		Some(_) => {
			return Err(MergeError::CollectionNotObject {
				key: collection_key.to_string(),
			})
		}
	};

	let candidate = Value::Object(tagged_entry(desired, &options.sentinel));
	let existing = collection.and_then(|c| c.get(&options.id));

	let status = match existing {
		None => MergeStatus::Inserted,
		Some(existing) => match owner_of(existing) {
			Some(owner) if owner == options.sentinel => {
				if *existing == candidate {
					MergeStatus::UpToDate
				} else {
					MergeStatus::Updated
				}
			}
			owner => {
				let owner = owner.map(str::to_string);
				let reason = conflict_reason(
					&options.id,
					collection_key,
					owner.as_deref(),
					&options.sentinel,
				);
				warn!(
					id = %options.id,
					owner = ?owner,
					"refusing to modify entry not managed by this installer"
				);
				return Ok(MergeResult {
					document: Cow::Borrowed(document),
					status: MergeStatus::Conflict { owner, reason },
				});
			}
		},
	};

	if status == MergeStatus::UpToDate {
		debug!(id = %options.id, "managed entry already up to date");
		return Ok(MergeResult {
			document: Cow::Borrowed(document),
			status,
		});
	}

	let mut next_collection = collection.cloned().unwrap_or_default();
	next_collection.insert(options.id.clone(), candidate);

	let mut next = document.clone();
	next.insert(collection_key.to_string(), Value::Object(next_collection));

	debug!(id = %options.id, collection = collection_key, status = ?status, "merged managed entry");

	Ok(MergeResult {
		document: Cow::Owned(next),
		status,
	})
}

/// Copy `desired` with its `managedBy` replaced by `sentinel`.
///
/// This is exactly what the merge engine stores, so manual-setup snippets
/// built from it are recognised as managed on the next run.
pub fn tagged_entry(desired: &Map<String, Value>, sentinel: &str) -> Map<String, Value> {
	let mut entry = desired.clone();
	entry.remove(MANAGED_BY_KEY);
	entry.insert(MANAGED_BY_KEY.to_string(), Value::String(sentinel.to_string()));
	entry
}

fn owner_of(entry: &Value) -> Option<&str> {
	entry.get(MANAGED_BY_KEY).and_then(Value::as_str)
}

fn conflict_reason(id: &str, collection_key: &str, owner: Option<&str>, sentinel: &str) -> String {
	match owner {
		Some(owner) => format!(
			"Entry '{id}' in '{collection_key}' is managed by '{owner}', not '{sentinel}'; leaving it untouched. Remove it or pick another id with --id."
		),
		None => format!(
			"Entry '{id}' in '{collection_key}' has no '{MANAGED_BY_KEY}' tag and was not created by '{sentinel}'; leaving it untouched. Remove it or pick another id with --id."
		),
	}
}
