// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Unified diff preview of a pending config change.

use std::path::Path;

use colored::Colorize;
use similar::TextDiff;

/// Line-based unified diff with three lines of context, labelled `a/<path>`
/// and `b/<path>`.
pub fn unified_diff(path: &Path, before: &str, after: &str) -> String {
	let label = path.display().to_string();
	TextDiff::from_lines(before, after)
		.unified_diff()
		.context_radius(3)
		.header(&format!("a/{label}"), &format!("b/{label}"))
		.to_string()
}

/// Colour added, removed and hunk-header lines for the terminal.
pub fn colorize(diff: &str) -> String {
	let mut out = String::with_capacity(diff.len());
	for line in diff.lines() {
		let painted = if line.starts_with("+++") || line.starts_with("---") {
			line.bold().to_string()
		} else if line.starts_with("@@") {
			line.cyan().to_string()
		} else if line.starts_with('+') {
			line.green().to_string()
		} else if line.starts_with('-') {
			line.red().to_string()
		} else {
			line.to_string()
		};
		out.push_str(&painted);
		out.push('\n');
	}
	out
}
