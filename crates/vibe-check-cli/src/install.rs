// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Install orchestration: locate, read, merge, then preview or write.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, info, instrument, warn};
use vibe_check_installer_clients::{ClientAdapter, ClientRegistry};
use vibe_check_installer_config::{to_pretty_json, LocateEnv};
use vibe_check_installer_core::{
	DevOptions, EntryShape, ManagedEntry, MergeOptions, MergeStatus, Transport, DEFAULT_ENTRY_ID,
	DEFAULT_SENTINEL,
};

use crate::diff::{colorize, unified_diff};
use crate::manual::manual_instructions;
use crate::prompt::Confirmer;
use crate::InstallError;

/// Launch command written into every entry.
pub const SERVER_COMMAND: &str = "npx";

/// npm package that provides the server.
pub const SERVER_PACKAGE: &str = "@pv-bhat/vibe-check-mcp";

pub const DEFAULT_HTTP_PORT: u16 = 2091;

/// What one install run should do. Built from CLI flags; applies to every
/// selected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
	pub dry_run: bool,
	pub non_interactive: bool,
	/// Overrides the located config path.
	pub config_path: Option<PathBuf>,
	pub transport: Transport,
	pub port: u16,
	pub id: String,
	pub dev: DevOptions,
}

impl Default for InstallRequest {
	fn default() -> Self {
		Self {
			dry_run: false,
			non_interactive: false,
			config_path: None,
			transport: Transport::Stdio,
			port: DEFAULT_HTTP_PORT,
			id: DEFAULT_ENTRY_ID.to_string(),
			dev: DevOptions::default(),
		}
	}
}

impl InstallRequest {
	pub fn server_url(&self) -> String {
		format!("http://127.0.0.1:{}/mcp", self.port)
	}

	pub fn server_args(&self) -> Vec<String> {
		let mut args = vec!["-y".to_string(), SERVER_PACKAGE.to_string(), "start".to_string()];
		match self.transport {
			Transport::Stdio => args.push("--stdio".to_string()),
			Transport::Http => {
				args.push("--http".to_string());
				args.push("--port".to_string());
				args.push(self.port.to_string());
			}
		}
		args
	}
}

/// Non-fatal result of installing into one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
	/// No config file was found; setup instructions were printed instead.
	ManualInstructions,
	UpToDate { path: PathBuf },
	/// The entry id is taken by the user or another tool.
	Conflict { path: PathBuf, reason: String },
	DryRun { path: PathBuf, diff: String },
	Written { path: PathBuf, status: MergeStatus },
	/// The user declined the confirmation prompt.
	Declined { path: PathBuf },
}

impl InstallOutcome {
	/// True when the config file on disk was replaced.
	pub fn wrote(&self) -> bool {
		matches!(self, Self::Written { .. })
	}
}

/// Everything an install run reads from its surroundings.
pub struct InstallContext<'a> {
	pub registry: &'a ClientRegistry,
	pub locate_env: &'a LocateEnv,
	/// Credential values to copy into the entry's `env`, keyed by variable name.
	pub credentials: &'a BTreeMap<String, String>,
	pub confirmer: &'a dyn Confirmer,
}

/// Collect the credential variables that are set and non-empty.
pub fn collect_credentials<F>(keys: &[&str], lookup: F) -> BTreeMap<String, String>
where
	F: Fn(&str) -> Option<String>,
{
	keys.iter()
		.filter_map(|key| {
			lookup(*key)
				.filter(|value| !value.trim().is_empty())
				.map(|value| (key.to_string(), value))
		})
		.collect()
}

/// Merge options and entry for `client`, checking the requested transport.
pub fn desired_entry(
	client: &dyn ClientAdapter,
	request: &InstallRequest,
	credentials: &BTreeMap<String, String>,
) -> Result<(MergeOptions, ManagedEntry), InstallError> {
	let descriptor = client.describe();
	if !descriptor.supports(request.transport) {
		return Err(InstallError::UnsupportedTransport {
			client: descriptor.display_name.to_string(),
			transport: request.transport,
		});
	}

	let url = (request.transport == Transport::Http).then(|| request.server_url());
	let mut options =
		MergeOptions::new(&request.id, DEFAULT_SENTINEL).with_transport(request.transport, url);

	if !request.dev.is_empty() {
		if client.entry_shape() == EntryShape::Editor {
			options = options.with_dev(request.dev.clone());
		} else {
			warn!(
				client = %client.name(),
				"development flags are only written for editor-style clients; ignoring"
			);
		}
	}

	let env = descriptor
		.required_env_keys
		.iter()
		.filter_map(|key| credentials.get(*key).map(|v| (key.to_string(), v.clone())))
		.collect();

	let entry = ManagedEntry::from_options(&options, SERVER_COMMAND, request.server_args(), env);
	Ok((options, entry))
}

/// Install into a single client by name.
///
/// Output meant for the user goes to `out`. Not finding a config file,
/// finding the entry already current, and ownership conflicts are reported
/// as outcomes; only unusable input or failed writes are errors.
#[instrument(skip_all, fields(client = %client_name, dry_run = request.dry_run))]
pub fn run_install(
	ctx: &InstallContext<'_>,
	client_name: &str,
	request: &InstallRequest,
	out: &mut dyn Write,
) -> Result<InstallOutcome, InstallError> {
	let client = ctx
		.registry
		.get(client_name)
		.ok_or_else(|| InstallError::UnknownClient {
			name: client_name.to_string(),
			valid: ctx.registry.names().iter().map(|n| n.to_string()).collect(),
		})?;
	let descriptor = client.describe();

	let (options, entry) = desired_entry(client, request, ctx.credentials)?;
	let payload = client.shape_entry(&entry);

	let Some(path) = client.locate(request.config_path.as_deref(), ctx.locate_env) else {
		info!("no config file found; printing manual instructions");
		let text = manual_instructions(client, &payload, &options, !entry.env.is_empty())?;
		write!(out, "{text}")?;
		return Ok(InstallOutcome::ManualInstructions);
	};
	debug!(path = %path.display(), "using config file");

	let document = client.read(&path, None)?;
	let result = client.merge(&document, &entry, &options)?;

	match &result.status {
		MergeStatus::UpToDate => {
			writeln!(
				out,
				"{} {} is already up to date ({}); no changes needed.",
				"✓".green(),
				descriptor.display_name,
				path.display()
			)?;
			return Ok(InstallOutcome::UpToDate { path });
		}
		MergeStatus::Conflict { reason, .. } => {
			writeln!(out, "{} {}: {}", "!".yellow(), descriptor.display_name, reason)?;
			writeln!(out, "  No changes made to {}.", path.display())?;
			return Ok(InstallOutcome::Conflict {
				path,
				reason: reason.clone(),
			});
		}
		MergeStatus::Inserted | MergeStatus::Updated => {}
	}

	let before = to_pretty_json(&document)?;
	let after = to_pretty_json(&result.document)?;
	let diff = unified_diff(&path, &before, &after);

	if request.dry_run {
		writeln!(
			out,
			"{} ({})",
			"Dry run: no changes written".yellow().bold(),
			path.display()
		)?;
		write!(out, "{}", colorize(&diff))?;
		return Ok(InstallOutcome::DryRun { path, diff });
	}

	if !request.non_interactive {
		write!(out, "{}", colorize(&diff))?;
		out.flush()?;
		let prompt = format!("Write these changes to {}?", path.display());
		if !ctx.confirmer.confirm(&prompt)? {
			writeln!(out, "Aborted; {} left unchanged.", path.display())?;
			return Ok(InstallOutcome::Declined { path });
		}
	}

	let status = result.status.clone();
	client.write_atomic(&path, &result.document)?;

	let verb = match status {
		MergeStatus::Updated => "Updated",
		_ => "Added",
	};
	writeln!(
		out,
		"{} {} '{}' in {} ({})",
		"✓".green(),
		verb,
		options.id,
		descriptor.display_name,
		path.display()
	)?;
	Ok(InstallOutcome::Written { path, status })
}

/// Result of one client in a multi-client run.
#[derive(Debug)]
pub struct ClientRun {
	pub client: String,
	pub result: Result<InstallOutcome, InstallError>,
}

/// Install into each named client in turn. A failure for one client does not
/// stop the others.
pub fn install_clients(
	ctx: &InstallContext<'_>,
	clients: &[String],
	request: &InstallRequest,
	out: &mut dyn Write,
) -> Vec<ClientRun> {
	clients
		.iter()
		.map(|client| {
			let result = run_install(ctx, client, request, out);
			if let Err(e) = &result {
				warn!(client = %client, error = %e, "install failed");
			}
			ClientRun {
				client: client.clone(),
				result,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use vibe_check_installer_clients::{ClaudeDesktop, Cursor, VsCode};

	#[test]
	fn test_stdio_args() {
		let request = InstallRequest::default();

		assert_eq!(
			request.server_args(),
			vec!["-y", "@pv-bhat/vibe-check-mcp", "start", "--stdio"]
		);
	}

	#[test]
	fn test_http_args_and_url_follow_port() {
		let request = InstallRequest {
			transport: Transport::Http,
			port: 3000,
			..InstallRequest::default()
		};

		assert_eq!(
			request.server_args(),
			vec!["-y", "@pv-bhat/vibe-check-mcp", "start", "--http", "--port", "3000"]
		);
		assert_eq!(request.server_url(), "http://127.0.0.1:3000/mcp");
	}

	#[test]
	fn test_collect_credentials_skips_blank_values() {
		let credentials = collect_credentials(&["A", "B", "C"], |key| match key {
			"A" => Some("secret".to_string()),
			"B" => Some("  ".to_string()),
			_ => None,
		});

		assert_eq!(credentials.len(), 1);
		assert_eq!(credentials["A"], "secret");
	}

	#[test]
	fn test_unsupported_transport_is_rejected() {
		let request = InstallRequest {
			transport: Transport::Http,
			..InstallRequest::default()
		};

		let err = desired_entry(&ClaudeDesktop, &request, &BTreeMap::new()).unwrap_err();
		assert!(matches!(err, InstallError::UnsupportedTransport { .. }));
		assert!(err.is_usage_error());
	}

	#[test]
	fn test_dev_flags_dropped_for_flat_clients() {
		let request = InstallRequest {
			dev: DevOptions {
				watch: true,
				debug: None,
			},
			..InstallRequest::default()
		};

		let (options, entry) = desired_entry(&Cursor, &request, &BTreeMap::new()).unwrap();
		assert!(options.dev.is_none());
		assert!(entry.dev.is_none());

		let (options, _) = desired_entry(&VsCode, &request, &BTreeMap::new()).unwrap();
		assert!(options.dev.is_some());
	}

	#[test]
	fn test_only_known_credentials_reach_the_entry() {
		let mut credentials = BTreeMap::new();
		credentials.insert("OPENAI_API_KEY".to_string(), "sk-test".to_string());
		credentials.insert("UNRELATED".to_string(), "x".to_string());

		let (_, entry) =
			desired_entry(&Cursor, &InstallRequest::default(), &credentials).unwrap();

		assert_eq!(entry.env.len(), 1);
		assert_eq!(entry.env["OPENAI_API_KEY"], "sk-test");
	}
}
