// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use colored::Colorize;
use vibe_check_installer_clients::{ClientRegistry, CREDENTIAL_ENV_KEYS};
use vibe_check_installer_config::LocateEnv;
use vibe_check_installer_core::{DevOptions, Transport, DEFAULT_ENTRY_ID};

use crate::install::{collect_credentials, install_clients, InstallContext, InstallRequest};
use crate::{InstallError, TerminalConfirmer};

#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
	/// Client to install into (repeatable). See `vibe-check-mcp clients`.
	#[arg(long = "client", required = true, value_name = "NAME")]
	pub clients: Vec<String>,

	/// Show the change as a diff without writing anything
	#[arg(long)]
	pub dry_run: bool,

	/// Never prompt; write changes without confirmation
	#[arg(long)]
	pub non_interactive: bool,

	/// Use this config file instead of the client's default location
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Register the HTTP transport instead of stdio
	#[arg(long)]
	pub http: bool,

	/// Port for the HTTP transport
	#[arg(long, env = "MCP_HTTP_PORT", default_value_t = crate::install::DEFAULT_HTTP_PORT)]
	pub port: u16,

	/// Key of the entry inside the client's server collection
	#[arg(long, default_value = DEFAULT_ENTRY_ID)]
	pub id: String,

	/// Ask editor clients to restart the server when its files change
	#[arg(long)]
	pub dev_watch: bool,

	/// Ask editor clients to attach a debugger of the given type
	#[arg(long, value_name = "TARGET")]
	pub dev_debug: Option<String>,
}

impl InstallArgs {
	/// Reject flag combinations that cannot apply to every selected client.
	pub fn validate(&self) -> Result<(), InstallError> {
		if self.config.is_some() && self.clients.len() > 1 {
			return Err(InstallError::ConfigWithManyClients {
				count: self.clients.len(),
			});
		}
		if self.id.trim().is_empty() {
			return Err(InstallError::EmptyId);
		}
		Ok(())
	}

	pub fn to_request(&self) -> InstallRequest {
		InstallRequest {
			dry_run: self.dry_run,
			non_interactive: self.non_interactive,
			config_path: self.config.clone(),
			transport: if self.http {
				Transport::Http
			} else {
				Transport::Stdio
			},
			port: self.port,
			id: self.id.trim().to_string(),
			dev: DevOptions {
				watch: self.dev_watch,
				debug: self.dev_debug.clone().filter(|d| !d.trim().is_empty()),
			},
		}
	}
}

pub fn run(args: InstallArgs) -> anyhow::Result<()> {
	args.validate()?;

	let request = args.to_request();
	let registry = ClientRegistry::with_defaults();
	let locate_env = LocateEnv::from_process();
	let credentials = collect_credentials(CREDENTIAL_ENV_KEYS, |key| std::env::var(key).ok());
	let confirmer = TerminalConfirmer;

	let ctx = InstallContext {
		registry: &registry,
		locate_env: &locate_env,
		credentials: &credentials,
		confirmer: &confirmer,
	};

	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	let runs = install_clients(&ctx, &args.clients, &request, &mut out);
	drop(out);

	let mut failed = 0;
	for run in &runs {
		if let Err(e) = &run.result {
			failed += 1;
			eprintln!(
				"{} {}: {}",
				"error:".red().bold(),
				run.client,
				error_chain(e)
			);
		}
	}

	if failed > 0 {
		anyhow::bail!("{failed} of {} client install(s) failed", runs.len());
	}
	Ok(())
}

/// `err` followed by each of its causes, separated by `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
	let mut message = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		message.push_str(": ");
		message.push_str(&cause.to_string());
		source = cause.source();
	}
	message
}
