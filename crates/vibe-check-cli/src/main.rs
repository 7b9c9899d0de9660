// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vibe_check_cli::commands;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "vibe-check-mcp")]
#[command(about = "Register the vibe-check MCP server with your agent and editor clients")]
#[command(version)]
struct Args {
	/// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
	#[arg(short, long, global = true, env = "VIBE_CHECK_LOG_LEVEL")]
	log_level: Option<String>,

	/// Emit logs as JSON
	#[arg(long, global = true)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Add or update the vibe-check entry in a client's MCP config
	Install(commands::install::InstallArgs),

	/// List supported clients
	Clients,

	/// Print version information
	Version,
}

fn init_tracing(level: Option<&str>, json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL))
			.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
	});

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

fn run(args: Args) -> anyhow::Result<()> {
	match args.command {
		Command::Install(install) => commands::install::run(install),
		Command::Clients => commands::clients::run(),
		Command::Version => {
			println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
			Ok(())
		}
	}
}

fn main() -> ExitCode {
	// A missing .env is normal.
	let _ = dotenvy::dotenv();

	let args = Args::parse();
	init_tracing(args.log_level.as_deref(), args.json_logs);

	match run(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{} {e:#}", "error:".red().bold());
			ExitCode::FAILURE
		}
	}
}
