// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;

use colored::Colorize;
use vibe_check_installer_clients::ClientRegistry;

/// Print every registered client with its transports, config location and docs.
pub fn list_clients(registry: &ClientRegistry, out: &mut dyn Write) -> std::io::Result<()> {
	for client in registry.iter() {
		let descriptor = client.describe();
		let transports: Vec<&str> = descriptor.transports.iter().map(|t| t.as_str()).collect();

		writeln!(
			out,
			"{:<12} {}",
			descriptor.name.bold(),
			descriptor.display_name
		)?;
		writeln!(
			out,
			"  transports: {} (default {})",
			transports.join(", "),
			descriptor.default_transport
		)?;
		writeln!(out, "  config:     {}", descriptor.path_hint.dimmed())?;
		writeln!(out, "  docs:       {}", descriptor.docs_url)?;
	}
	Ok(())
}

pub fn run() -> anyhow::Result<()> {
	let registry = ClientRegistry::with_defaults();
	let stdout = std::io::stdout();
	list_clients(&registry, &mut stdout.lock())?;
	Ok(())
}
