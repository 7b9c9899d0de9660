// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Front end of the `vibe-check-mcp` installer.
//!
//! [`install::run_install`] drives one client through locate, read, merge and
//! then either a dry-run diff, a confirmed write, or manual setup
//! instructions when no config file exists. The `commands` module holds the
//! clap argument types and the glue that runs them against the real process
//! environment.

pub mod commands;
pub mod diff;
pub mod error;
pub mod install;
pub mod manual;
pub mod prompt;

pub use error::InstallError;
pub use install::{
	collect_credentials, desired_entry, install_clients, run_install, ClientRun, InstallContext,
	InstallOutcome, InstallRequest,
};
pub use prompt::{Confirmer, TerminalConfirmer};
