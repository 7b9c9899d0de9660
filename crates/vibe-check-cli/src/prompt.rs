// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::InstallError;

/// Asks the user whether a previewed change should be written.
pub trait Confirmer {
	fn confirm(&self, prompt: &str) -> Result<bool, InstallError>;
}

/// Interactive yes/no prompt on the controlling terminal. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
	fn confirm(&self, prompt: &str) -> Result<bool, InstallError> {
		if !std::io::stdin().is_terminal() {
			return Err(InstallError::NotInteractive);
		}
		Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
	}
}
