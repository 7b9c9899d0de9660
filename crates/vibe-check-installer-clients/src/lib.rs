// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client adapters for the vibe-check installer.
//!
//! Every supported application implements [`ClientAdapter`]: where its config
//! lives, which collection holds MCP servers, how entries are shaped, and the
//! metadata used for manual setup instructions. Adapters are looked up by
//! name through [`ClientRegistry`].

pub mod adapter;
pub mod clients;
pub mod links;
pub mod registry;

pub use adapter::{ClientAdapter, ClientDescriptor, CREDENTIAL_ENV_KEYS};
pub use clients::{ClaudeCode, ClaudeDesktop, Cursor, VsCode, Windsurf};
pub use registry::ClientRegistry;
