// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Per-invocation run configuration.

use std::path::PathBuf;

use roster_common_secret::SecretString;
use url::Url;

use crate::role::Role;

/// Immutable configuration for one registration run.
///
/// Built once from the command line and passed explicitly into every
/// component that needs it; nothing mutates it after startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
	/// Username for HTTP Basic authentication.
	pub username: String,
	/// Password for HTTP Basic authentication.
	pub password: SecretString,
	/// The account under which users are provisioned.
	pub account: String,
	/// Path to the user list file.
	pub input: PathBuf,
	/// Base URL of the registration service.
	pub server_url: Url,
	/// Role applied to entries that omit the role field.
	pub default_role: Role,
	/// Admin flag applied to entries that omit the admin field.
	pub default_admin: bool,
	/// Parse and validate only; never issue network calls.
	pub check_only: bool,
}

impl RunConfig {
	/// The fallback field values the parser applies to incomplete lines.
	pub fn record_defaults(&self) -> RecordDefaults {
		RecordDefaults {
			role: self.default_role,
			admin: self.default_admin,
		}
	}
}

/// Fallback field values applied while parsing input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDefaults {
	pub role: Role,
	pub admin: bool,
}
