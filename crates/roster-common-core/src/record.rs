// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Input line parsing into validated user records.
//!
//! One input line describes one user:
//!
//! ```text
//! username[,fullname[,role[,admin]]]
//! ```
//!
//! Blank lines are skipped. Fields are comma separated and trimmed
//! individually; omitted fields fall back to the configured defaults.

use thiserror::Error;

use crate::config::RecordDefaults;
use crate::role::{Role, UnknownRole};

/// A validated user entry ready for one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
	pub username: String,
	pub fullname: String,
	pub role: Role,
	pub admin: bool,
}

/// Why a non-blank line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
	#[error(transparent)]
	UnknownRole(#[from] UnknownRole),

	#[error("missing username")]
	MissingUsername,
}

/// Classified result of parsing one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
	/// The line was empty or whitespace only and is not a user entry.
	Blank,
	/// The line is a user entry that failed validation.
	Invalid { reason: ParseError },
	/// A validated record.
	Valid(UserRecord),
}

/// Parses one raw input line.
///
/// Field layout: username (required), fullname, role, admin. Anything past
/// the fourth field is ignored. A role that fails normalization rejects the
/// whole line. The admin field is a lenient boolean: `true` in any casing is
/// true, every other value is false.
pub fn parse_line(raw: &str, defaults: &RecordDefaults) -> LineOutcome {
	let line = raw.trim();
	if line.is_empty() {
		return LineOutcome::Blank;
	}

	// split always yields at least one field for a non-empty line
	let mut fields = line.split(',').map(str::trim);

	let username = fields.next().unwrap_or_default();
	if username.is_empty() {
		return LineOutcome::Invalid {
			reason: ParseError::MissingUsername,
		};
	}

	let fullname = fields.next().unwrap_or_default().to_string();

	let role = match fields.next() {
		Some(token) => match Role::normalize(token) {
			Ok(role) => role,
			Err(unknown) => {
				return LineOutcome::Invalid {
					reason: unknown.into(),
				}
			}
		},
		None => defaults.role,
	};

	let admin = match fields.next() {
		Some(token) => token.eq_ignore_ascii_case("true"),
		None => defaults.admin,
	};

	LineOutcome::Valid(UserRecord {
		username: username.to_string(),
		fullname,
		role,
		admin,
	})
}
