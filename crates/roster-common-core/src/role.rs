// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The fixed role set and free-text role normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a token matches none of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

/// Access level assigned to a provisioned user.
///
/// The declaration order is the match order for [`Role::normalize`]: a
/// one-character token like `e` resolves to `Editor` because editor is
/// tested first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Editor,
	Contributor,
	Viewer,
}

impl Role {
	/// All roles in match order.
	pub const ALL: [Role; 3] = [Role::Editor, Role::Contributor, Role::Viewer];

	/// The lowercase role name, which is also its wire form.
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Editor => "editor",
			Role::Contributor => "contributor",
			Role::Viewer => "viewer",
		}
	}

	/// Resolves a free-text token to a role.
	///
	/// The token is trimmed and lower-cased, then tested against the role
	/// names in [`Role::ALL`] order; the first role whose name starts with
	/// the token wins. An empty token matches nothing.
	pub fn normalize(token: &str) -> Result<Role, UnknownRole> {
		let token = token.trim().to_lowercase();
		if token.is_empty() {
			return Err(UnknownRole(token));
		}
		Role::ALL
			.into_iter()
			.find(|role| role.as_str().starts_with(&token))
			.ok_or(UnknownRole(token))
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::normalize(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn every_prefix_resolves_in_match_order() {
		for role in Role::ALL {
			let name = role.as_str();
			for end in 1..=name.len() {
				let prefix = &name[..end];
				let expected = Role::ALL
					.into_iter()
					.find(|candidate| candidate.as_str().starts_with(prefix))
					.unwrap();
				assert_eq!(Role::normalize(prefix), Ok(expected), "prefix {prefix:?}");
			}
		}
	}

	#[test]
	fn single_letters_pick_the_first_match() {
		assert_eq!(Role::normalize("e"), Ok(Role::Editor));
		assert_eq!(Role::normalize("c"), Ok(Role::Contributor));
		assert_eq!(Role::normalize("v"), Ok(Role::Viewer));
	}

	#[test]
	fn normalization_ignores_case_and_whitespace() {
		assert_eq!(Role::normalize("  EDITOR "), Ok(Role::Editor));
		assert_eq!(Role::normalize("Con"), Ok(Role::Contributor));
	}

	#[test]
	fn empty_token_is_unknown() {
		assert_eq!(Role::normalize(""), Err(UnknownRole(String::new())));
		assert_eq!(Role::normalize("   "), Err(UnknownRole(String::new())));
	}

	#[test]
	fn unmatched_token_is_unknown() {
		assert_eq!(
			Role::normalize("xyz"),
			Err(UnknownRole("xyz".to_string()))
		);
	}

	#[test]
	fn unknown_role_mentions_the_token() {
		let err = Role::normalize("bogus").unwrap_err();
		assert_eq!(err.to_string(), "unknown role 'bogus'");
	}

	#[test]
	fn serializes_to_lowercase_name() {
		assert_eq!(
			serde_json::to_string(&Role::Contributor).unwrap(),
			"\"contributor\""
		);
	}

	#[test]
	fn from_str_delegates_to_normalize() {
		assert_eq!("ed".parse::<Role>(), Ok(Role::Editor));
		assert!("admin".parse::<Role>().is_err());
	}

	proptest! {
		#[test]
		fn normalize_never_panics(token in "\\PC{0,16}") {
			let _ = Role::normalize(&token);
		}

		#[test]
		fn a_match_is_always_a_name_prefix(token in "[a-z]{1,11}") {
			if let Ok(role) = Role::normalize(&token) {
				prop_assert!(role.as_str().starts_with(&token));
			}
		}
	}
}
