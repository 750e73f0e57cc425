// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret wrapper type that prevents accidental logging of sensitive values.
//!
//! Wrap credentials in [`SecretString`] as early as possible and call
//! [`SecretString::expose`] only at the call site that actually needs the
//! value (e.g. when building an Authorization header). `Debug` and `Display`
//! both redact, so a secret that ends up in a tracing field or an error
//! message never leaks its contents.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string whose value never appears in `Debug` or `Display` output.
///
/// The inner buffer is zeroized when the wrapper is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	/// Wraps a sensitive value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the underlying secret value.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true if the secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the length of the secret in bytes.
	pub fn len(&self) -> usize {
		self.0.len()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(REDACTED)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("REDACTED")
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString)
	}
}
