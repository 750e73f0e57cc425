// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Request timeout applied by [`new_client`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a new HTTP client with the standard roster User-Agent header and
/// the default timeout.
pub fn new_client() -> Client {
	builder().build().expect("failed to build HTTP client")
}

/// Creates a new HTTP client builder with the standard roster User-Agent
/// header.
///
/// Use this when you need to customize the client (e.g., set a different
/// timeout).
///
/// # Example
/// ```ignore
/// let client = roster_common_http::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.timeout(DEFAULT_TIMEOUT)
}

/// Creates a new HTTP client with a custom timeout and the standard
/// User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> Client {
	builder()
		.timeout(timeout)
		.build()
		.expect("failed to build HTTP client")
}

/// Returns the standard roster User-Agent string.
///
/// Format: `roster/{version}`
pub fn user_agent() -> String {
	format!("roster/{}", env!("CARGO_PKG_VERSION"))
}
