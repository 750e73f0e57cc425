// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client for the auth probe and the user provisioning endpoint.
//!
//! Every call carries HTTP Basic authentication built from the run
//! configuration. Registration results come back as values, not errors, so
//! the pipeline driver can keep the batch going after a rejected user or a
//! dead connection.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use roster_common_core::{Role, RunConfig, UserRecord};
use roster_common_secret::SecretString;

/// Protocol version sent with the auth probe.
const AUTH_VERSION: &str = "20110917";
/// Path of the auth probe endpoint.
const AUTH_PATH: &str = "/api/Auth";
/// Path of the user provisioning endpoint.
const PROVISION_PATH: &str = "/scr/api/provision/user/";
/// Value of the `Version` header sent with provisioning calls.
const PROVISION_API_VERSION: &str = "1.0";

/// Body of one provisioning request.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionRequest {
	pub username: String,
	pub fullname: String,
	pub license: Role,
	pub admin: bool,
}

impl From<&UserRecord> for ProvisionRequest {
	fn from(record: &UserRecord) -> Self {
		Self {
			username: record.username.clone(),
			fullname: record.fullname.clone(),
			license: record.role,
			admin: record.admin,
		}
	}
}

/// The user object echoed by the server on a successful registration.
///
/// Everything but the username is optional so a schema drift on the server
/// side never turns a successful registration into a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedUser {
	pub username: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fullname: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub license: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub admin: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
}

/// Error body shape used by the service for non-success responses.
#[derive(Debug, Deserialize)]
struct ApiError {
	message: String,
}

/// Body of the auth probe response.
#[derive(Debug, Deserialize)]
struct AuthResponse {
	result: String,
	#[serde(rename = "serviceProviderAddress")]
	service_provider_address: Option<String>,
}

/// Why the auth probe did not yield a usable answer.
///
/// Probe failures are non-fatal by contract: the driver logs them and falls
/// back to the default server.
#[derive(Debug, Error)]
pub enum AuthProbeError {
	#[error("auth request failed: {0}")]
	Transport(#[from] reqwest::Error),

	#[error("invalid endpoint URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("auth endpoint returned {status}")]
	Status { status: StatusCode },

	#[error("unexpected authentication result '{0}'")]
	NotAuthenticated(String),

	#[error("invalid service provider address '{address}': {source}")]
	InvalidAddress {
		address: String,
		source: url::ParseError,
	},
}

/// Classified result of one provisioning call.
#[derive(Debug)]
pub enum RegistrationOutcome {
	/// The server accepted the user and echoed the provisioned object.
	Registered { user: ProvisionedUser },
	/// The server answered with a non-success status.
	Rejected { status: StatusCode, message: String },
	/// The call never produced a usable HTTP response.
	Transport { reason: String },
}

/// Client for the account-management REST API.
pub struct ProvisionClient {
	http: reqwest::Client,
	server_url: Url,
	account: String,
	username: String,
	password: SecretString,
}

impl ProvisionClient {
	pub fn new(config: &RunConfig) -> Self {
		Self {
			http: roster_common_http::new_client(),
			server_url: config.server_url.clone(),
			account: config.account.clone(),
			username: config.username.clone(),
			password: config.password.clone(),
		}
	}

	/// Queries the auth endpoint to discover where the account is hosted.
	///
	/// `Ok(None)` means the account lives on the default server. Errors do
	/// not poison the run; the caller downgrades them and registers against
	/// the default server instead.
	pub async fn resolve_service_provider(&self) -> Result<Option<Url>, AuthProbeError> {
		let url = self.server_url.join(AUTH_PATH)?;
		debug!(url = %url, account = %self.account, "querying auth endpoint");

		let response = self
			.http
			.get(url)
			.query(&[("version", AUTH_VERSION), ("account", self.account.as_str())])
			.basic_auth(&self.username, Some(self.password.expose()))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AuthProbeError::Status { status });
		}

		let auth: AuthResponse = response.json().await?;
		if auth.result != "authenticated" {
			return Err(AuthProbeError::NotAuthenticated(auth.result));
		}

		match auth.service_provider_address {
			Some(address) => match Url::parse(&address) {
				Ok(resolved) => {
					debug!(service_provider = %resolved, "resolved service provider address");
					Ok(Some(resolved))
				}
				Err(source) => Err(AuthProbeError::InvalidAddress { address, source }),
			},
			None => Ok(None),
		}
	}

	/// Registers one user, classifying the response.
	///
	/// Sends exactly one PUT to the resolved endpoint (or the default server
	/// when none was resolved); never retries.
	pub async fn register(
		&self,
		user: &ProvisionRequest,
		endpoint: Option<&Url>,
	) -> RegistrationOutcome {
		let base = endpoint.unwrap_or(&self.server_url);
		let url = match base.join(PROVISION_PATH) {
			Ok(url) => url,
			Err(e) => {
				return RegistrationOutcome::Transport {
					reason: e.to_string(),
				}
			}
		};

		debug!(url = %url, username = %user.username, "sending provisioning request");

		let response = self
			.http
			.put(url)
			.query(&[("account", self.account.as_str())])
			.header("Version", PROVISION_API_VERSION)
			.basic_auth(&self.username, Some(self.password.expose()))
			.json(user)
			.send()
			.await;

		let response = match response {
			Ok(response) => response,
			Err(e) => {
				return RegistrationOutcome::Transport {
					reason: e.to_string(),
				}
			}
		};

		let status = response.status();
		if status == StatusCode::OK {
			match response.json::<ProvisionedUser>().await {
				Ok(user) => RegistrationOutcome::Registered { user },
				Err(e) => RegistrationOutcome::Transport {
					reason: format!("malformed response body: {e}"),
				},
			}
		} else {
			// Prefer the service's own message; fall back to the status line.
			let message = match response.json::<ApiError>().await {
				Ok(body) => body.message,
				Err(_) => status
					.canonical_reason()
					.unwrap_or("unknown status")
					.to_string(),
			};
			RegistrationOutcome::Rejected { status, message }
		}
	}
}
