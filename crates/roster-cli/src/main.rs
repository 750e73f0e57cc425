// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster CLI - bulk user registration
//!
//! Reads a comma-delimited user list, validates each entry, and issues one
//! provisioning call per valid entry against the account-management service.
//! Operator-facing report lines go to stdout/stderr; diagnostics go through
//! `tracing` and stay quiet unless `RUST_LOG` asks for them.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use roster_common_core::{
	parse_line, LineOutcome, Role, RunAggregator, RunConfig, RunSummary, UserRecord,
};
use roster_common_secret::SecretString;

mod client;

use client::{ProvisionClient, ProvisionRequest, RegistrationOutcome};

/// Roster - bulk user registration for account provisioning
#[derive(Parser, Debug)]
#[command(name = "roster", version, about, long_about = None)]
struct Args {
	/// Username used to authenticate against the service
	user: String,

	/// Password used to authenticate against the service
	password: String,

	/// Account under which the users are provisioned
	account: String,

	/// User list file, one `username[,fullname[,role[,admin]]]` per line
	file: PathBuf,

	/// Default role for entries that omit the role field (a prefix is enough)
	#[arg(short = 'r', long, default_value = "viewer")]
	role: Role,

	/// Make entries that omit the admin field administrators
	#[arg(short = 'a', long)]
	admin: bool,

	/// Check the user list file only; do not register anyone
	#[arg(short = 'c', long)]
	check: bool,

	/// Base URL of the registration service
	#[arg(
		long,
		env = "ROSTER_SERVER_URL",
		default_value = "https://www.blueworkslive.com"
	)]
	server_url: Url,
}

fn init_tracing() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=warn"));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().compact().with_writer(std::io::stderr))
		.init();
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing();

	let config = RunConfig {
		username: args.user,
		password: SecretString::new(args.password),
		account: args.account,
		input: args.file,
		server_url: args.server_url,
		default_role: args.role,
		default_admin: args.admin,
		check_only: args.check,
	};

	info!(
		account = %config.account,
		input = %config.input.display(),
		check_only = config.check_only,
		"starting roster"
	);

	let summary = run(&config).await?;
	print_summary(&summary);
	Ok(())
}

/// The registration pipeline: read the list, resolve the endpoint, then
/// parse, report, and register line by line.
///
/// Only setup failures (an unreadable input file) are fatal. Every per-line
/// and per-user failure is reported and folded into the counters while the
/// batch keeps going.
async fn run(config: &RunConfig) -> Result<RunSummary> {
	let users = fs::read_to_string(&config.input)
		.with_context(|| format!("could not read file {}", config.input.display()))?;

	let client = ProvisionClient::new(config);
	let endpoint = if config.check_only {
		None
	} else {
		match client.resolve_service_provider().await {
			Ok(endpoint) => endpoint,
			Err(e) => {
				warn!(error = %e, "auth probe failed, falling back to the default server");
				eprintln!("ERROR: could not resolve service provider ({e}), using default server");
				None
			}
		}
	};

	let defaults = config.record_defaults();
	let mut aggregator = RunAggregator::new();

	for (index, raw) in users.lines().enumerate() {
		let line_number = index + 1;
		aggregator.record_line();

		match parse_line(raw, &defaults) {
			LineOutcome::Blank => {}
			LineOutcome::Invalid { reason } => {
				aggregator.record_user_entry();
				eprintln!(
					"ERROR: could not parse line {line_number} ({reason}):  {}",
					raw.trim()
				);
			}
			LineOutcome::Valid(record) => {
				aggregator.record_user_entry();
				aggregator.record_valid_entry();

				let request = ProvisionRequest::from(&record);
				println!(
					">REGISTRATION-REQUEST #{} for user {}: {}",
					aggregator.user_entries(),
					record.username,
					serde_json::to_string(&request)?
				);

				if !config.check_only {
					let outcome = client.register(&request, endpoint.as_ref()).await;
					report_outcome(&record, outcome, &mut aggregator)?;
				}
			}
		}
	}

	Ok(aggregator.summary())
}

fn report_outcome(
	record: &UserRecord,
	outcome: RegistrationOutcome,
	aggregator: &mut RunAggregator,
) -> Result<()> {
	match outcome {
		RegistrationOutcome::Registered { user } => {
			aggregator.record_registered();
			println!(
				"<REGISTRATION-RESULT successfully registered user {}: {}",
				record.username,
				serde_json::to_string(&user)?
			);
		}
		RegistrationOutcome::Rejected { status, message } => {
			warn!(username = %record.username, status = %status, "registration rejected");
			eprintln!(
				"ERROR: <REGISTRATION-ERROR for user {} (Code={}): {}",
				record.username,
				status.as_u16(),
				message
			);
		}
		RegistrationOutcome::Transport { reason } => {
			warn!(username = %record.username, reason = %reason, "registration transport failure");
			eprintln!(
				"ERROR: <REGISTRATION-ERROR for user {}: {}",
				record.username, reason
			);
		}
	}
	Ok(())
}

fn print_summary(summary: &RunSummary) {
	println!("=============== SUMMARY ===============");
	println!(" lines processed : {}", summary.lines_processed);
	println!(" user entries    : {}", summary.user_entries);
	println!(" valid entries   : {}", summary.valid_entries);
	println!(" registered users: {}", summary.registered);
	println!("=======================================");
}
