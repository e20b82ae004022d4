//! # roster-sync
//!
//! Command-line front end for roster reconciliation: reads an intended
//! participant CSV, registers everyone not yet in the target event, and
//! writes the participants that could not be added to a report CSV.
//!
//! ## Exit codes
//!
//! - `0`: run completed; the report (possibly empty) was written.
//! - `1`: malformed input, snapshot/subscription failure, or report-write
//!   failure. No partial report is left behind.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use roster_client::HttpEventService;
use roster_core::{filter_against_roster, EventService, ReconcileService};
use roster_csv::{read_participants, write_missing_report, ColumnMap};

/// Register a CSV of participants into a remote event and report the ones
/// that could not be added.
#[derive(Parser, Debug)]
#[command(name = "roster-sync")]
#[command(about = "Reconcile a participant CSV against a remote event roster")]
struct Args {
    /// Input CSV with a header row.
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the missing-player report CSV.
    #[arg(short, long)]
    output: PathBuf,

    /// Event to register the participants into.
    #[arg(long)]
    event_id: String,

    /// Event service base URL.
    #[arg(long)]
    endpoint: String,

    /// Bearer token for the event service.
    #[arg(long, env = "ROSTER_SYNC_TOKEN")]
    token: Option<String>,

    /// Header name of the first-name column.
    #[arg(long, default_value = "firstName")]
    first_name_column: String,

    /// Header name of the last-name column.
    #[arg(long, default_value = "lastName")]
    last_name_column: String,

    /// Header name of the email column.
    #[arg(long, default_value = "email")]
    email_column: String,

    /// Read, normalize and dedup only; attempt no registrations.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run(Args::parse()).await {
        error!("roster-sync failed: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let columns = ColumnMap {
        first_name: args.first_name_column,
        last_name: args.last_name_column,
        email: args.email_column,
    };

    // The client is built once here and passed down; nothing else holds a
    // session.
    info!(event_id = %args.event_id, endpoint = %args.endpoint, "connecting to event service");
    let service = Arc::new(
        HttpEventService::new(args.endpoint, args.event_id, args.token)
            .context("failed to construct event service client")?,
    );

    info!("fetching current event roster");
    let existing = service
        .players_in_event()
        .await
        .context("failed to fetch the existing player list")?;
    info!(count = existing.len(), "players already in event");

    let records = read_participants(&args.input, &columns)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(count = records.len(), "participant rows normalized");

    let (queued, skipped) = filter_against_roster(records, &existing);

    if args.dry_run {
        info!(
            would_attempt = queued.len(),
            skipped, "dry run; no registrations attempted"
        );
        return Ok(());
    }

    let mut orchestrator = ReconcileService::new(service);
    let report = orchestrator
        .run(queued)
        .await
        .context("reconciliation aborted")?;

    write_missing_report(&args.output, &report.missing, &columns)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        registered = report.registered,
        already_registered = report.already_registered,
        skipped,
        missing = report.missing.len(),
        "done"
    );
    Ok(())
}
