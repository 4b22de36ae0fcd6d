//! Main entry point for the transaction lifecycle tracker.
//!
//! Loads the configuration, builds a tracker and replays a scenario of
//! submissions through a scripted submission service. Every store change is
//! logged as it happens and the final state is printed as JSON.

use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tracker_config::Config;
use tracker_core::{ScriptedSubmission, Tracker, TrackerBuilder};
use tracker_types::{truncate_id, TrackerEvent, TransactionRecord};

mod scenario;

/// Command-line arguments for the tracker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Path to the JSON scenario to replay
	#[arg(short, long)]
	scenario: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the tracker.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration and the scenario
/// 4. Replays every submission and waits for all lifecycles to finish
/// 5. Prints the final store contents
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started tracker");

	let config = Config::from_file(&args.config).await?;
	tracing::info!("Loaded configuration [{}]", config.tracker.id);

	let entries = scenario::load(&args.scenario).await?;
	tracing::info!(submissions = entries.len(), "Loaded scenario");

	let tracker = TrackerBuilder::new(config).build()?;
	let transactions = replay(&tracker, entries).await?;

	println!("{}", serde_json::to_string_pretty(&transactions)?);

	tracing::info!("Stopped tracker");
	Ok(())
}

/// Submits every scenario entry and returns the final store contents.
async fn replay(
	tracker: &Tracker,
	entries: Vec<scenario::ScenarioEntry>,
) -> Result<BTreeMap<String, Vec<TransactionRecord>>, Box<dyn std::error::Error>> {
	let logger = spawn_event_logger(tracker);
	let service = ScriptedSubmission::new(tracker.config().tracker.event_buffer);

	let mut handles = Vec::with_capacity(entries.len());
	for entry in entries {
		service.push_script(entry.steps.clone());
		let handle = tracker
			.submit(&service, entry.intent(), entry.message.clone())
			.await?;
		handles.push(handle);
	}

	for handle in handles {
		if let Err(e) = handle.await {
			tracing::error!(error = %e, "Tracking task failed");
		}
	}
	logger.abort();

	Ok(tracker.store().snapshot().to_map().into_iter().collect())
}

/// Logs every change the store publishes on its event bus.
fn spawn_event_logger(tracker: &Tracker) -> tokio::task::JoinHandle<()> {
	let mut events = tracker.store().event_bus().subscribe();
	tokio::spawn(async move {
		loop {
			match events.recv().await {
				Ok(event) => log_event(&event),
				Err(RecvError::Lagged(skipped)) => {
					tracing::warn!(skipped, "Event logger fell behind");
				},
				Err(RecvError::Closed) => break,
			}
		}
	})
}

fn log_event(event: &TrackerEvent) {
	match event {
		TrackerEvent::Initialized { sender, id } => {
			tracing::info!(sender = %truncate_id(sender), submission_id = %id, "Initialized");
		},
		TrackerEvent::Pending { sender, id, hash } => {
			tracing::info!(sender = %truncate_id(sender), submission_id = %id, tx_hash = %truncate_id(hash.as_str()), "Pending");
		},
		TrackerEvent::Mined { sender, id } => {
			tracing::info!(sender = %truncate_id(sender), submission_id = %id, "Mined");
		},
		TrackerEvent::Failed {
			sender,
			id,
			error_type,
			error,
		} => {
			tracing::warn!(sender = %truncate_id(sender), submission_id = %id, error_type = %error_type, error = %error, "Failed");
		},
	}
}
