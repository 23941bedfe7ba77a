// Replay a saved webhook delivery through the ingest pipeline.
// Usage: cargo run --bin ingest_payload -- --event push payload.json [--dry-run]

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use repo_activity_feed::config::Config;
use repo_activity_feed::database;
use repo_activity_feed::handlers::webhook::parse_payload;
use repo_activity_feed::services::normalizer::{self, EventKind, Normalized};
use repo_activity_feed::services::{ingest, IngestOutcome, PgEventStore};

#[derive(Parser, Debug)]
#[command(about = "Normalize and store a saved webhook payload")]
struct Args {
    /// Value the X-GitHub-Event header carried (`push` or `pull_request`)
    #[arg(short, long)]
    event: String,

    /// JSON file holding the delivery body
    file: PathBuf,

    /// Print the normalized record without writing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let body = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let payload = parse_payload(&body).context("No payload received")?;

    if args.dry_run {
        let kind = EventKind::from_header(&args.event)
            .with_context(|| format!("unrecognized event type: {}", args.event))?;
        match normalizer::normalize(kind, &payload, Utc::now())? {
            Normalized::Record(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            Normalized::Skipped { action } => println!("No record: pull request action '{}' is not tracked", action),
        }
        return Ok(());
    }

    // Load environment variables
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    let pool = database::new_pool(&config.database_url).await?;
    let store = PgEventStore::new(pool);

    match ingest(&store, Some(&args.event), &payload, Utc::now()).await {
        IngestOutcome::Stored(record) => {
            println!("Stored {} ({}) by {}", record.request_id, record.action, record.author);
        }
        IngestOutcome::Ignored(reason) => println!("Ignored: {:?}", reason),
        IngestOutcome::Failed(e) => anyhow::bail!("ingest failed: {}", e),
    }

    Ok(())
}
