//! MatchLedger batch runner: reconcile a mail export against a contact
//! tracker and report matched volume.
//!
//! ```text
//! matchledger --tracker tracker.csv --aliases aliases.json \
//!     --blacklist blacklist.txt --messages export.jsonl \
//!     --include-unmatched \
//!     --unknown-out aliases.json \
//!     --totals-out totals.csv \
//!     --weekly-out weekly.txt --start-date 2024-05-20 --weeks 12
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use matchledger_core::{Registry, UnknownSender, total_counts, weekly_counts};
use tracing::info;

/// Match inbound mail against a contact roster and report volume over
/// time.
#[derive(Debug, Parser)]
#[command(name = "matchledger", version, about)]
struct Args {
    /// Tracker roster CSV export (repeatable).
    #[arg(long = "tracker", value_name = "CSV")]
    trackers: Vec<PathBuf>,

    /// Alias map JSON file (repeatable).
    #[arg(long = "aliases", value_name = "JSON")]
    aliases: Vec<PathBuf>,

    /// Blacklist file, one address per line (repeatable).
    #[arg(long = "blacklist", value_name = "TXT")]
    blacklists: Vec<PathBuf>,

    /// Message batch, one JSON record per line (repeatable).
    #[arg(long = "messages", value_name = "JSONL")]
    messages: Vec<PathBuf>,

    /// Also count unmatched messages, so weekly totals cover all
    /// non-suppressed traffic.
    #[arg(long)]
    include_unmatched: bool,

    /// Write (or merge into) an alias template for unknown senders.
    #[arg(long, value_name = "JSON")]
    unknown_out: Option<PathBuf>,

    /// Write the per-person totals CSV.
    #[arg(long, value_name = "CSV")]
    totals_out: Option<PathBuf>,

    /// Write the weekly histogram, one count per line.
    #[arg(long, value_name = "TXT", requires = "start_date")]
    weekly_out: Option<PathBuf>,

    /// Start date for the weekly histogram; aligned forward to Monday.
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Number of weekly buckets.
    #[arg(long, default_value_t = 12)]
    weeks: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut registry = Registry::new(args.include_unmatched);

    for path in &args.blacklists {
        let blacklist = matchledger_io::read_blacklist(path)
            .with_context(|| format!("reading blacklist {}", path.display()))?;
        info!(entries = blacklist.len(), path = %path.display(), "loaded blacklist");
        registry.add_blacklist(blacklist);
    }
    for path in &args.aliases {
        let aliases = matchledger_io::read_aliases(path)
            .with_context(|| format!("reading alias map {}", path.display()))?;
        info!(entries = aliases.len(), path = %path.display(), "loaded alias map");
        registry.add_aliases(aliases);
    }
    for path in &args.trackers {
        let people = matchledger_io::read_roster(path)
            .with_context(|| format!("reading tracker {}", path.display()))?;
        info!(people = people.len(), path = %path.display(), "loaded tracker");
        registry.add_people(people);
    }

    let mut unknown: BTreeSet<UnknownSender> = BTreeSet::new();
    for path in &args.messages {
        let batch = matchledger_io::read_messages(path)
            .with_context(|| format!("reading messages {}", path.display()))?;
        info!(messages = batch.len(), path = %path.display(), "resolving batch");
        unknown.extend(registry.resolve_batch(batch));
    }
    info!(
        people = registry.roster().len(),
        accounted = registry.all_messages().count(),
        unknown = unknown.len(),
        "resolution complete"
    );

    if let Some(path) = &args.unknown_out {
        matchledger_io::write_alias_template(path, &unknown)
            .with_context(|| format!("writing alias template {}", path.display()))?;
    }
    if let Some(path) = &args.totals_out {
        matchledger_io::write_totals(path, &total_counts(&registry))
            .with_context(|| format!("writing totals {}", path.display()))?;
    }
    if let Some(path) = &args.weekly_out {
        let start = args
            .start_date
            .context("--weekly-out requires --start-date")?;
        matchledger_io::write_weekly(path, &weekly_counts(&registry, start, args.weeks))
            .with_context(|| format!("writing weekly counts {}", path.display()))?;
    }
    Ok(())
}
