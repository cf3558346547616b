//! CLI interface for stride.
//!
//! Non-interactive subcommands over the walk engine: replay a recorded
//! fix log through a tracked session, list history by date bucket, and
//! show the weekly summary.

mod format;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use jiff::{Timestamp, tz::TimeZone};

use stride::engine::WalkEngine;
use stride::event::TrackerEvent;
use stride::history::DateBucket;
use stride::model::local_date;
use stride::provider::{ReplaySource, read_fix_log};
use stride::storage::SqliteStore;

use format::{format_distance, format_duration};

/// Stride — track your walks.
#[derive(Debug, Parser)]
#[command(name = "stride")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a recorded fix log through a session and archive the walk.
    ///
    /// The log holds one raw fix JSON object per line. The session
    /// spans the first fix's timestamp to the last's, so importing an
    /// old walk keeps its real date and duration.
    Track {
        /// File with one raw fix JSON object per line.
        fixes: PathBuf,
    },

    /// List recorded walks.
    History {
        /// Which walks to show.
        #[arg(long, value_enum, default_value_t = BucketArg::Today)]
        bucket: BucketArg,
    },

    /// Totals for the trailing seven days.
    Summary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BucketArg {
    Today,
    Yesterday,
    All,
}

impl From<BucketArg> for DateBucket {
    fn from(bucket: BucketArg) -> Self {
        match bucket {
            BucketArg::Today => DateBucket::Today,
            BucketArg::Yesterday => DateBucket::Yesterday,
            BucketArg::All => DateBucket::AllTime,
        }
    }
}

pub fn run(cli: Cli, engine: &mut WalkEngine<SqliteStore>) -> Result<(), String> {
    match cli.command {
        Command::Track { fixes } => cmd_track(engine, &fixes),
        Command::History { bucket } => cmd_history(engine, bucket.into()),
        Command::Summary => cmd_summary(engine),
    }
}

fn cmd_track(engine: &mut WalkEngine<SqliteStore>, path: &Path) -> Result<(), String> {
    let fixes =
        read_fix_log(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let (Some(first), Some(last)) = (fixes.first(), fixes.last()) else {
        return Err(format!("no fixes in {}", path.display()));
    };
    let started = first.timestamp;
    let ended = last.timestamp;

    engine.subscribe(|event| {
        if let TrackerEvent::PositionUpdated {
            distance_km, steps, ..
        } = event
        {
            eprintln!("{} · {steps} steps", format_distance(*distance_km));
        }
    });

    engine.start_walk(started);
    let mut source = ReplaySource::from_fixes(fixes);
    engine.run(&mut source);

    let record = engine
        .stop_walk(ended)
        .ok_or_else(|| "no active session to stop".to_string())?;

    println!(
        "Walk recorded: {} in {}, {} steps",
        format_distance(record.distance_km),
        format_duration(record.duration_seconds),
        record.steps
    );
    Ok(())
}

fn cmd_history(engine: &WalkEngine<SqliteStore>, bucket: DateBucket) -> Result<(), String> {
    let today = local_date(Timestamp::now());
    let walks = engine.history().query(bucket, today);

    if walks.is_empty() {
        println!("No walks recorded");
        return Ok(());
    }

    for walk in walks {
        let short_id = &walk.id.to_string()[..8];
        let when = walk.started_at.to_zoned(TimeZone::system());
        println!(
            "{short_id}  {}  {}  {}  {} steps",
            when.strftime("%Y-%m-%d %H:%M"),
            format_distance(walk.distance_km),
            format_duration(walk.duration_seconds),
            walk.steps
        );
    }

    Ok(())
}

fn cmd_summary(engine: &WalkEngine<SqliteStore>) -> Result<(), String> {
    let summary = engine.history().weekly_summary(Timestamp::now());

    println!("Walks this week: {}", summary.walks);
    println!("Distance: {}", format_distance(summary.distance_km));
    println!("Steps: {}", summary.steps);
    println!("Average walk: {}", format_distance(summary.avg_distance_km));

    Ok(())
}
