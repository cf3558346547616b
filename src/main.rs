mod cli;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stride::config::Config;
use stride::engine::WalkEngine;
use stride::history::History;
use stride::storage::SqliteStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let Some(db_path) = config.history_db_path() else {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    };

    let store = match SqliteStore::open(&db_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open history database: {e}");
            process::exit(1);
        }
    };

    let history = match History::open(store) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Failed to load walk history: {e}");
            process::exit(1);
        }
    };

    let mut engine = WalkEngine::new(history);

    if let Err(e) = cli::run(cli, &mut engine) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
