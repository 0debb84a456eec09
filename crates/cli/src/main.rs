//! `fwbt` — command-line driver for Fixed Width Binary Table files.
//!
//! Loads a table, prints its header or entries, and applies single edits.
//!
//! # Environment Variables
//!
//! - `FWBT_LOG`: log filter, takes precedence over `RUST_LOG` (default: `fwbt=info`)

mod bytes;
mod commands;
mod run;

use std::io;
use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::build_cli;

const DEFAULT_LOG_FILTER: &str = "fwbt=info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("FWBT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() {
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let matches = build_cli().get_matches();
    let stdout = io::stdout();
    if let Err(e) = run::run(&matches, &mut stdout.lock()) {
        tracing::error!("{e:#}");
        process::exit(1);
    }
}
