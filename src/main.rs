mod app;
mod cli;
mod demo;
mod error;
mod fmt;
mod form;
mod models;
mod query;
mod settings;
mod store;
mod tracker;
mod tui;
mod validator;

use std::sync::Once;

use clap::Parser;
use tracing_subscriber::{fmt as log_fmt, EnvFilter};

use cli::{Cli, Commands};

static TRACING_INIT: Once = Once::new();

/// Log to stderr. `TALLY_LOG` overrides the default `tally=warn` filter.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TALLY_LOG")
            .unwrap_or_else(|_| EnvFilter::new("tally=warn"));
        log_fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::session::run(false),
        Some(Commands::Run { empty }) => cli::session::run(empty),
        Some(Commands::Summary { filter }) => cli::summary(&filter),
        Some(Commands::List { filter }) => cli::list(&filter),
        Some(Commands::Months) => cli::months(),
        Some(Commands::Config {
            currency,
            default_category,
            seed_demo,
        }) => cli::config::run(currency, default_category, seed_demo),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
