pub mod config;
pub mod report;
pub mod session;

use clap::{Args, Parser, Subcommand};

use crate::demo::sample_store;
use crate::error::Result;
use crate::query::{CategoryFilter, FilterCriteria, MonthFilter};
use crate::settings::load_settings;
use crate::tracker::Tracker;

#[derive(Parser)]
#[command(name = "tally", about = "Personal expense tracker for the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (the default).
    Run {
        /// Start with no expenses instead of the sample data
        #[arg(long)]
        empty: bool,
    },
    /// Show summary statistics for the sample expenses.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List the sample expenses, newest first.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List the months that have expenses, newest first.
    Months,
    /// Show or change settings.
    Config {
        /// Currency symbol shown before amounts
        #[arg(long)]
        currency: Option<String>,
        /// Category preselected in the add form
        #[arg(long = "default-category")]
        default_category: Option<String>,
        /// Load the sample expenses when a session starts
        #[arg(long = "seed-demo")]
        seed_demo: Option<bool>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Category tag (food, travel, bills, entertainment, shopping, health, other) or "all"
    #[arg(long, default_value = "all")]
    pub category: String,
    /// Month: YYYY-MM or "all"
    #[arg(long, default_value = "all")]
    pub month: String,
}

impl FilterArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            category: self.category.parse::<CategoryFilter>()?,
            month: self.month.parse::<MonthFilter>()?,
        })
    }
}

pub fn summary(filter: &FilterArgs) -> Result<()> {
    let settings = load_settings();
    let tracker = Tracker::new(sample_store());
    let text = report::summary_text(&tracker, &filter.criteria()?, &settings.currency_symbol);
    println!("{text}");
    Ok(())
}

pub fn list(filter: &FilterArgs) -> Result<()> {
    let settings = load_settings();
    let tracker = Tracker::new(sample_store());
    let text = report::list_text(&tracker, &filter.criteria()?, &settings.currency_symbol);
    println!("{text}");
    Ok(())
}

pub fn months() -> Result<()> {
    let tracker = Tracker::new(sample_store());
    println!("{}", report::months_text(&tracker));
    Ok(())
}
