use std::io::IsTerminal;

use crate::app::App;
use crate::demo::sample_store;
use crate::error::Result;
use crate::query::FilterCriteria;
use crate::settings::load_settings;
use crate::store::ExpenseStore;
use crate::tracker::Tracker;

use super::report;

pub fn run(empty: bool) -> Result<()> {
    let settings = load_settings();
    let store = if empty || !settings.seed_demo {
        ExpenseStore::new()
    } else {
        sample_store()
    };
    tracing::info!(expenses = store.len(), "starting session");
    let tracker = Tracker::new(store);

    if std::io::stdout().is_terminal() {
        App::new(tracker, &settings).run()
    } else {
        // Non-TTY: print the default view instead of drawing a screen.
        let criteria = FilterCriteria::default();
        println!("{}", report::summary_text(&tracker, &criteria, &settings.currency_symbol));
        println!();
        println!("{}", report::list_text(&tracker, &criteria, &settings.currency_symbol));
        Ok(())
    }
}
