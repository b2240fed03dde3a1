use colored::Colorize;

use crate::error::Result;
use crate::models::Category;
use crate::settings::{load_settings, save_settings, settings_path};

/// Print settings, or apply and save any values given.
pub fn run(
    currency: Option<String>,
    default_category: Option<String>,
    seed_demo: Option<bool>,
) -> Result<()> {
    let mut settings = load_settings();
    let changed = currency.is_some() || default_category.is_some() || seed_demo.is_some();

    if let Some(symbol) = currency {
        settings.currency_symbol = symbol;
    }
    if let Some(tag) = default_category {
        settings.default_category = tag.parse::<Category>()?;
    }
    if let Some(seed) = seed_demo {
        settings.seed_demo = seed;
    }

    if changed {
        save_settings(&settings)?;
        println!("{}", "Settings saved.".green());
    }

    println!("Settings file:    {}", settings_path().display());
    println!("Currency symbol:  {}", settings.currency_symbol);
    println!("Default category: {}", settings.default_category);
    println!("Seed demo data:   {}", settings.seed_demo);
    Ok(())
}
