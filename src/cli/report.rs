use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::fmt::{bar, money, pct};
use crate::query::{CategoryFilter, FilterCriteria, MonthFilter};
use crate::tracker::Tracker;

pub(crate) fn describe_criteria(criteria: &FilterCriteria) -> String {
    let category = match criteria.category {
        CategoryFilter::All => "all categories".to_string(),
        CategoryFilter::Only(c) => c.label().to_string(),
    };
    let month = match criteria.month {
        MonthFilter::All => "all months".to_string(),
        MonthFilter::Only(m) => m.long_label(),
    };
    format!("{category}, {month}")
}

pub fn summary_text(tracker: &Tracker, criteria: &FilterCriteria, currency: &str) -> String {
    let summary = tracker.get_summary(criteria);

    let mut cards = Table::new();
    cards.set_header(vec!["Total Spent", "Avg/Transaction", "Transactions", "Top Category"]);
    let (top_tag, top_total) = summary.top_category_pair();
    let top = format!("{top_tag} ({})", money(top_total, currency));
    cards.add_row(vec![
        Cell::new(money(summary.total, currency)),
        Cell::new(money(summary.avg_per_transaction, currency)),
        Cell::new(summary.count),
        Cell::new(top),
    ]);

    let mut out = format!(
        "{} ({})\n{cards}",
        "Summary".bold(),
        describe_criteria(criteria)
    );

    if !summary.by_category.is_empty() {
        let mut breakdown = Table::new();
        breakdown.set_header(vec!["Category", "Amount", "%", ""]);
        for share in summary.ranked_categories() {
            breakdown.add_row(vec![
                Cell::new(share.category.label()),
                Cell::new(money(share.total, currency)),
                Cell::new(pct(share.pct)),
                Cell::new(bar(share.pct, 20)),
            ]);
        }
        out.push_str(&format!("\n\n{}\n{breakdown}", "Category Breakdown".bold()));
    }

    if summary.by_month.len() > 1 {
        let mut months = Table::new();
        months.set_header(vec!["Month", "Amount"]);
        for (month, total) in summary.by_month.iter().rev() {
            months.add_row(vec![
                Cell::new(month.long_label()),
                Cell::new(money(*total, currency)),
            ]);
        }
        out.push_str(&format!("\n\n{}\n{months}", "By Month".bold()));
    }

    out
}

pub fn list_text(tracker: &Tracker, criteria: &FilterCriteria, currency: &str) -> String {
    let expenses = tracker.get_filtered(criteria);
    if expenses.is_empty() {
        return format!(
            "{}\nAdd your first expense to get started.",
            "No expenses found".yellow()
        );
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Note", "Amount"]);
    for e in &expenses {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(e.date.format("%b %-d, %Y")),
            Cell::new(e.category.label()),
            Cell::new(&e.note),
            Cell::new(money(e.amount, currency)),
        ]);
    }
    format!(
        "{} ({} expenses, {})\n{table}",
        "Recent Transactions".bold(),
        expenses.len(),
        describe_criteria(criteria)
    )
}

pub fn months_text(tracker: &Tracker) -> String {
    tracker
        .get_month_options()
        .iter()
        .map(|m| format!("{m}  {}", m.long_label()))
        .collect::<Vec<_>>()
        .join("\n")
}
