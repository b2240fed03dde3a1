use chrono::NaiveDate;

use crate::models::{Category, ValidRecord};
use crate::store::ExpenseStore;

/// Five expenses across two months and five categories:
/// `(amount, (year, month, day), note, category)`.
const SAMPLES: &[(f64, (i32, u32, u32), &str, Category)] = &[
    (450.00, (2025, 10, 5), "Grocery shopping at D-Mart", Category::Food),
    (1200.00, (2025, 10, 4), "Monthly internet bill", Category::Bills),
    (350.00, (2025, 10, 3), "Movie tickets", Category::Entertainment),
    (2500.00, (2025, 9, 28), "Flight booking to Goa", Category::Travel),
    (899.00, (2025, 9, 25), "New headphones", Category::Shopping),
];

pub fn sample_records() -> Vec<ValidRecord> {
    SAMPLES
        .iter()
        .filter_map(|&(amount, (y, m, d), note, category)| {
            Some(ValidRecord {
                amount,
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                note: note.to_string(),
                category,
            })
        })
        .collect()
}

pub fn sample_store() -> ExpenseStore {
    ExpenseStore::with_records(sample_records())
}
