use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;
use crate::models::{Category, Expense, Month};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// All -> first category -> ... -> last category -> All.
    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[0]),
            CategoryFilter::Only(c) if c == Category::ALL[Category::ALL.len() - 1] => {
                CategoryFilter::All
            }
            CategoryFilter::Only(c) => CategoryFilter::Only(c.next()),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[Category::ALL.len() - 1]),
            CategoryFilter::Only(c) if c == Category::ALL[0] => CategoryFilter::All,
            CategoryFilter::Only(c) => CategoryFilter::Only(c.prev()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn matches(&self, month: Month) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => *m == month,
        }
    }

    /// Step through `options` (as returned by [`distinct_months`]), with All
    /// before the first entry and after the last.
    pub fn next_in(self, options: &[Month]) -> Self {
        let pos = match self {
            MonthFilter::All => None,
            MonthFilter::Only(m) => options.iter().position(|o| *o == m),
        };
        let next = match pos {
            None => options.first(),
            Some(i) => options.get(i + 1),
        };
        next.map_or(MonthFilter::All, |m| MonthFilter::Only(*m))
    }

    pub fn prev_in(self, options: &[Month]) -> Self {
        let pos = match self {
            MonthFilter::All => None,
            MonthFilter::Only(m) => options.iter().position(|o| *o == m),
        };
        let prev = match pos {
            None => options.last(),
            Some(0) => None,
            Some(i) => options.get(i - 1),
        };
        prev.map_or(MonthFilter::All, |m| MonthFilter::Only(*m))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => write!(f, "{m}"),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(MonthFilter::All)
        } else {
            s.parse().map(MonthFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub month: MonthFilter,
}

impl FilterCriteria {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.matches(expense.category) && self.month.matches(expense.month())
    }
}

// ---------------------------------------------------------------------------
// Filtering and ordering
// ---------------------------------------------------------------------------

/// Records matching `criteria`, in input order.
pub fn filter(expenses: &[Expense], criteria: &FilterCriteria) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect()
}

/// Most recent first. Records on the same date keep their input order.
pub fn sort_by_date_desc(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    expenses
}

/// Every month that has at least one record, newest first.
pub fn distinct_months(expenses: &[Expense]) -> Vec<Month> {
    let mut months: Vec<Month> = expenses.iter().map(Expense::month).collect();
    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();
    months
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// A category total with its share of the overall total, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    pub avg_per_transaction: f64,
    /// Present categories only, in the order they were first seen.
    pub by_category: Vec<CategoryTotal>,
    /// Present months only.
    pub by_month: BTreeMap<Month, f64>,
    pub top_category: Option<CategoryTotal>,
}

impl Summary {
    /// Category totals, largest first, each with its percentage of `total`.
    /// Equal totals keep first-seen order.
    pub fn ranked_categories(&self) -> Vec<CategoryShare> {
        let mut ranked: Vec<&CategoryTotal> = self.by_category.iter().collect();
        ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
        ranked
            .into_iter()
            .map(|c| CategoryShare {
                category: c.category,
                total: c.total,
                pct: percent_of_total(c.total, self.total),
            })
            .collect()
    }

    /// `(tag, amount)` of the top category, or `("none", 0.0)` when empty.
    pub fn top_category_pair(&self) -> (&'static str, f64) {
        self.top_category
            .as_ref()
            .map_or(("none", 0.0), |t| (t.category.tag(), t.total))
    }
}

pub fn summarize(expenses: &[Expense]) -> Summary {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let count = expenses.len();

    let mut by_category: Vec<CategoryTotal> = Vec::new();
    let mut by_month: BTreeMap<Month, f64> = BTreeMap::new();
    for e in expenses {
        match by_category.iter_mut().find(|c| c.category == e.category) {
            Some(c) => c.total += e.amount,
            None => by_category.push(CategoryTotal {
                category: e.category,
                total: e.amount,
            }),
        }
        *by_month.entry(e.month()).or_insert(0.0) += e.amount;
    }

    let avg_per_transaction = if count > 0 { total / count as f64 } else { 0.0 };

    // Strictly greater, so the first-seen category wins a tie.
    let top_category = by_category
        .iter()
        .fold(None::<&CategoryTotal>, |best, c| match best {
            Some(b) if c.total <= b.total => Some(b),
            _ => Some(c),
        })
        .cloned();

    Summary {
        total,
        count,
        avg_per_transaction,
        by_category,
        by_month,
        top_category,
    }
}

/// `amount` as a percentage of `total`; 0 when `total` is 0.
pub fn percent_of_total(amount: f64, total: f64) -> f64 {
    if total != 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn exp(id: u64, amount: f64, date: &str, category: Category) -> Expense {
        Expense {
            id,
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            note: format!("expense {id}"),
            category,
        }
    }

    fn pair() -> Vec<Expense> {
        vec![
            exp(1, 450.0, "2025-10-05", Category::Food),
            exp(2, 1200.0, "2025-10-04", Category::Bills),
        ]
    }

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn mixed() -> Vec<Expense> {
        vec![
            exp(1, 450.0, "2025-10-05", Category::Food),
            exp(2, 1200.0, "2025-10-04", Category::Bills),
            exp(3, 350.0, "2025-10-03", Category::Entertainment),
            exp(4, 2500.0, "2025-09-28", Category::Travel),
            exp(5, 899.0, "2025-09-25", Category::Shopping),
            exp(6, 120.0, "2025-09-01", Category::Food),
        ]
    }

    #[test]
    fn test_summarize_pair() {
        let s = summarize(&pair());
        assert_eq!(s.total, 1650.0);
        assert_eq!(s.count, 2);
        assert_eq!(s.avg_per_transaction, 825.0);
        assert_eq!(s.top_category_pair(), ("bills", 1200.0));
    }

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.total, 0.0);
        assert_eq!(s.count, 0);
        assert_eq!(s.avg_per_transaction, 0.0);
        assert!(s.by_category.is_empty());
        assert!(s.by_month.is_empty());
        assert!(s.top_category.is_none());
        assert_eq!(s.top_category_pair(), ("none", 0.0));
        assert!(s.ranked_categories().is_empty());
    }

    #[test]
    fn test_breakdowns_partition_total() {
        let s = summarize(&mixed());
        let by_cat: f64 = s.by_category.iter().map(|c| c.total).sum();
        let by_month: f64 = s.by_month.values().sum();
        assert_eq!(by_cat, s.total);
        assert_eq!(by_month, s.total);
        let food = s.by_category.iter().find(|c| c.category == Category::Food);
        assert_eq!(food.map(|c| c.total), Some(570.0));
        assert_eq!(s.by_month[&month("2025-09")], 3519.0);
        assert_eq!(s.by_month[&month("2025-10")], 2000.0);
        assert_eq!(s.by_month.len(), 2);
        assert!(s.by_category.iter().all(|c| c.category != Category::Health));
    }

    #[test]
    fn test_by_category_keeps_first_seen_order() {
        let s = summarize(&mixed());
        let order: Vec<Category> = s.by_category.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            [
                Category::Food,
                Category::Bills,
                Category::Entertainment,
                Category::Travel,
                Category::Shopping
            ]
        );
    }

    #[test]
    fn test_top_category_tie_goes_to_first_seen() {
        let items = vec![
            exp(1, 100.0, "2025-01-01", Category::Health),
            exp(2, 60.0, "2025-01-02", Category::Food),
            exp(3, 40.0, "2025-01-03", Category::Food),
        ];
        let s = summarize(&items);
        assert_eq!(s.top_category_pair(), ("health", 100.0));
        let ranked = s.ranked_categories();
        assert_eq!(ranked[0].category, Category::Health);
        assert_eq!(ranked[1].category, Category::Food);
    }

    #[test]
    fn test_ranked_categories_percentages() {
        let s = summarize(&pair());
        let ranked = s.ranked_categories();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category, Category::Bills);
        assert!((ranked[0].pct - 72.727).abs() < 0.01);
        let sum: f64 = ranked.iter().map(|r| r.pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_of_zero_total_is_zero() {
        assert_eq!(percent_of_total(10.0, 0.0), 0.0);
        assert_eq!(percent_of_total(25.0, 100.0), 25.0);
    }

    #[test]
    fn test_filter_by_category() {
        let criteria = FilterCriteria {
            category: CategoryFilter::Only(Category::Food),
            month: MonthFilter::All,
        };
        let out = filter(&pair(), &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_filter_by_month_and_category() {
        let criteria = FilterCriteria {
            category: CategoryFilter::Only(Category::Food),
            month: MonthFilter::Only(month("2025-09")),
        };
        let out = filter(&mixed(), &criteria);
        let ids: Vec<u64> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, [6]);
    }

    #[test]
    fn test_filter_all_returns_everything_in_order() {
        let items = mixed();
        let out = filter(&items, &FilterCriteria::default());
        assert_eq!(out, items);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = mixed();
        for criteria in [
            FilterCriteria::default(),
            FilterCriteria {
                category: CategoryFilter::Only(Category::Food),
                month: MonthFilter::All,
            },
            FilterCriteria {
                category: CategoryFilter::All,
                month: MonthFilter::Only(month("2025-10")),
            },
        ] {
            let once = filter(&items, &criteria);
            let twice = filter(&once, &criteria);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_sort_by_date_desc_is_stable() {
        let items = vec![
            exp(1, 1.0, "2025-01-01", Category::Food),
            exp(2, 1.0, "2025-03-01", Category::Food),
            exp(3, 1.0, "2025-02-01", Category::Food),
            exp(4, 1.0, "2025-03-01", Category::Bills),
        ];
        let ids: Vec<u64> = sort_by_date_desc(items).iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 4, 3, 1]);
    }

    #[test]
    fn test_distinct_months_sorted_desc() {
        let months = distinct_months(&mixed());
        assert_eq!(months, [month("2025-10"), month("2025-09")]);
        assert!(distinct_months(&[]).is_empty());
    }

    #[test]
    fn test_category_filter_cycle() {
        let mut f = CategoryFilter::All;
        for _ in 0..Category::ALL.len() + 1 {
            f = f.next();
        }
        assert_eq!(f, CategoryFilter::All);
        assert_eq!(CategoryFilter::All.prev(), CategoryFilter::Only(Category::Other));
        assert_eq!(CategoryFilter::Only(Category::Food).prev(), CategoryFilter::All);
    }

    #[test]
    fn test_month_filter_cycle() {
        let options = [month("2025-10"), month("2025-09")];
        let f = MonthFilter::All.next_in(&options);
        assert_eq!(f, MonthFilter::Only(options[0]));
        let f = f.next_in(&options);
        assert_eq!(f, MonthFilter::Only(options[1]));
        assert_eq!(f.next_in(&options), MonthFilter::All);
        assert_eq!(MonthFilter::All.prev_in(&options), MonthFilter::Only(options[1]));
        assert_eq!(MonthFilter::Only(options[0]).prev_in(&options), MonthFilter::All);
        assert_eq!(MonthFilter::All.next_in(&[]), MonthFilter::All);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "travel".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Travel)
        );
        assert!("snacks".parse::<CategoryFilter>().is_err());
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "2025-10".parse::<MonthFilter>().unwrap(),
            MonthFilter::Only(month("2025-10"))
        );
        assert!("October".parse::<MonthFilter>().is_err());
    }
}
