use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TallyError;

/// Closed set of spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Travel,
    Bills,
    Entertainment,
    Shopping,
    Health,
    Other,
}

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// The category after this one, wrapping around. Used by selectors.
    pub fn next(self) -> Category {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Category {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag() == wanted)
            .ok_or_else(|| TallyError::UnknownCategory(s.to_string()))
    }
}

/// A calendar month, `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Long form label, e.g. "October 2025".
    pub fn long_label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TallyError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Month { year, month })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: u64,
    pub amount: f64,
    pub date: NaiveDate,
    pub note: String,
    pub category: Category,
}

impl Expense {
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

/// Raw form input, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub amount: String,
    pub date: String,
    pub note: String,
    pub category: Category,
}

/// A candidate that passed validation: amount parsed, date parsed, note trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub amount: f64,
    pub date: NaiveDate,
    pub note: String,
    pub category: Category,
}

impl ValidRecord {
    pub fn into_expense(self, id: u64) -> Expense {
        Expense {
            id,
            amount: self.amount,
            date: self.date,
            note: self.note,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" bills ".parse::<Category>().unwrap(), Category::Bills);
        assert!(matches!(
            "groceries".parse::<Category>(),
            Err(TallyError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_category_cycle_wraps() {
        assert_eq!(Category::Other.next(), Category::Food);
        assert_eq!(Category::Food.prev(), Category::Other);
        assert_eq!(Category::Food.next(), Category::Travel);
    }

    #[test]
    fn test_month_roundtrip_and_order() {
        let m: Month = "2025-09".parse().unwrap();
        assert_eq!(m.to_string(), "2025-09");
        assert!(m < "2025-10".parse().unwrap());
        assert!("2024-12".parse::<Month>().unwrap() < m);
        assert_eq!(m.long_label(), "September 2025");
    }

    #[test]
    fn test_month_rejects_garbage() {
        for bad in ["2025", "2025-13", "25-01", "2025-1", "abcd-ef", ""] {
            assert!(bad.parse::<Month>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_expense_month_matches_date_prefix() {
        let e = Expense {
            id: 1,
            amount: 10.0,
            date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            note: "x".into(),
            category: Category::Food,
        };
        assert_eq!(e.month().to_string(), e.date.to_string()[..7]);
    }
}
