use chrono::Local;

use crate::models::{Candidate, Category, Expense};
use crate::validator::{ValidationError, DATE_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Date,
    Category,
    Note,
}

impl FormField {
    pub const ORDER: [FormField; 4] = [
        FormField::Amount,
        FormField::Date,
        FormField::Category,
        FormField::Note,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Amount => "Amount",
            FormField::Date => "Date",
            FormField::Category => "Category",
            FormField::Note => "Note/Description",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Entry/edit form state. Holds raw text; nothing is checked until submit.
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub amount: String,
    pub date: String,
    pub note: String,
    pub category: Category,
    pub focus: FormField,
    default_category: Category,
    editing_id: Option<u64>,
    error: Option<ValidationError>,
}

impl ExpenseForm {
    pub fn new(default_category: Category) -> Self {
        Self {
            amount: String::new(),
            date: today(),
            note: String::new(),
            category: default_category,
            focus: FormField::Amount,
            default_category,
            editing_id: None,
            error: None,
        }
    }

    /// Load an existing expense for editing.
    pub fn edit(&mut self, expense: &Expense) {
        self.amount = expense.amount.to_string();
        self.date = expense.date.format(DATE_FORMAT).to_string();
        self.note = expense.note.clone();
        self.category = expense.category;
        self.focus = FormField::Amount;
        self.editing_id = Some(expense.id);
        self.error = None;
    }

    /// Back to a blank form dated today, leaving edit mode and clearing errors.
    pub fn reset(&mut self) {
        *self = Self::new(self.default_category);
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Replace the current error. `None` clears it.
    pub fn set_error(&mut self, error: Option<ValidationError>) {
        self.error = error;
    }

    pub fn candidate(&self) -> Candidate {
        Candidate {
            amount: self.amount.clone(),
            date: self.date.clone(),
            note: self.note.clone(),
            category: self.category,
        }
    }

    /// The text buffer behind the focused field, if it is a text field.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Amount => Some(&mut self.amount),
            FormField::Date => Some(&mut self.date),
            FormField::Note => Some(&mut self.note),
            FormField::Category => None,
        }
    }

    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Amount => self.amount.clone(),
            FormField::Date => self.date.clone(),
            FormField::Note => self.note.clone(),
            FormField::Category => self.category.label().to_string(),
        }
    }
}

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
