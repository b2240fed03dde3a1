use crate::error::Result;
use crate::form::ExpenseForm;
use crate::models::{Candidate, Expense, Month, ValidRecord};
use crate::query::{self, FilterCriteria, Summary};
use crate::store::ExpenseStore;
use crate::validator::{self, ValidationError};

/// The operations the presentation layer drives: validation, mutations and
/// filtered views over one [`ExpenseStore`].
#[derive(Debug, Default)]
pub struct Tracker {
    store: ExpenseStore,
}

impl Tracker {
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }

    pub fn validate(
        &self,
        candidate: &Candidate,
    ) -> std::result::Result<ValidRecord, ValidationError> {
        validator::validate(candidate)
    }

    pub fn add_expense(&mut self, record: ValidRecord) -> u64 {
        self.store.add(record)
    }

    pub fn update_expense(&mut self, id: u64, record: ValidRecord) -> Result<()> {
        self.store.update(id, record)
    }

    /// Callers must have confirmed the deletion with the user first.
    pub fn remove_expense(&mut self, id: u64) -> Option<Expense> {
        self.store.remove(id)
    }

    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.store.get(id)
    }

    pub fn expenses(&self) -> &[Expense] {
        self.store.list_all()
    }

    /// Matching expenses, newest first.
    pub fn get_filtered(&self, criteria: &FilterCriteria) -> Vec<Expense> {
        query::sort_by_date_desc(query::filter(self.store.list_all(), criteria))
    }

    pub fn get_summary(&self, criteria: &FilterCriteria) -> Summary {
        query::summarize(&query::filter(self.store.list_all(), criteria))
    }

    /// Months present anywhere in the collection, newest first.
    pub fn get_month_options(&self) -> Vec<Month> {
        query::distinct_months(self.store.list_all())
    }

    /// Validate the form and apply it: update when it is editing an expense,
    /// add otherwise. On a validation failure the error becomes the form's
    /// current error and nothing is stored. Otherwise the form is reset, even
    /// when the expense being edited has been deleted in the meantime.
    pub fn submit(&mut self, form: &mut ExpenseForm) -> Result<u64> {
        let record = match self.validate(&form.candidate()) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "rejected expense form");
                form.set_error(Some(e));
                return Err(e.into());
            }
        };

        let result = match form.editing_id() {
            Some(id) => self.update_expense(id, record).map(|()| id),
            None => Ok(self.add_expense(record)),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "dropped edit of a deleted expense");
        }
        form.reset();
        result
    }
}
