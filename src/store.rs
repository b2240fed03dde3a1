use crate::error::{Result, TallyError};
use crate::models::{Expense, ValidRecord};

/// In-memory expense collection, kept in insertion order.
///
/// Ids come from a counter that only moves forward, so an id is never handed
/// out twice in a session, even after the record holding it is removed.
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    next_id: u64,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store from records, assigning ids in iteration order.
    pub fn with_records(records: impl IntoIterator<Item = ValidRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.add(record);
        }
        store
    }

    pub fn add(&mut self, record: ValidRecord) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.expenses.push(record.into_expense(id));
        tracing::debug!(id, "added expense");
        id
    }

    /// Replace every field of the record with this id. The id itself is kept.
    pub fn update(&mut self, id: u64, record: ValidRecord) -> Result<()> {
        let slot = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(TallyError::NotFound(id))?;
        *slot = record.into_expense(id);
        tracing::debug!(id, "updated expense");
        Ok(())
    }

    /// Delete the record with this id. Absent ids are ignored.
    pub fn remove(&mut self, id: u64) -> Option<Expense> {
        let idx = self.expenses.iter().position(|e| e.id == id)?;
        tracing::debug!(id, "removed expense");
        Some(self.expenses.remove(idx))
    }

    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn list_all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }
}
