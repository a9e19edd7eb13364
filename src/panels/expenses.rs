//! Expense list editor.

use serde::Serialize;

use super::PanelError;
use super::editor::{Draft, ListEditor};
use crate::model::Expense;

pub type ExpensesPanel = ListEditor<ExpenseDraft>;

/// Raw text of the add-expense form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
}

impl Draft for ExpenseDraft {
    type Item = Expense;

    const LIST: &'static str = "expenses";

    fn item_id(item: &Expense) -> u64 {
        item.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), PanelError> {
        match field {
            "description" => self.description = value,
            "amount" => self.amount = value,
            other => return Err(PanelError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn build(&self, next_id: impl FnOnce() -> u64) -> Result<Option<Expense>, PanelError> {
        if self.description.is_empty() || self.amount.is_empty() {
            return Ok(None);
        }
        let Ok(parsed) = self.amount.trim().parse::<f64>() else {
            return Err(PanelError::InvalidAmount(self.amount.clone()));
        };
        if !parsed.is_finite() {
            return Err(PanelError::InvalidAmount(self.amount.clone()));
        }
        Ok(Some(Expense { id: next_id(), description: self.description.clone(), amount: parsed }))
    }
}

#[cfg(test)]
#[path = "expenses_test.rs"]
mod tests;
