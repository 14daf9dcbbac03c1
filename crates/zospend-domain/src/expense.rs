//! The expense record and its pre-persistence draft.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::*};

/// Opaque identifier assigned by the record store on insert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted expense entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount_minor: i64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_synthetic: bool,
}

impl Expense {
    /// Materialises a draft under the identifier chosen by the store.
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        let ExpenseDraft {
            title,
            amount_minor,
            category,
            note,
            receipt_ref,
            created_at,
            is_synthetic,
        } = draft;
        Self {
            id,
            title,
            amount_minor,
            category,
            note,
            receipt_ref,
            created_at,
            is_synthetic,
        }
    }

    /// Returns the editable fields as a draft, e.g. to pre-fill an edit form.
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            title: self.title.clone(),
            amount_minor: self.amount_minor,
            category: self.category,
            note: self.note.clone(),
            receipt_ref: self.receipt_ref.clone(),
            created_at: self.created_at,
            is_synthetic: self.is_synthetic,
        }
    }

    /// Replaces every field except the identifier.
    pub fn apply(&mut self, draft: ExpenseDraft) {
        let id = self.id;
        *self = Expense::from_draft(id, draft);
    }
}

impl NamedEntity for Expense {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Amounted for Expense {
    fn amount_minor(&self) -> i64 {
        self.amount_minor
    }
}

impl Timestamped for Expense {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A candidate expense that has not been assigned an identifier yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount_minor: i64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_synthetic: bool,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        amount_minor: i64,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            amount_minor,
            category,
            note: None,
            receipt_ref: None,
            created_at,
            is_synthetic: false,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_receipt(mut self, receipt_ref: impl Into<String>) -> Self {
        self.receipt_ref = Some(receipt_ref.into());
        self
    }

    /// Flags the draft as generated sample data.
    pub fn synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }
}

impl NamedEntity for ExpenseDraft {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Amounted for ExpenseDraft {
    fn amount_minor(&self) -> i64 {
        self.amount_minor
    }
}

impl Timestamped for ExpenseDraft {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_draft() -> ExpenseDraft {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
        ExpenseDraft::new("Team Lunch", 125_050, Category::Food, created_at)
            .with_note("Paid via UPI")
    }

    #[test]
    fn from_draft_keeps_every_field() {
        let id = ExpenseId::new();
        let expense = Expense::from_draft(id, sample_draft());
        assert_eq!(expense.id, id);
        assert_eq!(expense.title, "Team Lunch");
        assert_eq!(expense.note.as_deref(), Some("Paid via UPI"));
        assert!(!expense.is_synthetic);
        assert_eq!(expense.to_draft(), sample_draft());
    }

    #[test]
    fn apply_preserves_identifier() {
        let id = ExpenseId::new();
        let mut expense = Expense::from_draft(id, sample_draft());
        let mut edited = sample_draft();
        edited.title = "Client Dinner".into();
        expense.apply(edited);
        assert_eq!(expense.id, id);
        assert_eq!(expense.title, "Client Dinner");
    }

    #[test]
    fn legacy_json_without_synthetic_flag_loads() {
        let expense = Expense::from_draft(ExpenseId::new(), sample_draft());
        let mut value = serde_json::to_value(&expense).unwrap();
        value.as_object_mut().unwrap().remove("is_synthetic");
        let restored: Expense = serde_json::from_value(value).unwrap();
        assert!(!restored.is_synthetic);
        assert_eq!(restored.id, expense.id);
    }
}
