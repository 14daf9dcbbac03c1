//! Form-boundary validation for expense drafts.

use std::fmt;

use chrono::{DateTime, Utc};
use zospend_domain::{Category, ExpenseDraft};

/// Longest note accepted, in characters.
pub const NOTE_MAX_CHARS: usize = 100;
/// Minor units per major currency unit (paise per rupee, cents per dollar).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;
/// Largest single amount accepted, in minor units (one hundred billion major units).
pub const MAX_AMOUNT_MINOR: i64 = 10_000_000_000_000;
const MAX_FRACTION_DIGITS: usize = 2;

/// A single reason a draft was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTitle,
    AmountNotNumeric(String),
    AmountNotPositive,
    AmountTooLarge { max: i64 },
    NoteTooLong { length: usize, max: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyTitle => f.write_str("title must not be empty"),
            ValidationIssue::AmountNotNumeric(raw) => write!(f, "amount `{raw}` is not a number"),
            ValidationIssue::AmountNotPositive => f.write_str("amount must be greater than zero"),
            ValidationIssue::AmountTooLarge { max } => {
                write!(f, "amount exceeds the limit of {max} minor units")
            }
            ValidationIssue::NoteTooLong { length, max } => {
                write!(f, "note is {length} characters long (max {max})")
            }
        }
    }
}

/// Every issue found in one draft; never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.0.contains(issue)
    }

    pub fn has_title_error(&self) -> bool {
        self.contains(&ValidationIssue::EmptyTitle)
    }

    pub fn has_amount_error(&self) -> bool {
        self.0.iter().any(|issue| {
            matches!(
                issue,
                ValidationIssue::AmountNotNumeric(_)
                    | ValidationIssue::AmountNotPositive
                    | ValidationIssue::AmountTooLarge { .. }
            )
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw user input as captured by an entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub title: String,
    /// Amount in major units, e.g. `"120"` or `"120.50"`.
    pub amount: String,
    pub category: Category,
    pub note: String,
    pub receipt_ref: Option<String>,
}

impl ExpenseForm {
    /// Validates the form and converts it into a draft stamped at `created_at`.
    pub fn into_draft(self, created_at: DateTime<Utc>) -> Result<ExpenseDraft, ValidationErrors> {
        let mut issues = Vec::new();
        let title = self.title.trim().to_string();
        if title.is_empty() {
            issues.push(ValidationIssue::EmptyTitle);
        }
        let amount_minor = match parse_amount_minor(&self.amount) {
            Ok(amount) => amount,
            Err(issue) => {
                issues.push(issue);
                0
            }
        };
        let note = normalize_note(Some(self.note), &mut issues);
        if !issues.is_empty() {
            return Err(ValidationErrors(issues));
        }
        Ok(ExpenseDraft {
            title,
            amount_minor,
            category: self.category,
            note,
            receipt_ref: self.receipt_ref.filter(|uri| !uri.trim().is_empty()),
            created_at,
            is_synthetic: false,
        })
    }
}

/// Parses a major-unit amount with at most two decimals into minor units.
pub fn parse_amount_minor(raw: &str) -> Result<i64, ValidationIssue> {
    let trimmed = raw.trim();
    let not_numeric = || ValidationIssue::AmountNotNumeric(raw.to_string());
    if let Some(rest) = trimmed.strip_prefix('-') {
        return match parse_unsigned_minor(rest) {
            Some(_) => Err(ValidationIssue::AmountNotPositive),
            None => Err(not_numeric()),
        };
    }
    match parse_unsigned_minor(trimmed) {
        Some(0) => Err(ValidationIssue::AmountNotPositive),
        Some(amount) if amount > MAX_AMOUNT_MINOR => Err(ValidationIssue::AmountTooLarge {
            max: MAX_AMOUNT_MINOR,
        }),
        Some(amount) => Ok(amount),
        None => Err(not_numeric()),
    }
}

fn parse_unsigned_minor(text: &str) -> Option<i64> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    if fraction.len() > MAX_FRACTION_DIGITS {
        return None;
    }
    // Only digits remain, so a failed parse means the value overflowed.
    let whole: i64 = whole.parse().unwrap_or(i64::MAX);
    let mut fraction_minor: i64 = if fraction.is_empty() {
        0
    } else {
        fraction.parse().ok()?
    };
    if fraction.len() == 1 {
        fraction_minor *= 10;
    }
    Some(
        whole
            .saturating_mul(MINOR_UNITS_PER_MAJOR)
            .saturating_add(fraction_minor),
    )
}

/// Re-checks a draft arriving at the write path and returns it normalised
/// (trimmed title, blank notes dropped).
pub fn normalize_draft(draft: ExpenseDraft) -> Result<ExpenseDraft, ValidationErrors> {
    let mut issues = Vec::new();
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        issues.push(ValidationIssue::EmptyTitle);
    }
    if draft.amount_minor <= 0 {
        issues.push(ValidationIssue::AmountNotPositive);
    } else if draft.amount_minor > MAX_AMOUNT_MINOR {
        issues.push(ValidationIssue::AmountTooLarge {
            max: MAX_AMOUNT_MINOR,
        });
    }
    let note = normalize_note(draft.note, &mut issues);
    if !issues.is_empty() {
        return Err(ValidationErrors(issues));
    }
    Ok(ExpenseDraft {
        title,
        note,
        ..draft
    })
}

fn normalize_note(note: Option<String>, issues: &mut Vec<ValidationIssue>) -> Option<String> {
    let note = note?;
    let trimmed = note.trim();
    if trimmed.is_empty() {
        return None;
    }
    let length = trimmed.chars().count();
    if length > NOTE_MAX_CHARS {
        issues.push(ValidationIssue::NoteTooLong {
            length,
            max: NOTE_MAX_CHARS,
        });
    }
    Some(trimmed.to_string())
}
