//! Input validation for user-entered records
//!
//! Forms hold raw user input (amounts as typed text) and turn it into the
//! validated `New*` models the database accepts.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{
    NewPlannedPayment, NewTransaction, RecurringInterval, TransactionType, DEFAULT_CATEGORY,
};

/// Raw input for a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub title: String,
    pub amount: String,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionForm {
    pub fn validate(&self) -> Result<NewTransaction> {
        let title = required_title(&self.title)?;
        let amount = parse_amount(&self.amount)?;

        let category = match self.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            c => c.to_string(),
        };

        Ok(NewTransaction {
            amount,
            title,
            transaction_type: self.transaction_type,
            date: self.date,
            category,
        })
    }

    /// Whether the save action should be enabled
    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Raw input for a planned payment
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPaymentForm {
    pub title: String,
    pub amount: String,
    pub due_date: NaiveDate,
    pub note: String,
    pub is_recurring: bool,
    pub recurring_interval: Option<RecurringInterval>,
}

impl PlannedPaymentForm {
    pub fn validate(&self) -> Result<NewPlannedPayment> {
        let title = required_title(&self.title)?;
        let amount = parse_amount(&self.amount)?;

        let note = match self.note.trim() {
            "" => None,
            n => Some(n.to_string()),
        };

        let recurring_interval = if self.is_recurring {
            Some(self.recurring_interval.unwrap_or(RecurringInterval::Month))
        } else {
            None
        };

        Ok(NewPlannedPayment {
            title,
            amount,
            due_date: self.due_date,
            note,
            is_recurring: self.is_recurring,
            recurring_interval,
        })
    }

    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }
}

fn required_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidData("Title cannot be empty".to_string()));
    }
    Ok(title.to_string())
}

/// Parse a positive amount; a decimal comma is accepted ("12,50")
pub fn parse_amount(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    let amount: f64 = normalized
        .parse()
        .map_err(|_| Error::InvalidData(format!("Invalid amount: '{}'", input.trim())))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Amount must be a positive number, got '{}'",
            input.trim()
        )));
    }

    Ok(amount)
}
