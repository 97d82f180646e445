//! Spending Predictor
//!
//! Projects next spending for a category from the last month of activity,
//! scaled by a fixed seasonal factor for the current calendar month.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Fixed confidence reported with every prediction
const CONFIDENCE: f64 = 0.7;

/// Suggested limit as a share of last month's spending
const SAVING_TARGET: f64 = 0.9;

/// Projected spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub last_month_spending: f64,
    pub predicted_amount: f64,
    pub confidence: f64,
    pub suggested_limit: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SpendingPredictor;

impl SpendingPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(
        &self,
        category: &str,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Prediction {
        let last_month = last_month_spending(category, transactions, today);

        Prediction {
            category: category.to_string(),
            last_month_spending: last_month,
            predicted_amount: last_month * seasonal_factor(today.month()),
            confidence: CONFIDENCE,
            suggested_limit: last_month * SAVING_TARGET,
        }
    }
}

/// Spending multiplier for a calendar month (1.0 for anything out of range)
pub fn seasonal_factor(month: u32) -> f64 {
    match month {
        1 => 0.8,
        2 => 0.9,
        3 | 4 => 1.0,
        5 => 1.1,
        6..=8 => 1.2,
        9 => 1.1,
        10 => 1.0,
        11 => 1.1,
        12 => 1.3,
        _ => 1.0,
    }
}

/// Expenses in `category` dated from one month before `today` up to yesterday
fn last_month_spending(category: &str, transactions: &[Transaction], today: NaiveDate) -> f64 {
    let Some(start) = today.checked_sub_months(Months::new(1)) else {
        return 0.0;
    };
    let end = today - Duration::days(1);

    transactions
        .iter()
        .filter(|t| {
            t.is_expense() && t.category == category && t.date >= start && t.date <= end
        })
        .map(|t| t.amount)
        .sum()
}
