//! Domain models for finpal

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Category assigned when the user leaves it blank
pub const DEFAULT_CATEGORY: &str = "Other";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Always positive; direction comes from `transaction_type`
    pub amount: f64,
    pub title: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub category: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// A validated transaction ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub title: String,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub category: String,
}

impl NewTransaction {
    /// Attach a stored id, producing the full record
    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            title: self.title,
            transaction_type: self.transaction_type,
            date: self.date,
            category: self.category,
        }
    }
}

/// How often a recurring planned payment repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    Week,
    Month,
    Year,
}

impl RecurringInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// The due date one interval after `date`
    ///
    /// Month and year steps clamp to the end of shorter months
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn next_due(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Week => date + Duration::days(7),
            Self::Month => date.checked_add_months(Months::new(1)).unwrap_or(date),
            Self::Year => date.checked_add_months(Months::new(12)).unwrap_or(date),
        }
    }
}

impl std::str::FromStr for RecurringInterval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            _ => Err(format!("Unknown recurring interval: {}", s)),
        }
    }
}

impl std::fmt::Display for RecurringInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled, optionally recurring obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPayment {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub note: Option<String>,
    pub is_recurring: bool,
    /// Set iff `is_recurring`
    pub recurring_interval: Option<RecurringInterval>,
    pub is_paid: bool,
}

impl PlannedPayment {
    /// Due date of the following occurrence, for recurring payments
    pub fn next_occurrence(&self) -> Option<NaiveDate> {
        self.recurring_interval
            .filter(|_| self.is_recurring)
            .map(|interval| interval.next_due(self.due_date))
    }
}

/// A validated planned payment ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlannedPayment {
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub note: Option<String>,
    pub is_recurring: bool,
    pub recurring_interval: Option<RecurringInterval>,
}

/// Expense total for one category and its share of all expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: f64,
    /// 0-100
    pub percentage: f64,
}

/// Income and expense totals for a single calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Planned payment totals for a single calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMonthSummary {
    pub month: u32,
    pub total: f64,
    pub completed: f64,
    pub remaining: f64,
}

/// The user's profile as shown in the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<Vec<u8>>,
    pub prefers_dark_mode: bool,
}
