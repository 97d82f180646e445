//! finpal Core Library
//!
//! Shared functionality for the finpal personal finance tracker:
//! - Database access and schema setup for transactions and planned payments
//! - Aggregation engine (totals, category breakdowns, month-over-month)
//! - Budget assistant that turns aggregates into insights and suggested limits
//! - Seasonal spending predictor
//! - Key/value user preferences
//! - Input validation forms
//! - View-model that keeps derived state consistent with the stores

pub mod aggregate;
pub mod db;
pub mod error;
pub mod forms;
pub mod insights;
pub mod models;
pub mod settings;
pub mod view_model;

pub use aggregate::SearchScope;
pub use db::Database;
pub use error::{Error, Result};
pub use forms::{PlannedPaymentForm, TransactionForm};
pub use insights::{BudgetAssistant, Locale, Prediction, SpendingPredictor};
pub use settings::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Settings};
pub use view_model::ViewModel;
