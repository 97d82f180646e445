//! Budget insights
//!
//! Turns aggregated spending into trend classifications, suggested limits
//! and saving tips.
//!
//! - **Budget Assistant** - month-over-month analysis per category
//! - **Spending Predictor** - seasonal projection of next month's spending
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finpal_core::insights::BudgetAssistant;
//!
//! let assistant = BudgetAssistant::new();
//! let analysis = assistant.analyze(&transactions, &payments, 3);
//! println!("{}", analysis.main_message(assistant.locale()));
//! ```

pub mod assistant;
pub mod predictor;
pub mod types;

pub use assistant::BudgetAssistant;
pub use predictor::{seasonal_factor, Prediction, SpendingPredictor};
pub use types::{BudgetInsight, CategoryBudget, Locale, MonthlyAnalysis, Trend};
