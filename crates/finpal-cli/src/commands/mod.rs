//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init/reset and shared utilities (open_db, open_view_model)
//! - `payments` - Planned payment commands (list, add, edit, pay, month, upcoming)
//! - `profile` - Profile and theme preference commands
//! - `reports` - Balance, breakdown, summary, insights and prediction
//! - `transactions` - Transaction commands (add, edit, delete, list)

pub mod core;
pub mod payments;
pub mod profile;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use payments::*;
pub use profile::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar for a 0.0-1.0 ratio
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Full English month name for 1-12
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}
