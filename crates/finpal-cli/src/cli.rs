//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finpal_core::insights::Locale;
use finpal_core::models::{RecurringInterval, TransactionType};

/// finpal - Track income, expenses and planned payments
#[derive(Parser)]
#[command(name = "finpal")]
#[command(about = "Local personal finance tracker with budget insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "finpal.db", global = true)]
    pub db: PathBuf,

    /// Preferences file (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for real data)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FINPAL_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub as_of: Option<NaiveDate>,

    /// Language for insights and tips: en, tr
    #[arg(long, default_value = "en", global = true)]
    pub locale: Locale,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and preferences
    Init,

    /// Record an income or expense
    Add {
        /// income or expense
        kind: TransactionType,

        /// Short description
        title: String,

        /// Positive amount (decimal comma accepted)
        amount: String,

        /// Category (defaults to "Other")
        #[arg(short, long, default_value = "")]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Edit a transaction; omitted fields keep their value
    Edit {
        /// Transaction ID
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        /// income or expense
        #[arg(long = "type")]
        kind: Option<TransactionType>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },

    /// List transactions, newest first
    List {
        /// Case-insensitive match on title or category
        #[arg(short, long)]
        search: Option<String>,

        /// Also match the amount (e.g. "12.50")
        #[arg(long)]
        with_amount: bool,

        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show balance and expense statistics
    Balance,

    /// Expense breakdown by category
    Breakdown {
        /// Restrict to a calendar month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Income and expense totals for a month
    Summary {
        /// Calendar month (1-12, defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Month-over-month budget insights and suggested limits
    Insights {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict next spending for a category
    Predict {
        /// Category name (exact match)
        category: String,
    },

    /// Manage planned payments
    Payments {
        #[command(subcommand)]
        action: Option<PaymentsAction>,
    },

    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Show or switch the theme preference
    Theme {
        #[command(subcommand)]
        mode: Option<ThemeMode>,
    },

    /// Remove every transaction and planned payment
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PaymentsAction {
    /// List all planned payments, soonest first
    List,

    /// Add a planned payment
    Add {
        title: String,

        amount: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,

        #[arg(long, default_value = "")]
        note: String,

        /// Repeat every week, month or year
        #[arg(long)]
        recurring: Option<RecurringInterval>,
    },

    /// Edit a planned payment; omitted fields keep their value
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        #[arg(long)]
        due: Option<NaiveDate>,

        #[arg(long)]
        note: Option<String>,

        /// Repeat every week, month or year
        #[arg(long, conflicts_with = "once")]
        recurring: Option<RecurringInterval>,

        /// Make the payment one-off
        #[arg(long)]
        once: bool,
    },

    /// Toggle the paid flag
    Pay { id: i64 },

    /// Delete a planned payment
    Delete { id: i64 },

    /// Calendar view of one month with paid/remaining totals
    Month {
        /// Calendar month (1-12, defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Unpaid payments due soon, plus anything overdue
    Upcoming {
        /// Look-ahead window in days (0-3650)
        #[arg(long, default_value = "30", value_parser = clap::value_parser!(i64).range(0..=3650))]
        days: i64,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,

    /// Update name, email or picture
    Set {
        #[arg(long)]
        name: Option<String>,

        /// Email address (empty string clears it)
        #[arg(long)]
        email: Option<String>,

        /// Path to a profile picture
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ThemeMode {
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
    /// Show the current theme
    Show,
}
