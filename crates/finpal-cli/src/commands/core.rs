//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `open_settings` - Load preferences from the settings file
//! - `open_view_model` - Build the view-model every other command runs against
//! - `cmd_init` - Initialize the database and preferences
//! - `cmd_reset` - Clear all data

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finpal_core::insights::Locale;
use finpal_core::{Database, FilePreferenceStore, PreferenceStore, Settings, ViewModel};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load preferences from `path`, or the default location when not given
pub fn open_settings(path: Option<&Path>) -> Result<Settings<FilePreferenceStore>> {
    let store = match path {
        Some(p) => FilePreferenceStore::open(p),
        None => FilePreferenceStore::open_default(),
    }
    .context("Failed to open preferences")?;

    Settings::load(store).context("Failed to load preferences")
}

pub fn open_view_model(
    db_path: &Path,
    settings_path: Option<&Path>,
    no_encrypt: bool,
    as_of: Option<NaiveDate>,
    locale: Locale,
) -> Result<ViewModel<FilePreferenceStore>> {
    let db = open_db(db_path, no_encrypt)?;
    let settings = open_settings(settings_path)?;

    let mut vm = ViewModel::new(db, settings)
        .context("Failed to load data")?
        .with_locale(locale);
    if let Some(date) = as_of {
        vm = vm.with_reference_date(date);
    }

    Ok(vm)
}

pub fn cmd_init(db_path: &Path, settings_path: Option<&Path>, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let settings = open_settings(settings_path)?;

    println!("   Preferences: {}", settings.store().path().display());
    println!(
        "   Theme: {}",
        if settings.dark_mode() { "dark" } else { "light" }
    );

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if db.is_encrypted().unwrap_or(false) {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record income: finpal add income Salary 3000 -c Salary");
    println!("  2. Record an expense: finpal add expense Groceries 42.50 -c Market");
    println!("  3. See insights: finpal insights");

    Ok(())
}

pub fn cmd_reset<S: PreferenceStore>(vm: &mut ViewModel<S>, yes: bool) -> Result<()> {
    if !yes {
        print!("⚠️  This will delete all transactions and planned payments.\n");
        print!("   Preferences and profile will be preserved.\n\n");
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    vm.database()
        .clear_all()
        .context("Failed to clear database")?;
    vm.reload();

    println!("✅ Database reset complete.");
    println!("   Cleared: transactions, planned payments");
    println!("   Preserved: preferences, profile");

    Ok(())
}
