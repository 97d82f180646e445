//! finpal CLI - Local personal finance tracker
//!
//! Usage:
//!   finpal init                              Initialize database and preferences
//!   finpal add expense Coffee 4.50 -c Cafe   Record a transaction
//!   finpal insights                          Month-over-month budget insights
//!   finpal payments upcoming                 Unpaid payments due soon

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    run(cli)
}

/// Execute one parsed command
///
/// `init` runs before anything is loaded; every other command opens the
/// view-model first.
fn run(cli: Cli) -> Result<()> {
    let open_vm = || {
        commands::open_view_model(
            &cli.db,
            cli.settings.as_deref(),
            cli.no_encrypt,
            cli.as_of,
            cli.locale,
        )
    };

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.settings.as_deref(), cli.no_encrypt),
        Commands::Add {
            kind,
            title,
            amount,
            category,
            date,
        } => {
            let mut vm = open_vm()?;
            let date = date.unwrap_or_else(|| vm.today());
            commands::cmd_add(&mut vm, kind, &title, &amount, &category, date)
        }
        Commands::Edit {
            id,
            title,
            amount,
            kind,
            category,
            date,
        } => commands::cmd_edit(
            &mut open_vm()?,
            id,
            commands::TransactionEdit {
                title,
                amount,
                kind,
                category,
                date,
            },
        ),
        Commands::Delete { id } => commands::cmd_delete(&mut open_vm()?, id),
        Commands::List {
            search,
            with_amount,
            limit,
        } => commands::cmd_list(&mut open_vm()?, search.as_deref(), with_amount, limit),
        Commands::Balance => commands::cmd_balance(&open_vm()?),
        Commands::Breakdown { month } => commands::cmd_breakdown(&open_vm()?, month),
        Commands::Summary { month } => commands::cmd_summary(&open_vm()?, month),
        Commands::Insights { json } => commands::cmd_insights(&open_vm()?, json),
        Commands::Predict { category } => commands::cmd_predict(&open_vm()?, &category),
        Commands::Payments { action } => {
            let mut vm = open_vm()?;
            match action {
                None | Some(PaymentsAction::List) => commands::cmd_payments_list(&vm),
                Some(PaymentsAction::Add {
                    title,
                    amount,
                    due,
                    note,
                    recurring,
                }) => commands::cmd_payments_add(&mut vm, &title, &amount, due, &note, recurring),
                Some(PaymentsAction::Edit {
                    id,
                    title,
                    amount,
                    due,
                    note,
                    recurring,
                    once,
                }) => commands::cmd_payments_edit(
                    &mut vm,
                    id,
                    commands::PaymentEdit {
                        title,
                        amount,
                        due,
                        note,
                        recurring,
                        once,
                    },
                ),
                Some(PaymentsAction::Pay { id }) => commands::cmd_payments_pay(&mut vm, id),
                Some(PaymentsAction::Delete { id }) => commands::cmd_payments_delete(&mut vm, id),
                Some(PaymentsAction::Month { month }) => commands::cmd_payments_month(&vm, month),
                Some(PaymentsAction::Upcoming { days }) => {
                    commands::cmd_payments_upcoming(&vm, days)
                }
            }
        }
        Commands::Profile { action } => {
            let mut vm = open_vm()?;
            match action {
                None | Some(ProfileAction::Show) => commands::cmd_profile_show(&vm),
                Some(ProfileAction::Set { name, email, image }) => commands::cmd_profile_set(
                    &mut vm,
                    name.as_deref(),
                    email.as_deref(),
                    image.as_deref(),
                ),
            }
        }
        Commands::Theme { mode } => {
            let mut vm = open_vm()?;
            match mode {
                None | Some(ThemeMode::Show) => commands::cmd_theme_show(&vm),
                Some(ThemeMode::Dark) => commands::cmd_theme_set(&mut vm, true),
                Some(ThemeMode::Light) => commands::cmd_theme_set(&mut vm, false),
            }
        }
        Commands::Reset { yes } => commands::cmd_reset(&mut open_vm()?, yes),
    }
}
