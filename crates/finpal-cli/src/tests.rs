//! CLI command tests
//!
//! Commands run against an in-memory database and in-memory preferences,
//! pinned to a fixed "today" so month-relative output is deterministic.

use chrono::NaiveDate;
use clap::Parser;
use finpal_core::models::{RecurringInterval, TransactionType};
use finpal_core::{Database, Error, MemoryPreferenceStore, Settings, ViewModel};

use crate::cli::Cli;
use crate::commands::{self, month_name, progress_bar, truncate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_vm() -> ViewModel<MemoryPreferenceStore> {
    let db = Database::in_memory().unwrap();
    let settings = Settings::load(MemoryPreferenceStore::new()).unwrap();
    ViewModel::new(db, settings)
        .unwrap()
        .with_reference_date(date(2026, 3, 15))
}

fn add(
    vm: &mut ViewModel<MemoryPreferenceStore>,
    kind: TransactionType,
    title: &str,
    amount: &str,
    category: &str,
    on: NaiveDate,
) {
    commands::cmd_add(vm, kind, title, amount, category, on).unwrap();
}

/// Income plus two months of expenses around the pinned date
fn seed(vm: &mut ViewModel<MemoryPreferenceStore>) {
    add(vm, TransactionType::Income, "Salary", "3000", "Salary", date(2026, 3, 1));
    add(vm, TransactionType::Expense, "Groceries", "300", "Market", date(2026, 2, 10));
    add(vm, TransactionType::Expense, "Groceries", "420", "Market", date(2026, 3, 10));
    add(vm, TransactionType::Expense, "Bus pass", "60", "Transport", date(2026, 3, 5));
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let mut vm = setup_vm();
    let result = commands::cmd_add(
        &mut vm,
        TransactionType::Expense,
        "Coffee",
        "4,50",
        "Cafe",
        date(2026, 3, 14),
    );
    assert!(result.is_ok());

    assert_eq!(vm.transactions().len(), 1);
    let tx = &vm.transactions()[0];
    assert_eq!(tx.title, "Coffee");
    assert_eq!(tx.amount, 4.5);
    assert_eq!(tx.category, "Cafe");
}

#[test]
fn test_cmd_add_blank_category_defaults_to_other() {
    let mut vm = setup_vm();
    add(&mut vm, TransactionType::Expense, "Misc", "10", "  ", date(2026, 3, 1));
    assert_eq!(vm.transactions()[0].category, "Other");
}

#[test]
fn test_cmd_add_invalid_amount() {
    let mut vm = setup_vm();
    for amount in ["", "abc", "0", "-5"] {
        let result = commands::cmd_add(
            &mut vm,
            TransactionType::Expense,
            "Coffee",
            amount,
            "Cafe",
            date(2026, 3, 14),
        );
        assert!(result.is_err(), "amount {:?} should be rejected", amount);
    }
    assert!(vm.transactions().is_empty());
}

#[test]
fn test_cmd_add_blank_title() {
    let mut vm = setup_vm();
    let result = commands::cmd_add(
        &mut vm,
        TransactionType::Income,
        "   ",
        "100",
        "Salary",
        date(2026, 3, 1),
    );
    assert!(result.is_err());
    assert!(vm.transactions().is_empty());
}

#[test]
fn test_cmd_edit_merges_fields() {
    let mut vm = setup_vm();
    add(&mut vm, TransactionType::Expense, "Groceries", "42.5", "Market", date(2026, 3, 2));
    let id = vm.transactions()[0].id;

    let result = commands::cmd_edit(
        &mut vm,
        id,
        commands::TransactionEdit {
            amount: Some("50".to_string()),
            category: Some("Food".to_string()),
            ..Default::default()
        },
    );
    assert!(result.is_ok());

    let tx = vm.transaction(id).unwrap();
    assert_eq!(tx.title, "Groceries");
    assert_eq!(tx.amount, 50.0);
    assert_eq!(tx.category, "Food");
    assert_eq!(tx.date, date(2026, 3, 2));
    assert_eq!(tx.transaction_type, TransactionType::Expense);
}

#[test]
fn test_cmd_edit_not_found() {
    let mut vm = setup_vm();
    let result = commands::cmd_edit(&mut vm, 99, commands::TransactionEdit::default());
    assert!(result.is_err());
}

#[test]
fn test_cmd_delete() {
    let mut vm = setup_vm();
    seed(&mut vm);
    let balance_before = vm.balance();
    let bus = vm
        .transactions()
        .iter()
        .find(|t| t.title == "Bus pass")
        .unwrap()
        .id;

    assert!(commands::cmd_delete(&mut vm, bus).is_ok());
    assert!(vm.transaction(bus).is_none());
    assert_eq!(vm.balance(), balance_before + 60.0);
}

#[test]
fn test_cmd_delete_not_found() {
    let mut vm = setup_vm();
    let err = commands::cmd_delete(&mut vm, 42).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NotFound(what)) if what == "transaction 42"
    ));
}

#[test]
fn test_cmd_list_empty() {
    let mut vm = setup_vm();
    assert!(commands::cmd_list(&mut vm, None, false, 20).is_ok());
}

#[test]
fn test_cmd_list_search_sets_filter() {
    let mut vm = setup_vm();
    seed(&mut vm);

    assert!(commands::cmd_list(&mut vm, Some("market"), false, 20).is_ok());
    assert_eq!(vm.search_text(), "market");
    assert_eq!(vm.filtered_transactions().len(), 2);

    // Amount only matches when the wider scope is requested
    assert!(commands::cmd_list(&mut vm, Some("60.00"), false, 20).is_ok());
    assert!(vm.filtered_transactions().is_empty());
    assert!(commands::cmd_list(&mut vm, Some("60.00"), true, 20).is_ok());
    assert_eq!(vm.filtered_transactions().len(), 1);

    assert!(commands::cmd_list(&mut vm, None, false, 1).is_ok());
    assert_eq!(vm.filtered_transactions().len(), 4);
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_balance_empty() {
    let vm = setup_vm();
    assert!(commands::cmd_balance(&vm).is_ok());
}

#[test]
fn test_cmd_balance_with_data() {
    let mut vm = setup_vm();
    seed(&mut vm);
    assert!(commands::cmd_balance(&vm).is_ok());
    assert_eq!(vm.balance(), 3000.0 - 300.0 - 420.0 - 60.0);
}

#[test]
fn test_cmd_breakdown() {
    let mut vm = setup_vm();
    seed(&mut vm);
    assert!(commands::cmd_breakdown(&vm, None).is_ok());
    assert!(commands::cmd_breakdown(&vm, Some(2)).is_ok());
    assert!(commands::cmd_breakdown(&vm, Some(7)).is_ok());
}

#[test]
fn test_cmd_summary() {
    let mut vm = setup_vm();
    seed(&mut vm);
    assert!(commands::cmd_summary(&vm, None).is_ok());
    assert!(commands::cmd_summary(&vm, Some(2)).is_ok());
}

#[test]
fn test_cmd_insights_empty() {
    let vm = setup_vm();
    assert!(commands::cmd_insights(&vm, false).is_ok());
    assert!(commands::cmd_insights(&vm, true).is_ok());
}

#[test]
fn test_cmd_insights_with_data() {
    let mut vm = setup_vm();
    seed(&mut vm);
    assert!(commands::cmd_insights(&vm, false).is_ok());
    assert!(commands::cmd_insights(&vm, true).is_ok());

    let analysis = vm.analysis();
    assert_eq!(analysis.biggest_category, "Market");
    assert_eq!(analysis.insights.len(), 2);
}

#[test]
fn test_cmd_predict() {
    let mut vm = setup_vm();
    seed(&mut vm);
    assert!(commands::cmd_predict(&vm, "Transport").is_ok());
    assert!(commands::cmd_predict(&vm, "Unknown").is_ok());
}

// ========== Payment Command Tests ==========

#[test]
fn test_cmd_payments_list_empty() {
    let vm = setup_vm();
    assert!(commands::cmd_payments_list(&vm).is_ok());
}

#[test]
fn test_cmd_payments_add() {
    let mut vm = setup_vm();
    let result = commands::cmd_payments_add(
        &mut vm,
        "Rent",
        "1200",
        date(2026, 3, 20),
        "",
        Some(RecurringInterval::Month),
    );
    assert!(result.is_ok());

    let payment = &vm.planned_payments()[0];
    assert_eq!(payment.title, "Rent");
    assert_eq!(payment.amount, 1200.0);
    assert!(payment.is_recurring);
    assert_eq!(payment.recurring_interval, Some(RecurringInterval::Month));
    assert_eq!(payment.note, None);
    assert!(!payment.is_paid);
}

#[test]
fn test_cmd_payments_add_invalid() {
    let mut vm = setup_vm();
    let result = commands::cmd_payments_add(&mut vm, "", "10", date(2026, 3, 20), "", None);
    assert!(result.is_err());
    let result = commands::cmd_payments_add(&mut vm, "Gym", "free", date(2026, 3, 20), "", None);
    assert!(result.is_err());
    assert!(vm.planned_payments().is_empty());
}

#[test]
fn test_cmd_payments_edit() {
    let mut vm = setup_vm();
    commands::cmd_payments_add(
        &mut vm,
        "Gym",
        "30",
        date(2026, 3, 1),
        "front desk",
        Some(RecurringInterval::Month),
    )
    .unwrap();
    let id = vm.planned_payments()[0].id;

    let result = commands::cmd_payments_edit(
        &mut vm,
        id,
        commands::PaymentEdit {
            amount: Some("35".to_string()),
            once: true,
            ..Default::default()
        },
    );
    assert!(result.is_ok());

    let payment = vm.planned_payment(id).unwrap();
    assert_eq!(payment.title, "Gym");
    assert_eq!(payment.amount, 35.0);
    assert_eq!(payment.note.as_deref(), Some("front desk"));
    assert!(!payment.is_recurring);
    assert_eq!(payment.recurring_interval, None);
}

#[test]
fn test_cmd_payments_edit_not_found() {
    let mut vm = setup_vm();
    let result = commands::cmd_payments_edit(&mut vm, 7, commands::PaymentEdit::default());
    assert!(result.is_err());
}

#[test]
fn test_cmd_payments_pay_toggles() {
    let mut vm = setup_vm();
    commands::cmd_payments_add(&mut vm, "Internet", "45", date(2026, 3, 18), "", None).unwrap();
    let id = vm.planned_payments()[0].id;

    assert!(commands::cmd_payments_pay(&mut vm, id).is_ok());
    assert!(vm.planned_payment(id).unwrap().is_paid);
    assert_eq!(vm.payment_month_summary(3).completed, 45.0);

    assert!(commands::cmd_payments_pay(&mut vm, id).is_ok());
    assert!(!vm.planned_payment(id).unwrap().is_paid);
    assert_eq!(vm.payment_month_summary(3).remaining, 45.0);
}

#[test]
fn test_cmd_payments_pay_not_found() {
    let mut vm = setup_vm();
    let err = commands::cmd_payments_pay(&mut vm, 3).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NotFound(what)) if what == "planned payment 3"
    ));
}

#[test]
fn test_cmd_payments_upcoming_wide_window() {
    let mut vm = setup_vm();
    commands::cmd_payments_add(&mut vm, "Rent", "1200", date(2090, 1, 1), "", None).unwrap();
    assert!(commands::cmd_payments_upcoming(&vm, 100_000_000).is_ok());
    assert!(commands::cmd_payments_upcoming(&vm, i64::MAX).is_ok());
    assert_eq!(vm.upcoming_payments(i64::MAX).len(), 1);
}

#[test]
fn test_upcoming_days_is_bounded() {
    let parse = |days: &str| Cli::try_parse_from(["finpal", "payments", "upcoming", "--days", days]);
    assert!(parse("3650").is_ok());
    assert!(parse("100000000").is_err());
    assert!(parse("-1").is_err());
}

#[test]
fn test_cmd_payments_delete() {
    let mut vm = setup_vm();
    commands::cmd_payments_add(&mut vm, "Internet", "45", date(2026, 3, 18), "", None).unwrap();
    let id = vm.planned_payments()[0].id;

    assert!(commands::cmd_payments_delete(&mut vm, id).is_ok());
    assert!(vm.planned_payments().is_empty());
    assert!(commands::cmd_payments_delete(&mut vm, id).is_err());
}

#[test]
fn test_cmd_payments_month_and_upcoming() {
    let mut vm = setup_vm();
    commands::cmd_payments_add(&mut vm, "Water", "20", date(2026, 3, 10), "", None).unwrap();
    commands::cmd_payments_add(&mut vm, "Rent", "1200", date(2026, 3, 25), "", None).unwrap();
    commands::cmd_payments_add(&mut vm, "Insurance", "90", date(2026, 6, 1), "", None).unwrap();

    assert!(commands::cmd_payments_month(&vm, None).is_ok());
    assert!(commands::cmd_payments_month(&vm, Some(8)).is_ok());
    assert!(commands::cmd_payments_upcoming(&vm, 30).is_ok());

    assert_eq!(vm.payments_in_month(3).len(), 2);
    assert_eq!(vm.overdue_payments().len(), 1);
    assert_eq!(vm.upcoming_payments(30).len(), 1);
}

// ========== Profile and Theme Command Tests ==========

#[test]
fn test_cmd_profile_show_defaults() {
    let vm = setup_vm();
    assert!(commands::cmd_profile_show(&vm).is_ok());
    assert_eq!(vm.profile().name, "User");
}

#[test]
fn test_cmd_profile_set_requires_a_field() {
    let mut vm = setup_vm();
    assert!(commands::cmd_profile_set(&mut vm, None, None, None).is_err());
}

#[test]
fn test_cmd_profile_set_keeps_unspecified_fields() {
    let mut vm = setup_vm();
    commands::cmd_profile_set(&mut vm, Some("Ayse"), Some("ayse@example.com"), None).unwrap();
    commands::cmd_profile_set(&mut vm, Some("Ayse K"), None, None).unwrap();

    let profile = vm.profile();
    assert_eq!(profile.name, "Ayse K");
    assert_eq!(profile.email.as_deref(), Some("ayse@example.com"));

    // An empty email clears it
    commands::cmd_profile_set(&mut vm, None, Some(""), None).unwrap();
    assert_eq!(vm.profile().email, None);
    assert_eq!(vm.profile().name, "Ayse K");
}

#[test]
fn test_cmd_profile_set_image() {
    let dir = tempfile::TempDir::new().unwrap();
    let image = dir.path().join("avatar.png");
    std::fs::write(&image, [0x89u8, b'P', b'N', b'G']).unwrap();

    let mut vm = setup_vm();
    assert!(commands::cmd_profile_set(&mut vm, None, None, Some(&image)).is_ok());
    assert_eq!(
        vm.profile().profile_image,
        Some(vec![0x89u8, b'P', b'N', b'G'])
    );

    let missing = dir.path().join("missing.png");
    assert!(commands::cmd_profile_set(&mut vm, None, None, Some(&missing)).is_err());
}

#[test]
fn test_cmd_profile_set_blank_name() {
    let mut vm = setup_vm();
    assert!(commands::cmd_profile_set(&mut vm, Some("  "), None, None).is_err());
    assert_eq!(vm.profile().name, "User");
}

#[test]
fn test_cmd_theme() {
    let mut vm = setup_vm();
    assert!(vm.dark_mode());
    assert!(commands::cmd_theme_show(&vm).is_ok());

    assert!(commands::cmd_theme_set(&mut vm, false).is_ok());
    assert!(!vm.dark_mode());
    assert!(!vm.profile().prefers_dark_mode);
}

// ========== Reset Command Tests ==========

#[test]
fn test_cmd_reset_clears_data_keeps_preferences() {
    let mut vm = setup_vm();
    seed(&mut vm);
    commands::cmd_payments_add(&mut vm, "Rent", "1200", date(2026, 3, 25), "", None).unwrap();
    commands::cmd_theme_set(&mut vm, false).unwrap();

    assert!(commands::cmd_reset(&mut vm, true).is_ok());
    assert!(vm.transactions().is_empty());
    assert!(vm.planned_payments().is_empty());
    assert_eq!(vm.balance(), 0.0);
    assert!(!vm.dark_mode());
}

// ========== Dispatch Tests ==========

#[test]
fn test_run_init_then_commands() {
    let dir = tempfile::TempDir::new().unwrap();
    let db = dir.path().join("finpal.db");
    let settings = dir.path().join("settings.toml");
    let args = |rest: &[&str]| {
        let mut argv = vec![
            "finpal".to_string(),
            "--no-encrypt".to_string(),
            "--as-of".to_string(),
            "2026-03-15".to_string(),
            "--db".to_string(),
            db.display().to_string(),
            "--settings".to_string(),
            settings.display().to_string(),
        ];
        argv.extend(rest.iter().map(|s| s.to_string()));
        Cli::try_parse_from(argv).unwrap()
    };

    assert!(crate::run(args(&["init"])).is_ok());
    assert!(settings.exists());

    assert!(crate::run(args(&["add", "expense", "Coffee", "4.50", "-c", "Cafe"])).is_ok());
    assert!(crate::run(args(&["balance"])).is_ok());
    assert!(crate::run(args(&["payments", "upcoming", "--days", "3650"])).is_ok());
    assert!(crate::run(args(&["delete", "999"])).is_err());

    let vm = commands::open_view_model(&db, Some(settings.as_path()), true, None, Default::default())
        .unwrap();
    assert_eq!(vm.transactions().len(), 1);
    assert_eq!(vm.transactions()[0].date, date(2026, 3, 15));
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello world", 8), "hello...");
    assert_eq!(truncate("çay ve simit", 6), "çay...");
}

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0.0, 4), "░░░░");
    assert_eq!(progress_bar(0.5, 4), "██░░");
    assert_eq!(progress_bar(2.0, 4), "████");
    assert_eq!(progress_bar(-1.0, 4), "░░░░");
}

#[test]
fn test_month_name() {
    assert_eq!(month_name(1), "January");
    assert_eq!(month_name(12), "December");
    assert_eq!(month_name(13), "?");
}
