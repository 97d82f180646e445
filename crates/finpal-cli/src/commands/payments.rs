//! Planned payment command implementations

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use finpal_core::models::{PlannedPayment, RecurringInterval};
use finpal_core::{Error, PlannedPaymentForm, PreferenceStore, ViewModel};

use super::{month_name, truncate};

/// Field overrides for `finpal payments edit`
#[derive(Debug, Default)]
pub struct PaymentEdit {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub due: Option<NaiveDate>,
    pub note: Option<String>,
    pub recurring: Option<RecurringInterval>,
    /// Make the payment non-recurring
    pub once: bool,
}

fn print_payment(payment: &PlannedPayment, today: NaiveDate) {
    let status = if payment.is_paid {
        "\x1b[32m✓ paid\x1b[0m".to_string()
    } else if payment.due_date < today {
        "\x1b[31m! overdue\x1b[0m".to_string()
    } else {
        "  due".to_string()
    };

    let repeat = payment
        .recurring_interval
        .map(|i| format!("every {}", i))
        .unwrap_or_else(|| "once".to_string());

    println!(
        "   [{:>4}] {} │ {:>10.2} │ {:25} │ {:11} │ {}",
        payment.id,
        payment.due_date,
        payment.amount,
        truncate(&payment.title, 25),
        repeat,
        status
    );
    if let Some(note) = &payment.note {
        println!("          📝 {}", truncate(note, 50));
    }
}

pub fn cmd_payments_list<S: PreferenceStore>(vm: &ViewModel<S>) -> Result<()> {
    let payments = vm.planned_payments();

    if payments.is_empty() {
        println!("No planned payments. Add one with:");
        println!("  finpal payments add Rent 1200 --due 2026-01-01 --recurring month");
        return Ok(());
    }

    println!();
    println!("🗓️  Planned Payments");
    println!("   ─────────────────────────────────────────────────────────────");

    let today = vm.today();
    for payment in payments {
        print_payment(payment, today);
    }

    Ok(())
}

pub fn cmd_payments_add<S: PreferenceStore>(
    vm: &mut ViewModel<S>,
    title: &str,
    amount: &str,
    due: NaiveDate,
    note: &str,
    recurring: Option<RecurringInterval>,
) -> Result<()> {
    let form = PlannedPaymentForm {
        title: title.to_string(),
        amount: amount.to_string(),
        due_date: due,
        note: note.to_string(),
        is_recurring: recurring.is_some(),
        recurring_interval: recurring,
    };
    let payment = form.validate().context("Invalid planned payment")?;
    let summary = format!("{} {:.2} due {}", payment.title, payment.amount, payment.due_date);

    if !vm.add_planned_payment(payment) {
        bail!("Failed to save planned payment");
    }

    println!("✅ Planned {}", summary);
    if let Some(interval) = recurring {
        println!("   Repeats every {}", interval);
    }

    Ok(())
}

pub fn cmd_payments_edit<S: PreferenceStore>(
    vm: &mut ViewModel<S>,
    id: i64,
    edit: PaymentEdit,
) -> Result<()> {
    let existing = vm
        .planned_payment(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("planned payment {}", id)))?;

    let (is_recurring, recurring_interval) = if edit.once {
        (false, None)
    } else if let Some(interval) = edit.recurring {
        (true, Some(interval))
    } else {
        (existing.is_recurring, existing.recurring_interval)
    };

    let form = PlannedPaymentForm {
        title: edit.title.unwrap_or(existing.title),
        amount: edit.amount.unwrap_or_else(|| existing.amount.to_string()),
        due_date: edit.due.unwrap_or(existing.due_date),
        note: edit.note.or(existing.note).unwrap_or_default(),
        is_recurring,
        recurring_interval,
    };
    let valid = form.validate().context("Invalid planned payment")?;

    let updated = PlannedPayment {
        id,
        title: valid.title,
        amount: valid.amount,
        due_date: valid.due_date,
        note: valid.note,
        is_recurring: valid.is_recurring,
        recurring_interval: valid.recurring_interval,
        is_paid: existing.is_paid,
    };

    if !vm.update_planned_payment(&updated) {
        bail!("Failed to update planned payment {}", id);
    }

    println!("✅ Updated planned payment {}: {}", id, updated.title);

    Ok(())
}

pub fn cmd_payments_pay<S: PreferenceStore>(vm: &mut ViewModel<S>, id: i64) -> Result<()> {
    vm.planned_payment(id)
        .ok_or_else(|| Error::NotFound(format!("planned payment {}", id)))?;

    if !vm.toggle_payment_paid(id) {
        bail!("Failed to update planned payment {}", id);
    }

    let payment = vm
        .planned_payment(id)
        .ok_or_else(|| Error::NotFound(format!("planned payment {}", id)))?;

    if payment.is_paid {
        println!("✅ Marked '{}' as paid", payment.title);
        if let Some(next) = payment.next_occurrence() {
            println!("   Next occurrence: {}", next);
        }
    } else {
        println!("↩️  Marked '{}' as unpaid", payment.title);
    }

    Ok(())
}

pub fn cmd_payments_delete<S: PreferenceStore>(vm: &mut ViewModel<S>, id: i64) -> Result<()> {
    let payment = vm
        .planned_payment(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("planned payment {}", id)))?;

    if !vm.delete_planned_payment(id) {
        bail!("Failed to delete planned payment {}", id);
    }

    println!("🗑️  Deleted planned payment {}: {}", id, payment.title);

    Ok(())
}

pub fn cmd_payments_month<S: PreferenceStore>(vm: &ViewModel<S>, month: Option<u32>) -> Result<()> {
    let month = month.unwrap_or_else(|| vm.current_month());
    let payments = vm.payments_in_month(month);
    let summary = vm.payment_month_summary(month);
    let locale = vm.assistant().locale();

    println!();
    println!("🗓️  {} Payments", month_name(month));
    println!("   ─────────────────────────────────────────────────────────────");

    if payments.is_empty() {
        println!("   Nothing planned this month.");
        return Ok(());
    }

    let today = vm.today();
    for payment in &payments {
        print_payment(payment, today);
    }

    println!();
    println!("   Total:     {}", locale.format_amount(summary.total));
    println!("   Paid:      {}", locale.format_amount(summary.completed));
    println!("   Remaining: {}", locale.format_amount(summary.remaining));

    Ok(())
}

pub fn cmd_payments_upcoming<S: PreferenceStore>(vm: &ViewModel<S>, days: i64) -> Result<()> {
    let upcoming = vm.upcoming_payments(days);
    let overdue = vm.overdue_payments();
    let today = vm.today();

    if upcoming.is_empty() && overdue.is_empty() {
        println!("✨ Nothing due in the next {} days.", days);
        return Ok(());
    }

    if !overdue.is_empty() {
        println!();
        println!("⚠️  Overdue ({})", overdue.len());
        println!("   ─────────────────────────────────────────────────────────────");
        for payment in &overdue {
            print_payment(payment, today);
        }
    }

    if !upcoming.is_empty() {
        println!();
        println!("⏰ Due in the next {} days ({})", days, upcoming.len());
        println!("   ─────────────────────────────────────────────────────────────");
        for payment in &upcoming {
            print_payment(payment, today);
        }

        let total: f64 = upcoming.iter().map(|p| p.amount).sum();
        println!();
        println!(
            "   Total due: {}",
            vm.assistant().locale().format_amount(total)
        );
    }

    Ok(())
}
