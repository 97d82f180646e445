//! Transaction command implementations

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use finpal_core::models::TransactionType;
use finpal_core::{Error, PreferenceStore, SearchScope, TransactionForm, ViewModel};

use super::truncate;

/// Field overrides for `finpal edit`
#[derive(Debug, Default)]
pub struct TransactionEdit {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

pub fn cmd_add<S: PreferenceStore>(
    vm: &mut ViewModel<S>,
    kind: TransactionType,
    title: &str,
    amount: &str,
    category: &str,
    date: NaiveDate,
) -> Result<()> {
    let form = TransactionForm {
        title: title.to_string(),
        amount: amount.to_string(),
        transaction_type: kind,
        category: category.to_string(),
        date,
    };
    let tx = form.validate().context("Invalid transaction")?;
    let summary = format!("{} {:.2} ({})", tx.title, tx.amount, tx.category);

    if !vm.add_transaction(tx) {
        bail!("Failed to save transaction");
    }

    let icon = match kind {
        TransactionType::Income => "💰",
        TransactionType::Expense => "💸",
    };
    println!("{} Added {}: {}", icon, kind, summary);
    println!("   Balance: {:.2}", vm.balance());

    Ok(())
}

pub fn cmd_edit<S: PreferenceStore>(
    vm: &mut ViewModel<S>,
    id: i64,
    edit: TransactionEdit,
) -> Result<()> {
    let existing = vm
        .transaction(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))?;

    let form = TransactionForm {
        title: edit.title.unwrap_or(existing.title),
        amount: edit.amount.unwrap_or_else(|| existing.amount.to_string()),
        transaction_type: edit.kind.unwrap_or(existing.transaction_type),
        category: edit.category.unwrap_or(existing.category),
        date: edit.date.unwrap_or(existing.date),
    };
    let updated = form.validate().context("Invalid transaction")?.with_id(id);

    if !vm.update_transaction(&updated) {
        bail!("Failed to update transaction {}", id);
    }

    println!(
        "✅ Updated transaction {}: {} {:.2} ({})",
        id, updated.title, updated.amount, updated.category
    );

    Ok(())
}

pub fn cmd_delete<S: PreferenceStore>(vm: &mut ViewModel<S>, id: i64) -> Result<()> {
    let tx = vm
        .transaction(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))?;

    if !vm.delete_transaction(id) {
        bail!("Failed to delete transaction {}", id);
    }

    println!("🗑️  Deleted transaction {}: {}", id, tx.title);
    println!("   Balance: {:.2}", vm.balance());

    Ok(())
}

pub fn cmd_list<S: PreferenceStore>(
    vm: &mut ViewModel<S>,
    search: Option<&str>,
    with_amount: bool,
    limit: usize,
) -> Result<()> {
    vm.set_search_scope(if with_amount {
        SearchScope::IncludingAmount
    } else {
        SearchScope::TitleAndCategory
    });
    vm.set_search_text(search.unwrap_or(""));

    let transactions = vm.filtered_transactions();

    if transactions.is_empty() {
        if vm.transactions().is_empty() {
            println!("No transactions yet. Add one with:");
            println!("  finpal add expense Groceries 42.50 -c Market");
        } else {
            println!("No transactions match '{}'.", vm.search_text());
        }
        return Ok(());
    }

    println!();
    if vm.search_text().is_empty() {
        println!("📝 Transactions");
    } else {
        println!(
            "📝 Transactions matching '{}' ({} found)",
            vm.search_text(),
            transactions.len()
        );
    }
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        let amount_str = if tx.is_income() {
            format!("\x1b[32m+{:.2}\x1b[0m", tx.amount) // Green for income
        } else {
            format!("\x1b[31m-{:.2}\x1b[0m", tx.amount) // Red for expenses
        };

        println!(
            "   [{:>4}] {} │ {:>20} │ {:15} │ {}",
            tx.id,
            tx.date,
            amount_str,
            truncate(&tx.category, 15),
            truncate(&tx.title, 30)
        );
    }

    if transactions.len() > limit {
        println!();
        println!(
            "   ... {} more (use --limit to show more)",
            transactions.len() - limit
        );
    }

    Ok(())
}
