//! Aggregation engine
//!
//! Pure functions over transaction and planned payment slices: totals,
//! per-category sums, month-over-month comparisons and search. Empty inputs
//! give zero totals and empty collections; every division is guarded.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{
    CategoryExpense, MonthSummary, PaymentMonthSummary, PlannedPayment, Transaction,
    TransactionType,
};

/// Which fields a search query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Title or category
    #[default]
    TitleAndCategory,
    /// Title, category, or the amount formatted with two decimals
    IncludingAmount,
}

/// Sum of amounts with the given type, across all dates
pub fn total_by_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == kind)
        .map(|t| t.amount)
        .sum()
}

/// Income minus expense, floored at zero
pub fn balance(transactions: &[Transaction]) -> f64 {
    let net = total_by_type(transactions, TransactionType::Income)
        - total_by_type(transactions, TransactionType::Expense);
    net.max(0.0)
}

/// Partition transactions by exact (case-sensitive) category
pub fn group_by_category(transactions: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.category.clone()).or_default().push(tx.clone());
    }
    groups
}

/// Expense totals per category with their share of all expenses
///
/// Sorted by amount, largest first; equal amounts sort by category name.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryExpense> {
    let total_expense = total_by_type(transactions, TransactionType::Expense);

    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *sums.entry(tx.category.as_str()).or_insert(0.0) += tx.amount;
    }

    let mut breakdown: Vec<CategoryExpense> = sums
        .into_iter()
        .map(|(category, amount)| CategoryExpense {
            category: category.to_string(),
            amount,
            percentage: percentage_of(amount, total_expense),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

/// The calendar month before `month` (1 wraps to 12)
pub fn previous_month(month: u32) -> u32 {
    if month > 1 {
        month - 1
    } else {
        12
    }
}

/// Expense spending in `category` for `current_month` and the month before
///
/// Only the calendar month is compared; transactions from any year that
/// fall in the month are summed together.
pub fn month_over_month(
    transactions: &[Transaction],
    category: &str,
    current_month: u32,
) -> (f64, f64) {
    let previous = previous_month(current_month);

    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == category)
        .fold((0.0, 0.0), |(cur, prev), t| {
            let month = t.date.month();
            if month == current_month {
                (cur + t.amount, prev)
            } else if month == previous {
                (cur, prev + t.amount)
            } else {
                (cur, prev)
            }
        })
}

/// Case-insensitive substring search
///
/// A blank query matches everything.
pub fn filter_transactions(
    transactions: &[Transaction],
    query: &str,
    scope: SearchScope,
) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return transactions.to_vec();
    }

    transactions
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
                || (scope == SearchScope::IncludingAmount
                    && format!("{:.2}", t.amount).contains(&needle))
        })
        .cloned()
        .collect()
}

/// Transactions dated in the given calendar month (any year)
pub fn transactions_in_month(transactions: &[Transaction], month: u32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.month() == month)
        .cloned()
        .collect()
}

/// Income, expense and net for one calendar month
pub fn monthly_summary(transactions: &[Transaction], month: u32) -> MonthSummary {
    let in_month = transactions_in_month(transactions, month);
    let income = total_by_type(&in_month, TransactionType::Income);
    let expense = total_by_type(&in_month, TransactionType::Expense);
    MonthSummary {
        month,
        income,
        expense,
        net: income - expense,
    }
}

/// Category breakdown restricted to one calendar month
pub fn monthly_category_breakdown(
    transactions: &[Transaction],
    month: u32,
) -> Vec<CategoryExpense> {
    category_breakdown(&transactions_in_month(transactions, month))
}

/// The single largest expense
pub fn highest_expense(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .max_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Mean expense amount, 0 when there are no expenses
pub fn average_expense(transactions: &[Transaction]) -> f64 {
    let (sum, count) = transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold((0.0, 0usize), |(sum, count), t| (sum + t.amount, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Planned payments due in the given calendar month, soonest first
pub fn payments_in_month(payments: &[PlannedPayment], month: u32) -> Vec<PlannedPayment> {
    let mut due: Vec<PlannedPayment> = payments
        .iter()
        .filter(|p| p.due_date.month() == month)
        .cloned()
        .collect();
    due.sort_by_key(|p| (p.due_date, p.id));
    due
}

/// Total, paid and outstanding planned amounts for one calendar month
pub fn payment_month_summary(payments: &[PlannedPayment], month: u32) -> PaymentMonthSummary {
    let due = payments_in_month(payments, month);
    let total: f64 = due.iter().map(|p| p.amount).sum();
    let completed: f64 = due.iter().filter(|p| p.is_paid).map(|p| p.amount).sum();
    PaymentMonthSummary {
        month,
        total,
        completed,
        remaining: (total - completed).max(0.0),
    }
}

/// Unpaid payments due between `today` and `today + within_days` inclusive
///
/// A window reaching past the last representable date covers everything
/// from `today` on.
pub fn upcoming_payments(
    payments: &[PlannedPayment],
    today: NaiveDate,
    within_days: i64,
) -> Vec<PlannedPayment> {
    let window_end = Duration::try_days(within_days)
        .and_then(|d| today.checked_add_signed(d))
        .unwrap_or(if within_days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
    let mut upcoming: Vec<PlannedPayment> = payments
        .iter()
        .filter(|p| !p.is_paid && p.due_date >= today && p.due_date <= window_end)
        .cloned()
        .collect();
    upcoming.sort_by_key(|p| (p.due_date, p.id));
    upcoming
}

/// Unpaid payments whose due date has passed
pub fn overdue_payments(payments: &[PlannedPayment], today: NaiveDate) -> Vec<PlannedPayment> {
    let mut overdue: Vec<PlannedPayment> = payments
        .iter()
        .filter(|p| !p.is_paid && p.due_date < today)
        .cloned()
        .collect();
    overdue.sort_by_key(|p| (p.due_date, p.id));
    overdue
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        (amount / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecurringInterval;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        id: i64,
        kind: TransactionType,
        amount: f64,
        category: &str,
        on: NaiveDate,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            title: format!("{} #{}", category, id),
            transaction_type: kind,
            date: on,
            category: category.to_string(),
        }
    }

    fn payment(id: i64, amount: f64, due: NaiveDate, paid: bool) -> PlannedPayment {
        PlannedPayment {
            id,
            title: format!("Bill {}", id),
            amount,
            due_date: due,
            note: None,
            is_recurring: true,
            recurring_interval: Some(RecurringInterval::Month),
            is_paid: paid,
        }
    }

    fn sample() -> Vec<Transaction> {
        use TransactionType::*;
        vec![
            tx(1, Income, 3000.0, "Salary", date(2026, 3, 1)),
            tx(2, Expense, 600.0, "Market", date(2026, 3, 3)),
            tx(3, Expense, 300.0, "Transport", date(2026, 3, 5)),
            tx(4, Expense, 100.0, "Market", date(2026, 2, 20)),
            tx(5, Expense, 200.0, "Cafe", date(2026, 2, 21)),
        ]
    }

    #[test]
    fn test_totals_and_balance() {
        let txs = sample();
        assert_eq!(total_by_type(&txs, TransactionType::Income), 3000.0);
        assert_eq!(total_by_type(&txs, TransactionType::Expense), 1200.0);
        assert_eq!(balance(&txs), 1800.0);
    }

    #[test]
    fn test_balance_never_negative() {
        use TransactionType::*;
        let txs = vec![
            tx(1, Income, 100.0, "Salary", date(2026, 1, 1)),
            tx(2, Expense, 250.0, "Rent", date(2026, 1, 2)),
        ];
        assert_eq!(balance(&txs), 0.0);
        assert_eq!(balance(&[]), 0.0);
    }

    #[test]
    fn test_group_by_category_is_case_sensitive() {
        use TransactionType::*;
        let txs = vec![
            tx(1, Expense, 1.0, "Food", date(2026, 1, 1)),
            tx(2, Expense, 1.0, "food", date(2026, 1, 1)),
            tx(3, Expense, 1.0, "Food", date(2026, 1, 1)),
        ];
        let groups = group_by_category(&txs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Food"].len(), 2);
        assert_eq!(groups["food"].len(), 1);
    }

    #[test]
    fn test_category_breakdown_sorted_and_sums_to_100() {
        let breakdown = category_breakdown(&sample());

        let categories: Vec<&str> = breakdown.iter().map(|c| c.category.as_str()).collect();
        // Salary has no expenses and is left out
        assert_eq!(categories, vec!["Market", "Transport", "Cafe"]);
        assert_eq!(breakdown[0].amount, 700.0);

        let total: f64 = breakdown.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_breakdown_ties_sort_by_name() {
        use TransactionType::*;
        let txs = vec![
            tx(1, Expense, 50.0, "Zoo", date(2026, 1, 1)),
            tx(2, Expense, 50.0, "Art", date(2026, 1, 1)),
        ];
        let breakdown = category_breakdown(&txs);
        assert_eq!(breakdown[0].category, "Art");
        assert_eq!(breakdown[0].percentage, 50.0);
    }

    #[test]
    fn test_category_breakdown_empty_safe() {
        assert!(category_breakdown(&[]).is_empty());

        let income_only = vec![tx(
            1,
            TransactionType::Income,
            10.0,
            "Gift",
            date(2026, 1, 1),
        )];
        assert!(category_breakdown(&income_only).is_empty());
    }

    #[test]
    fn test_month_over_month() {
        let (current, previous) = month_over_month(&sample(), "Market", 3);
        assert_eq!(current, 600.0);
        assert_eq!(previous, 100.0);

        let (current, previous) = month_over_month(&sample(), "Missing", 3);
        assert_eq!((current, previous), (0.0, 0.0));
    }

    #[test]
    fn test_month_over_month_january_compares_december() {
        use TransactionType::*;
        let txs = vec![
            tx(1, Expense, 80.0, "Market", date(2026, 1, 10)),
            tx(2, Expense, 120.0, "Market", date(2025, 12, 28)),
        ];
        assert_eq!(month_over_month(&txs, "Market", 1), (80.0, 120.0));
        assert_eq!(previous_month(1), 12);
    }

    #[test]
    fn test_month_over_month_ignores_year() {
        use TransactionType::*;
        let txs = vec![
            tx(1, Expense, 10.0, "Market", date(2024, 3, 1)),
            tx(2, Expense, 20.0, "Market", date(2026, 3, 1)),
        ];
        assert_eq!(month_over_month(&txs, "Market", 3), (30.0, 0.0));
    }

    #[test]
    fn test_month_over_month_ignores_income() {
        use TransactionType::*;
        let txs = vec![tx(1, Income, 500.0, "Market", date(2026, 3, 1))];
        assert_eq!(month_over_month(&txs, "Market", 3), (0.0, 0.0));
    }

    #[test]
    fn test_filter_transactions() {
        let txs = sample();
        assert_eq!(filter_transactions(&txs, "", SearchScope::default()).len(), 5);
        assert_eq!(
            filter_transactions(&txs, "   ", SearchScope::default()).len(),
            5
        );

        let market = filter_transactions(&txs, "mArKeT", SearchScope::TitleAndCategory);
        assert_eq!(market.len(), 2);

        assert!(filter_transactions(&txs, "600", SearchScope::TitleAndCategory).is_empty());
        let by_amount = filter_transactions(&txs, "600.00", SearchScope::IncludingAmount);
        assert_eq!(by_amount.len(), 1);
        assert_eq!(by_amount[0].id, 2);
    }

    #[test]
    fn test_monthly_summary() {
        let march = monthly_summary(&sample(), 3);
        assert_eq!(march.income, 3000.0);
        assert_eq!(march.expense, 900.0);
        assert_eq!(march.net, 2100.0);

        let feb = monthly_category_breakdown(&sample(), 2);
        assert_eq!(feb[0].category, "Cafe");
    }

    #[test]
    fn test_highest_and_average_expense() {
        let txs = sample();
        assert_eq!(highest_expense(&txs).map(|t| t.id), Some(2));
        assert_eq!(average_expense(&txs), 300.0);

        assert!(highest_expense(&[]).is_none());
        assert_eq!(average_expense(&[]), 0.0);
    }

    #[test]
    fn test_payment_month_summary() {
        let payments = vec![
            payment(1, 100.0, date(2026, 4, 10), true),
            payment(2, 50.0, date(2026, 4, 2), false),
            payment(3, 999.0, date(2026, 5, 1), false),
        ];

        let april = payment_month_summary(&payments, 4);
        assert_eq!(april.total, 150.0);
        assert_eq!(april.completed, 100.0);
        assert_eq!(april.remaining, 50.0);

        let ids: Vec<i64> = payments_in_month(&payments, 4).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let empty = payment_month_summary(&payments, 8);
        assert_eq!(empty.total, 0.0);
        assert_eq!(empty.remaining, 0.0);
    }

    #[test]
    fn test_upcoming_and_overdue_payments() {
        let today = date(2026, 4, 5);
        let payments = vec![
            payment(1, 10.0, date(2026, 4, 1), false),
            payment(2, 10.0, date(2026, 4, 3), true),
            payment(3, 10.0, date(2026, 4, 5), false),
            payment(4, 10.0, date(2026, 4, 20), false),
            payment(5, 10.0, date(2026, 6, 1), false),
        ];

        let upcoming: Vec<i64> = upcoming_payments(&payments, today, 30)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(upcoming, vec![3, 4]);

        let overdue: Vec<i64> = overdue_payments(&payments, today)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(overdue, vec![1]);
    }

    #[test]
    fn test_upcoming_payments_huge_window() {
        let today = date(2026, 3, 15);
        let payments = vec![
            payment(1, 10.0, date(2026, 3, 1), false),
            payment(2, 10.0, date(2026, 3, 20), false),
            payment(3, 10.0, date(2090, 1, 1), false),
        ];

        for days in [100_000_000, i64::MAX] {
            let ids: Vec<i64> = upcoming_payments(&payments, today, days)
                .iter()
                .map(|p| p.id)
                .collect();
            assert_eq!(ids, vec![2, 3]);
        }

        assert!(upcoming_payments(&payments, today, i64::MIN).is_empty());
        assert!(upcoming_payments(&[], today, i64::MAX).is_empty());
    }
}
