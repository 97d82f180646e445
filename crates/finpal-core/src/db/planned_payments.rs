//! Planned payment operations

use rusqlite::{params, OptionalExtension};

use super::{parse_date, Database};
use crate::error::Result;
use crate::models::{NewPlannedPayment, PlannedPayment, RecurringInterval};

const PAYMENT_COLUMNS: &str =
    "id, title, amount, due_date, note, is_recurring, recurring_interval, is_paid";

impl Database {
    /// Insert a planned payment (unpaid), returning its new ID
    pub fn insert_planned_payment(&self, payment: &NewPlannedPayment) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO planned_payments (title, amount, due_date, note, is_recurring, recurring_interval, is_paid)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            "#,
            params![
                payment.title,
                payment.amount,
                payment.due_date.to_string(),
                payment.note,
                payment.is_recurring,
                interval_column(payment.is_recurring, payment.recurring_interval),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Replace every field of the stored planned payment with the same ID
    ///
    /// Returns false when no planned payment has that ID.
    pub fn update_planned_payment(&self, payment: &PlannedPayment) -> Result<bool> {
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE planned_payments
            SET title = ?, amount = ?, due_date = ?, note = ?, is_recurring = ?,
                recurring_interval = ?, is_paid = ?
            WHERE id = ?
            "#,
            params![
                payment.title,
                payment.amount,
                payment.due_date.to_string(),
                payment.note,
                payment.is_recurring,
                interval_column(payment.is_recurring, payment.recurring_interval),
                payment.is_paid,
                payment.id,
            ],
        )?;

        Ok(updated > 0)
    }

    /// Set the paid flag of a planned payment
    pub fn set_planned_payment_paid(&self, id: i64, paid: bool) -> Result<bool> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE planned_payments SET is_paid = ? WHERE id = ?",
            params![paid, id],
        )?;
        Ok(updated > 0)
    }

    /// Delete a planned payment by ID
    pub fn delete_planned_payment(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM planned_payments WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Get a single planned payment by ID
    pub fn get_planned_payment(&self, id: i64) -> Result<Option<PlannedPayment>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM planned_payments WHERE id = ?",
            PAYMENT_COLUMNS
        );

        let payment = conn
            .query_row(&sql, params![id], Self::row_to_planned_payment)
            .optional()?;

        Ok(payment)
    }

    /// List every planned payment, soonest due first
    pub fn list_planned_payments(&self) -> Result<Vec<PlannedPayment>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM planned_payments ORDER BY due_date ASC, id ASC",
            PAYMENT_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let payments = stmt
            .query_map([], Self::row_to_planned_payment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(payments)
    }

    fn row_to_planned_payment(row: &rusqlite::Row) -> rusqlite::Result<PlannedPayment> {
        let due_str: String = row.get(3)?;
        let is_recurring: bool = row.get(5)?;
        let interval_str: Option<String> = row.get(6)?;

        let recurring_interval = if is_recurring {
            Some(
                interval_str
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(RecurringInterval::Month),
            )
        } else {
            None
        };

        Ok(PlannedPayment {
            id: row.get(0)?,
            title: row.get(1)?,
            amount: row.get(2)?,
            due_date: parse_date(&due_str, 3)?,
            note: row.get(4)?,
            is_recurring,
            recurring_interval,
            is_paid: row.get(7)?,
        })
    }
}

/// Column value for `recurring_interval`, NULL unless the payment recurs
fn interval_column(
    is_recurring: bool,
    interval: Option<RecurringInterval>,
) -> Option<&'static str> {
    if is_recurring {
        Some(interval.unwrap_or(RecurringInterval::Month).as_str())
    } else {
        None
    }
}
