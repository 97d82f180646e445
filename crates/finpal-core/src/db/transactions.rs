//! Transaction operations

use rusqlite::{params, OptionalExtension};

use super::{parse_date, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TransactionType};

const TRANSACTION_COLUMNS: &str = "id, amount, title, type, date, category";

impl Database {
    /// Insert a transaction, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (amount, title, type, date, category)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                tx.amount,
                tx.title,
                tx.transaction_type.as_str(),
                tx.date.to_string(),
                tx.category,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Replace every field of the stored transaction with the same ID
    ///
    /// Returns false when no transaction has that ID.
    pub fn update_transaction(&self, tx: &Transaction) -> Result<bool> {
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE transactions
            SET amount = ?, title = ?, type = ?, date = ?, category = ?
            WHERE id = ?
            "#,
            params![
                tx.amount,
                tx.title,
                tx.transaction_type.as_str(),
                tx.date.to_string(),
                tx.category,
                tx.id,
            ],
        )?;

        Ok(updated > 0)
    }

    /// Delete a transaction by ID
    ///
    /// Returns false when no transaction has that ID.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE id = ?",
            TRANSACTION_COLUMNS
        );

        let tx = conn
            .query_row(&sql, params![id], Self::row_to_transaction)
            .optional()?;

        Ok(tx)
    }

    /// List every transaction, newest first
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY date DESC, id DESC",
            TRANSACTION_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let type_str: String = row.get(3)?;
        let date_str: String = row.get(4)?;
        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            title: row.get(2)?,
            // The CHECK constraint keeps this to the two known values
            transaction_type: type_str.parse().unwrap_or(TransactionType::Expense),
            date: parse_date(&date_str, 4)?,
            category: row.get(5)?,
        })
    }
}
