use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::CoreError;
use crate::models::cash::{CashEntry, NewCashEntry};
use crate::models::stock::{normalize_ticker, NewStockTransaction, StockTransaction};

use super::schema::apply_migrations;

/// SQLite-backed store for cash entries and stock transactions.
///
/// One connection, serialized behind an async mutex. Cloning the store
/// shares the connection.
#[derive(Clone)]
pub struct LedgerStore {
    connection: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        log::info!("Opening ledger at {}", path.display());
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        apply_migrations(&conn)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Create an in-memory ledger (tests, throwaway sessions).
    pub fn open_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        apply_migrations(&conn)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the database answers a trivial query.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        let conn = self.connection.lock().await;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    // ── Cash ────────────────────────────────────────────────────────

    /// Validate and insert a cash entry. Returns the stored row.
    pub async fn insert_cash_entry(&self, entry: NewCashEntry) -> Result<CashEntry, CoreError> {
        entry.validate()?;
        let conn = self.connection.lock().await;
        conn.execute(
            "INSERT INTO cash (taiwanese_dollars, us_dollars, note, date_info)
             VALUES (?1, ?2, ?3, ?4)",
            params![entry.taiwanese_dollars, entry.us_dollars, entry.note, entry.date],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Inserted cash entry {id}");

        Ok(CashEntry {
            id,
            taiwanese_dollars: entry.taiwanese_dollars,
            us_dollars: entry.us_dollars,
            note: entry.note,
            date: entry.date,
        })
    }

    /// Delete a cash entry. Returns `false` when no entry has this id.
    pub async fn delete_cash_entry(&self, id: i64) -> Result<bool, CoreError> {
        let conn = self.connection.lock().await;
        let removed = conn.execute("DELETE FROM cash WHERE transaction_id = ?1", params![id])?;
        if removed == 0 {
            log::debug!("Cash entry {id} not found, nothing deleted");
        }
        Ok(removed > 0)
    }

    /// All cash entries in insertion order.
    pub async fn list_cash_entries(&self) -> Result<Vec<CashEntry>, CoreError> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(
            "SELECT transaction_id, taiwanese_dollars, us_dollars, note, date_info
             FROM cash ORDER BY transaction_id",
        )?;
        let rows = stmt.query_map([], cash_from_row)?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    // ── Stock ───────────────────────────────────────────────────────

    /// Validate and insert a stock transaction. The ticker is normalized
    /// (trimmed, uppercased) before it is stored.
    pub async fn insert_stock_transaction(
        &self,
        mut tx: NewStockTransaction,
    ) -> Result<StockTransaction, CoreError> {
        tx.stock_ticker = normalize_ticker(&tx.stock_ticker);
        tx.validate()?;
        let conn = self.connection.lock().await;
        conn.execute(
            "INSERT INTO stock (stock_id, stock_num, stock_price, processing_fee, tax, date_info)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tx.stock_ticker,
                tx.share_count,
                tx.unit_price,
                tx.processing_fee,
                tx.tax,
                tx.date
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Inserted stock transaction {id} for {}", tx.stock_ticker);

        Ok(StockTransaction {
            id,
            stock_ticker: tx.stock_ticker,
            share_count: tx.share_count,
            unit_price: tx.unit_price,
            processing_fee: tx.processing_fee,
            tax: tx.tax,
            date: tx.date,
        })
    }

    /// Delete a stock transaction. Returns `false` when no row has this id.
    pub async fn delete_stock_transaction(&self, id: i64) -> Result<bool, CoreError> {
        let conn = self.connection.lock().await;
        let removed = conn.execute("DELETE FROM stock WHERE transaction_id = ?1", params![id])?;
        if removed == 0 {
            log::debug!("Stock transaction {id} not found, nothing deleted");
        }
        Ok(removed > 0)
    }

    /// All stock transactions in insertion order.
    pub async fn list_stock_transactions(&self) -> Result<Vec<StockTransaction>, CoreError> {
        let conn = self.connection.lock().await;
        let mut stmt = conn.prepare(
            "SELECT transaction_id, stock_id, stock_num, stock_price, processing_fee, tax, date_info
             FROM stock ORDER BY transaction_id",
        )?;
        let rows = stmt.query_map([], stock_from_row)?;
        let transactions = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(transactions)
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("path", &self.path)
            .finish()
    }
}

fn cash_from_row(row: &Row<'_>) -> rusqlite::Result<CashEntry> {
    Ok(CashEntry {
        id: row.get(0)?,
        taiwanese_dollars: row.get(1)?,
        us_dollars: row.get(2)?,
        note: row.get(3)?,
        date: row.get(4)?,
    })
}

fn stock_from_row(row: &Row<'_>) -> rusqlite::Result<StockTransaction> {
    Ok(StockTransaction {
        id: row.get(0)?,
        stock_ticker: row.get(1)?,
        share_count: row.get(2)?,
        unit_price: row.get(3)?,
        processing_fee: row.get(4)?,
        tax: row.get(5)?,
        date: row.get(6)?,
    })
}
