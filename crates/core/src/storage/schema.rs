use rusqlite::Connection;

use crate::errors::CoreError;

/// Create the ledger tables if they do not exist yet.
pub fn apply_migrations(conn: &Connection) -> Result<(), CoreError> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.execute_batch(LEDGER_SCHEMA)?;
    log::debug!("Ledger schema is up to date");
    Ok(())
}

// Column names are fixed: existing datafile.db ledgers open as-is.
const LEDGER_SCHEMA: &str = r#"
-- Cash holdings, one row per submitted entry
CREATE TABLE IF NOT EXISTS cash (
    transaction_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    taiwanese_dollars  INTEGER NOT NULL,
    us_dollars         REAL    NOT NULL,
    note               VARCHAR(30) NOT NULL DEFAULT '',
    date_info          DATE    NOT NULL   -- YYYY-MM-DD
);

-- Stock purchases, append-only per ticker
CREATE TABLE IF NOT EXISTS stock (
    transaction_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_id        VARCHAR(10) NOT NULL,
    stock_num       INTEGER NOT NULL,
    stock_price     REAL    NOT NULL,
    processing_fee  INTEGER NOT NULL DEFAULT 0,
    tax             INTEGER NOT NULL DEFAULT 0,
    date_info       DATE    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_stock_stock_id ON stock(stock_id);
"#;
