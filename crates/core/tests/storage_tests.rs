// ═══════════════════════════════════════════════════════════════════
// Storage Tests: LedgerStore over SQLite
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use tempfile::TempDir;

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::models::cash::NewCashEntry;
use finance_tracker_core::models::stock::NewStockTransaction;
use finance_tracker_core::storage::ledger::LedgerStore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Cash table
// ═══════════════════════════════════════════════════════════════════

mod cash {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = LedgerStore::open_in_memory().unwrap();
        let a = store
            .insert_cash_entry(NewCashEntry::new(1000, 0.0, "wallet", d(2024, 1, 1)))
            .await
            .unwrap();
        let b = store
            .insert_cash_entry(NewCashEntry::new(0, 25.5, "", d(2024, 1, 2)))
            .await
            .unwrap();
        assert!(b.id > a.id);

        let rows = store.list_cash_entries().await.unwrap();
        assert_eq!(rows, vec![a, b]);
        assert_eq!(rows[1].us_dollars, 25.5);
        assert_eq!(rows[0].note, "wallet");
        assert_eq!(rows[0].date, d(2024, 1, 1));
    }

    #[tokio::test]
    async fn delete_removes_only_that_row() {
        let store = LedgerStore::open_in_memory().unwrap();
        let a = store
            .insert_cash_entry(NewCashEntry::new(1, 0.0, "", d(2024, 1, 1)))
            .await
            .unwrap();
        let b = store
            .insert_cash_entry(NewCashEntry::new(2, 0.0, "", d(2024, 1, 1)))
            .await
            .unwrap();

        assert!(store.delete_cash_entry(a.id).await.unwrap());
        assert_eq!(store.list_cash_entries().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn deleting_unknown_id_is_a_no_op() {
        let store = LedgerStore::open_in_memory().unwrap();
        assert!(!store.delete_cash_entry(42).await.unwrap());
    }

    #[tokio::test]
    async fn invalid_entry_is_not_stored() {
        let store = LedgerStore::open_in_memory().unwrap();
        let err = store
            .insert_cash_entry(NewCashEntry::new(-5, 0.0, "", d(2024, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(store.list_cash_entries().await.unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Stock table
// ═══════════════════════════════════════════════════════════════════

mod stock {
    use super::*;

    #[tokio::test]
    async fn insert_and_list_round_trip() {
        let store = LedgerStore::open_in_memory().unwrap();
        let tx = NewStockTransaction::new("2330", 1000, 585.5, d(2024, 3, 4)).with_frictions(834, 0);
        let stored = store.insert_stock_transaction(tx).await.unwrap();

        assert_eq!(stored.stock_ticker, "2330");
        assert_eq!(stored.share_count, 1000);
        assert_eq!(stored.processing_fee, 834);

        let rows = store.list_stock_transactions().await.unwrap();
        assert_eq!(rows, vec![stored]);
    }

    #[tokio::test]
    async fn ticker_is_normalized_before_insert() {
        let store = LedgerStore::open_in_memory().unwrap();
        let mut tx = NewStockTransaction::new("x", 1, 10.0, d(2024, 3, 4));
        tx.stock_ticker = " tsm ".into();
        let stored = store.insert_stock_transaction(tx).await.unwrap();
        assert_eq!(stored.stock_ticker, "TSM");
    }

    #[tokio::test]
    async fn zero_shares_are_rejected() {
        let store = LedgerStore::open_in_memory().unwrap();
        let err = store
            .insert_stock_transaction(NewStockTransaction::new("2330", 0, 500.0, d(2024, 3, 4)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(store.list_stock_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_stock_transaction() {
        let store = LedgerStore::open_in_memory().unwrap();
        let stored = store
            .insert_stock_transaction(NewStockTransaction::new("0050", 10, 150.0, d(2024, 3, 4)))
            .await
            .unwrap();
        assert!(store.delete_stock_transaction(stored.id).await.unwrap());
        assert!(!store.delete_stock_transaction(stored.id).await.unwrap());
        assert!(store.list_stock_transactions().await.unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// File-backed store
// ═══════════════════════════════════════════════════════════════════

mod file {
    use super::*;

    #[tokio::test]
    async fn rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("datafile.db");

        {
            let store = LedgerStore::open(&path).unwrap();
            store
                .insert_cash_entry(NewCashEntry::new(700, 1.25, "persisted", d(2024, 6, 1)))
                .await
                .unwrap();
            store
                .insert_stock_transaction(NewStockTransaction::new("0050", 2, 150.0, d(2024, 6, 1)))
                .await
                .unwrap();
        }

        let store = LedgerStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        let cash = store.list_cash_entries().await.unwrap();
        assert_eq!(cash.len(), 1);
        assert_eq!(cash[0].note, "persisted");
        assert_eq!(store.list_stock_transactions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn health_check_succeeds() {
        let store = LedgerStore::open_in_memory().unwrap();
        assert!(store.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_the_connection() {
        let store = LedgerStore::open_in_memory().unwrap();
        let clone = store.clone();
        clone
            .insert_cash_entry(NewCashEntry::new(1, 0.0, "", d(2024, 1, 1)))
            .await
            .unwrap();
        assert_eq!(store.list_cash_entries().await.unwrap().len(), 1);
    }
}
