use std::sync::Arc;

use finance_tracker_core::storage::ledger::LedgerStore;
use finance_tracker_core::FinanceTracker;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub tracker: FinanceTracker,
}

/// Install the global subscriber. `log` records from the core crate are
/// forwarded into it.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let ledger = LedgerStore::open(&config.db_path)?;
    tracing::info!("Ledger path in use: {}", ledger.path().display());

    std::fs::create_dir_all(&config.static_dir)?;
    let tracker = FinanceTracker::from_settings(ledger, &config.market, &config.static_dir)?;

    Ok(Arc::new(AppState { tracker }))
}
