use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use finance_tracker_core::models::{analytics::PortfolioSnapshot, portfolio::Dashboard};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::ApiResult;
use crate::forms::{CashForm, DeleteForm, StockForm};
use crate::main_lib::AppState;

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Snapshot, ledger rows and chart flags. Refreshes the chart files.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<Dashboard>> {
    let dashboard = state.tracker.dashboard().await?;
    Ok(Json(dashboard))
}

async fn get_snapshot(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSnapshot>> {
    let snapshot = state.tracker.snapshot().await?;
    Ok(Json(snapshot))
}

async fn submit_cash(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CashForm>,
) -> ApiResult<Redirect> {
    let entry = form.into_entry(today())?;
    let stored = state.tracker.add_cash_entry(entry).await?;
    tracing::info!("Recorded cash entry {}", stored.id);
    Ok(Redirect::to("/"))
}

async fn delete_cash(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DeleteForm>,
) -> ApiResult<Redirect> {
    let id = form.id()?;
    if state.tracker.delete_cash_entry(id).await? {
        tracing::info!("Deleted cash entry {id}");
    }
    Ok(Redirect::to("/"))
}

async fn submit_stock(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StockForm>,
) -> ApiResult<Redirect> {
    let tx = form.into_transaction(today())?;
    let stored = state.tracker.add_stock_transaction(tx).await?;
    tracing::info!(
        "Recorded stock transaction {} ({} x {})",
        stored.id,
        stored.stock_ticker,
        stored.share_count
    );
    Ok(Redirect::to("/"))
}

async fn delete_stock(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DeleteForm>,
) -> ApiResult<Redirect> {
    let id = form.id()?;
    if state.tracker.delete_stock_transaction(id).await? {
        tracing::info!("Deleted stock transaction {id}");
    }
    Ok(Redirect::to("/"))
}

async fn healthz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.tracker.ledger().health_check().await?;
    Ok("ok")
}

pub fn app_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/api/snapshot", get(get_snapshot))
        .route("/cash", post(submit_cash))
        .route("/cash-delete", post(delete_cash))
        .route("/stock", post(submit_stock))
        .route("/stock-delete", post(delete_stock))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
