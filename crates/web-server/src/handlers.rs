use crate::{error::AppError, AppState};
use analytics::{EquityCurveReport, KpiRecord, PageRequest, TradeEntry, TradePage, TradeQuery, TradeSort, TradeStatus};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::RequestedWindow;
use database::DbError;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// `?start=&end=` as given; both are optional ISO-8601 strings.
#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl WindowParams {
    fn requested(self) -> RequestedWindow {
        RequestedWindow::new(self.start, self.end)
    }
}

/// Query string of the trades listing. Numbers arrive as strings so that a
/// malformed value falls back to its default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct TradesParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
}

/// # GET /api/v1/health
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.db_repo.ping().await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "Health check failed.");
            let body = Json(json!({ "ok": false, "error": e.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

/// # GET /api/v1/equity
pub async fn get_equity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WindowParams>,
) -> Result<Json<EquityCurveReport>, AppError> {
    let requested = params.requested();
    let snapshots = state.db_repo.load_snapshots(&requested.bounds()).await?;
    Ok(Json(state.engine.equity_curve(&snapshots, &requested)))
}

/// # GET /api/v1/kpi
pub async fn get_kpi(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WindowParams>,
) -> Result<Json<KpiRecord>, AppError> {
    let requested = params.requested();
    let snapshots = state.db_repo.load_snapshots(&requested.bounds()).await?;
    let record = state.engine.calculate(&snapshots, &requested);
    tracing::info!(
        snapshots = snapshots.len(),
        trades = record.trades_count,
        "Computed KPIs."
    );
    Ok(Json(record))
}

/// # GET /api/v1/trades
pub async fn get_trades(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TradesParams>,
) -> Result<Json<TradePage>, AppError> {
    let requested = RequestedWindow::new(params.start, params.end);
    let query = TradeQuery {
        status: params
            .status
            .as_deref()
            .map(TradeStatus::parse_lenient)
            .unwrap_or_default(),
        sort: params
            .sort
            .as_deref()
            .map(TradeSort::parse)
            .unwrap_or_default(),
        page: PageRequest::clamped(
            parse_int(params.limit.as_deref()),
            parse_int(params.offset.as_deref()),
            state.api.default_trades_limit,
            state.api.max_trades_limit,
        ),
    };

    let snapshots = state.db_repo.load_snapshots(&requested.bounds()).await?;
    Ok(Json(state.engine.list_trades(&snapshots, &query)))
}

/// # GET /api/v1/trades/:trade_id
/// The id of a trade is its ledger timestamp. An id that is not an integer
/// cannot match any trade and gets the same 404 as an unknown one.
pub async fn get_trade_by_id(
    State(state): State<Arc<AppState>>,
    Path(trade_id): Path<String>,
) -> Result<Json<TradeEntry>, AppError> {
    let not_found = || AppError::NotFound("Trade not found".to_string());
    let trade_id = parse_int(Some(&trade_id)).ok_or_else(not_found)?;
    let snapshot = state.db_repo.get_snapshot(trade_id).await.map_err(|e| match e {
        DbError::NotFound => not_found(),
        other => other.into(),
    })?;
    Ok(Json(state.engine.trade_entry(&snapshot)))
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}
