use analytics::{EngineConfig, KpiEngine};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use configuration::{ApiSettings, Settings};
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// Everything in here is read-only; each request fetches and computes its own
/// data.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    pub engine: KpiEngine,
    pub api: ApiSettings,
}

impl AppState {
    pub fn new(db_repo: DbRepository, api: ApiSettings) -> Self {
        let engine = KpiEngine::new(EngineConfig {
            base_currency: api.base_currency.clone(),
        });
        Self {
            db_repo,
            engine,
            api,
        }
    }
}

/// Builds the application router with authentication, CORS and request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.api.cors_origins);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/equity", get(handlers::get_equity))
        .route("/api/v1/kpi", get(handlers::get_kpi))
        .route("/api/v1/trades", get(handlers::get_trades))
        .route("/api/v1/trades/:trade_id", get(handlers::get_trade_by_id))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin.");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(auth::API_KEY_HEADER)])
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    // Note: Tracing is already initialized by the caller.
    let addr = settings.server.socket_addr()?;
    let db_repo = DbRepository::new(database::connect(&settings.database));
    if let Err(e) = db_repo.ping().await {
        // Not fatal: the health endpoint reports it until the ledger appears.
        tracing::warn!(error = %e, "Trade ledger is not reachable yet.");
    }

    if settings.api.api_key.is_none() {
        tracing::warn!("No API key configured; every /api request will be rejected.");
    }

    let app = build_router(Arc::new(AppState::new(db_repo, settings.api)));

    tracing::info!("Web server started and listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
