use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use smart_money_tracker::{
    config::Config,
    dashboard::Dashboard,
    supabase::SupabaseClient,
    types::{Contract, TimingPattern},
    views::{ContractMatchCard, CorrelationCard, TradeRow},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub struct AppState {
    dashboard: Dashboard,
}

#[derive(Serialize)]
struct ContractsResponse {
    correlations: Vec<ContractMatchCard>,
    timing: Vec<TimingPattern>,
    contracts: Vec<Contract>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smart_money_tracker=info")),
        )
        .init();
    dotenvy::dotenv().ok();

    info!("==================================================");
    info!("  SMART MONEY TRACKER");
    info!("==================================================");

    let config = Config::from_env()?;
    info!("Supabase URL: {}", config.supabase_url);
    info!(
        "Lookback: {} days, contract limit: {}, watchlist: {}",
        config.lookback_days,
        config.contract_limit,
        config.watchlist.join(",")
    );

    let supabase = SupabaseClient::new(&config.supabase_url, &config.supabase_key);
    let state = Arc::new(AppState {
        dashboard: Dashboard::new(supabase, &config),
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/trades", get(trades))
        .route("/api/correlations", get(correlations))
        .route("/api/contracts", get(contracts))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on port {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "smart-money-tracker",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

async fn trades(State(s): State<Arc<AppState>>) -> Json<Vec<TradeRow>> {
    let trades = s.dashboard.recent_trades().await;
    Json(trades.iter().map(TradeRow::from).collect())
}

async fn correlations(State(s): State<Arc<AppState>>) -> Json<Vec<CorrelationCard>> {
    let signals = s.dashboard.correlations(Utc::now()).await;
    Json(signals.iter().map(CorrelationCard::from).collect())
}

async fn contracts(State(s): State<Arc<AppState>>) -> Json<ContractsResponse> {
    let overview = s.dashboard.contracts_overview().await;
    Json(ContractsResponse {
        correlations: overview.matches.iter().map(ContractMatchCard::from).collect(),
        timing: overview.timing,
        contracts: overview.contracts,
    })
}
