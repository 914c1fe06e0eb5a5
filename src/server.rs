use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::model::LeagueResponse;
use crate::service::LeagueService;

#[derive(Debug, Deserialize)]
pub struct LeagueQuery {
    /// `false` limits the table to the top rows.
    #[serde(default = "full_table_default", deserialize_with = "deserialize_flag")]
    pub full_table: bool,
}

fn full_table_default() -> bool {
    true
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean `{}`", raw)))
}

/// Accepts the spellings query-string clients commonly send for booleans.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

pub fn router(service: Arc<LeagueService>) -> Router {
    Router::new()
        .route("/league", get(get_league))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn serve(service: Arc<LeagueService>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        "Serving {} on http://{}/league",
        service.league_url(),
        listener.local_addr()?
    );
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn get_league(
    State(service): State<Arc<LeagueService>>,
    query: Result<Query<LeagueQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!("Rejected league query: {}", rejection.body_text());
            let body = json!({ "detail": rejection.body_text() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    };

    let result = service.league(query.full_table).await;
    match &result {
        Ok(records) => info!(
            "Served {} records (full_table={})",
            records.len(),
            query.full_table
        ),
        Err(e) => warn!("League fetch failed: {}", e),
    }
    Json(LeagueResponse::from(result)).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// ── Tests ──
