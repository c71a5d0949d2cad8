//! Service health endpoint

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::ApiContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub supabase: bool,
    pub claude: bool,
    pub redis: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: ServiceStatus,
    pub timestamp: DateTime<Utc>,
}

async fn store_reachable(ctx: &ApiContext) -> bool {
    match ctx.products.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    }
}

/// `GET /api/health`
///
/// Always 200. Each failing check only flips its own flag.
pub async fn health_check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let (supabase, redis) = tokio::join!(store_reachable(&ctx), ctx.cache.ping());
    let claude = ctx.ai.is_configured();

    let services = ServiceStatus {
        supabase,
        claude,
        redis,
    };
    tracing::debug!(?services, "Health check");

    Json(HealthResponse {
        status: "ok",
        services,
        timestamp: Utc::now(),
    })
}
