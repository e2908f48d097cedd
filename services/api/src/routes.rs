use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use student_housing::accounts::{
    account_router, require_browse_access, require_session, AuthService, IdentityProvider,
    ProfileRepository,
};
use student_housing::directions::{directions_router, DirectionsProvider, RoutePlanner};
use student_housing::listings::{listing_router, ListingService, ListingSource};

/// Everything the HTTP surface is assembled from.
pub(crate) struct Services<S, P, I, R> {
    pub(crate) listings: ListingService<S>,
    pub(crate) planner: RoutePlanner<P>,
    pub(crate) auth: Arc<AuthService<I, R>>,
}

/// Listing and route endpoints sit behind the browse guard; every non-public path sits behind
/// the session gate.
pub(crate) fn with_application_routes<S, P, I, R>(services: Services<S, P, I, R>) -> axum::Router
where
    S: ListingSource + 'static,
    P: DirectionsProvider + 'static,
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    let Services {
        listings,
        planner,
        auth,
    } = services;
    let sessions = Arc::clone(auth.sessions());
    let accounts = auth.accounts().clone();

    let browse_routes = listing_router(listings.clone())
        .merge(directions_router(listings, planner))
        .layer(from_fn_with_state(accounts, require_browse_access::<R>));

    account_router(auth)
        .merge(browse_routes)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(from_fn_with_state(sessions, require_session))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
