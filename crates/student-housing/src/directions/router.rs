use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{points_of_interest, Destination, TravelMode};
use super::provider::DirectionsProvider;
use super::service::{RouteError, RoutePlanner};
use crate::listings::catalog::{CAMPUS_ADDRESS, CAMPUS_NAME};
use crate::listings::router::listing_error_response;
use crate::listings::{ListingService, ListingSource};

/// Listing lookup plus the planner, shared by the route handlers.
pub struct DirectionsState<S, P> {
    pub listings: ListingService<S>,
    pub planner: RoutePlanner<P>,
}

impl<S, P> Clone for DirectionsState<S, P> {
    fn clone(&self) -> Self {
        Self {
            listings: self.listings.clone(),
            planner: self.planner.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub destination: Destination,
    #[serde(default)]
    pub mode: TravelMode,
}

/// Router exposing the curated destinations and per-listing route calculation.
pub fn directions_router<S, P>(listings: ListingService<S>, planner: RoutePlanner<P>) -> Router
where
    S: ListingSource + 'static,
    P: DirectionsProvider + 'static,
{
    Router::new()
        .route("/api/v1/points-of-interest", get(points_handler))
        .route("/api/v1/listings/:slug/route", post(route_handler::<S, P>))
        .with_state(DirectionsState { listings, planner })
}

pub(crate) async fn points_handler() -> Response {
    let payload = json!({
        "campus": { "name": CAMPUS_NAME, "address": CAMPUS_ADDRESS },
        "points": points_of_interest(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn route_handler<S, P>(
    State(state): State<DirectionsState<S, P>>,
    Path(slug): Path<String>,
    Json(query): Json<RouteQuery>,
) -> Response
where
    S: ListingSource + 'static,
    P: DirectionsProvider + 'static,
{
    let listing = match state.listings.find(&slug).await {
        Ok(listing) => listing,
        Err(err) => return listing_error_response(err),
    };

    match state
        .planner
        .plan(listing.coordinates, &query.destination, query.mode)
        .await
    {
        Ok(route) => {
            let payload = json!({
                "listing": listing.slug,
                "origin": listing.coordinates,
                "mode": query.mode,
                "route": route,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            let status = match err {
                RouteError::Destination(_) => StatusCode::UNPROCESSABLE_ENTITY,
                RouteError::Provider(_) => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({
                "error": err.user_message(),
                "route": null,
            });
            (status, Json(payload)).into_response()
        }
    }
}
