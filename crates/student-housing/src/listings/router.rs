use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ResidenceStyle;
use super::filter::ListingFilter;
use super::service::{ListingDetailView, ListingService, ListingServiceError, ListingSummaryView};
use super::source::ListingSource;

/// Raw query string for listing searches.
///
/// Values arrive as text so that blank or malformed inputs can be dropped instead of
/// rejecting the whole request; the filter evaluator only ever sees well-formed values.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub style: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_bedrooms: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

impl From<ListingQuery> for ListingFilter {
    fn from(query: ListingQuery) -> Self {
        ListingFilter {
            search: non_blank(query.search),
            style: non_blank(query.style).and_then(|raw| raw.parse::<ResidenceStyle>().ok()),
            min_price: non_blank(query.min_price).and_then(|raw| raw.parse().ok()),
            max_price: non_blank(query.max_price).and_then(|raw| raw.parse().ok()),
            min_bedrooms: non_blank(query.min_bedrooms).and_then(|raw| raw.parse().ok()),
        }
    }
}

/// Router builder exposing listing search and detail endpoints.
pub fn listing_router<S>(service: ListingService<S>) -> Router
where
    S: ListingSource + 'static,
{
    Router::new()
        .route("/api/v1/listings", get(list_handler::<S>))
        .route("/api/v1/listings/cheapest", get(cheapest_handler::<S>))
        .route("/api/v1/listings/:slug", get(detail_handler::<S>))
        .with_state(service)
}

pub(crate) async fn list_handler<S>(
    State(service): State<ListingService<S>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    S: ListingSource + 'static,
{
    let filter = ListingFilter::from(query);
    let retrieval = service.retrieve(&filter).await;

    match retrieval.error {
        None => {
            let listings: Vec<ListingSummaryView> = retrieval
                .listings
                .iter()
                .map(ListingSummaryView::from)
                .collect();
            let payload = json!({
                "count": listings.len(),
                "filter": filter,
                "listings": listings,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Some(error) => {
            let payload = json!({
                "error": error,
                "listings": [],
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn detail_handler<S>(
    State(service): State<ListingService<S>>,
    Path(slug): Path<String>,
) -> Response
where
    S: ListingSource + 'static,
{
    match service.find(&slug).await {
        Ok(record) => (StatusCode::OK, Json(ListingDetailView::from(record))).into_response(),
        Err(err) => listing_error_response(err),
    }
}

pub(crate) async fn cheapest_handler<S>(State(service): State<ListingService<S>>) -> Response
where
    S: ListingSource + 'static,
{
    match service.cheapest().await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(ListingSummaryView::from(&record))).into_response()
        }
        Ok(None) => {
            let payload = json!({ "error": "no priced listings available" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => listing_error_response(err),
    }
}

pub(crate) fn listing_error_response(err: ListingServiceError) -> Response {
    let status = match err {
        ListingServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ListingServiceError::Source(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
