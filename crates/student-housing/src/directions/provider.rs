use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::domain::{RouteRequest, RouteSummary};

/// External mapping provider computing a route between two points.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn route(&self, request: &RouteRequest) -> Result<RouteSummary, ProviderError>;

    fn provider_name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("directions provider unreachable: {0}")]
    Transport(String),
    #[error("no route found ({status})")]
    NoRoute { status: String },
    #[error("directions response could not be decoded: {0}")]
    Decode(String),
    #[error("directions API key is not configured")]
    MissingApiKey,
}

/// Client for the Google Directions JSON API.
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    #[serde(default)]
    legs: Vec<LegBody>,
    overview_polyline: Option<PolylineBody>,
}

#[derive(Debug, Deserialize)]
struct LegBody {
    distance: Option<TextBody>,
    duration: Option<TextBody>,
}

#[derive(Debug, Deserialize)]
struct TextBody {
    text: String,
}

#[derive(Debug, Deserialize)]
struct PolylineBody {
    points: String,
}

impl GoogleDirectionsClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn directions_url(&self) -> String {
        format!("{}/directions/json", self.base_url)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn route(&self, request: &RouteRequest) -> Result<RouteSummary, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let origin = request.origin.as_query_value();
        let url = self.directions_url();
        debug!(%url, %origin, mode = request.mode.provider_value(), "requesting directions");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", request.destination.as_str()),
                ("mode", request.mode.provider_value()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let body: DirectionsResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;
        summarize(body)
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }
}

/// First route, first leg. Missing text fields become empty strings.
fn summarize(body: DirectionsResponse) -> Result<RouteSummary, ProviderError> {
    if body.status != "OK" {
        return Err(ProviderError::NoRoute {
            status: body.status,
        });
    }

    let route = body.routes.into_iter().next().ok_or_else(|| ProviderError::NoRoute {
        status: "ZERO_RESULTS".to_string(),
    })?;
    let leg = route.legs.into_iter().next();

    Ok(RouteSummary {
        distance: leg
            .as_ref()
            .and_then(|leg| leg.distance.as_ref())
            .map(|text| text.text.clone())
            .unwrap_or_default(),
        duration: leg
            .as_ref()
            .and_then(|leg| leg.duration.as_ref())
            .map(|text| text.text.clone())
            .unwrap_or_default(),
        polyline: route
            .overview_polyline
            .map(|polyline| polyline.points)
            .unwrap_or_default(),
    })
}
