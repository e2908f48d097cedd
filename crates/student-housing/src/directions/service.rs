use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Destination, DestinationError, RouteRequest, RouteSummary, TravelMode};
use super::provider::{DirectionsProvider, ProviderError};
use crate::listings::Coordinates;

/// Message shown next to the route form whenever the provider fails.
pub const ROUTE_FAILURE_MESSAGE: &str = "Could not calculate route. Please check the destination.";

/// Thin wrapper delegating route computation to the mapping provider. Failures are reported
/// once and never retried.
pub struct RoutePlanner<P> {
    provider: Arc<P>,
}

impl<P> Clone for RoutePlanner<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> RoutePlanner<P>
where
    P: DirectionsProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn plan(
        &self,
        origin: Coordinates,
        destination: &Destination,
        mode: TravelMode,
    ) -> Result<RouteSummary, RouteError> {
        let resolved = destination.resolve()?;
        let request = RouteRequest {
            origin,
            destination: resolved.query,
            mode,
        };

        match self.provider.route(&request).await {
            Ok(summary) => {
                info!(
                    provider = self.provider.provider_name(),
                    destination = %resolved.label,
                    distance = %summary.distance,
                    "route calculated"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(
                    provider = self.provider.provider_name(),
                    destination = %resolved.label,
                    error = %err,
                    "route calculation failed"
                );
                Err(RouteError::Provider(err))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Destination(#[from] DestinationError),
    #[error(transparent)]
    Provider(ProviderError),
}

impl RouteError {
    /// Text displayed to the user; provider details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            RouteError::Destination(err) => err.to_string(),
            RouteError::Provider(_) => ROUTE_FAILURE_MESSAGE.to_string(),
        }
    }
}
