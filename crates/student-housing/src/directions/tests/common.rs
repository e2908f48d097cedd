use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::directions::domain::{RouteRequest, RouteSummary};
use crate::directions::provider::{DirectionsProvider, ProviderError};
use crate::directions::service::RoutePlanner;

/// Provider double replaying a fixed answer and recording every request.
pub(super) struct StubProvider {
    answer: Result<RouteSummary, ProviderError>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl StubProvider {
    pub(super) fn answering(answer: Result<RouteSummary, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl DirectionsProvider for StubProvider {
    async fn route(&self, request: &RouteRequest) -> Result<RouteSummary, ProviderError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        self.answer.clone()
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

pub(super) fn summary() -> RouteSummary {
    RouteSummary {
        distance: "1.4 km".to_string(),
        duration: "18 mins".to_string(),
        polyline: "encoded".to_string(),
    }
}

pub(super) fn planner(provider: &Arc<StubProvider>) -> RoutePlanner<StubProvider> {
    RoutePlanner::new(Arc::clone(provider))
}
