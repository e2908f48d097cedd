use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::domain::ResidenceRecord;
use super::filter::ListingFilter;
use super::service::ListingService;
use super::source::ListingSource;

/// Monotonic token identifying one retrieval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

/// Observable state of a feed: the active filter and the last applied response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub filter: ListingFilter,
    pub listings: Vec<ResidenceRecord>,
    pub error: Option<String>,
    pub loading: bool,
    pub applied: Option<RequestToken>,
}

/// Keeps a consumer's listing view in sync with its filter.
///
/// Every filter change issues a fresh token and triggers a full retrieval pass. A response
/// is applied only while its token is still the latest issued, so a slow, superseded
/// request can never overwrite newer results.
pub struct ListingFeed<S> {
    service: ListingService<S>,
    issued: AtomicU64,
    state: Mutex<FeedSnapshot>,
}

impl<S> ListingFeed<S>
where
    S: ListingSource + 'static,
{
    pub fn new(service: ListingService<S>) -> Arc<Self> {
        Arc::new(Self {
            service,
            issued: AtomicU64::new(0),
            state: Mutex::new(FeedSnapshot::default()),
        })
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.lock().expect("feed mutex poisoned").clone()
    }

    fn issue(&self, filter: &ListingFilter) -> RequestToken {
        let token = RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        let mut state = self.state.lock().expect("feed mutex poisoned");
        state.filter = filter.clone();
        state.loading = true;
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.issued.load(Ordering::SeqCst) == token.0
    }

    /// Re-run retrieval for `filter`. Returns whether this response was applied.
    pub async fn apply(&self, filter: ListingFilter) -> bool {
        let token = self.issue(&filter);
        let retrieval = self.service.retrieve(&filter).await;

        let mut state = self.state.lock().expect("feed mutex poisoned");
        if !self.is_current(token) {
            debug!(token = token.0, "discarding stale listing response");
            return false;
        }

        state.listings = retrieval.listings;
        state.error = retrieval.error;
        state.loading = false;
        state.applied = Some(token);
        true
    }

    /// Re-run retrieval with the current filter.
    pub async fn refresh(&self) -> bool {
        let filter = self.snapshot().filter;
        self.apply(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::{AgreementLength, ResidenceStyle};
    use crate::listings::source::StaticCatalog;
    use crate::listings::tests::{residence, FailingSource, GatedSource};

    #[tokio::test]
    async fn apply_replaces_state_with_filtered_results() {
        let feed = ListingFeed::new(ListingService::new(Arc::new(StaticCatalog::campus())));
        let filter = ListingFilter {
            style: Some(ResidenceStyle::Apartment),
            ..ListingFilter::default()
        };

        assert!(feed.apply(filter.clone()).await);
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.filter, filter);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.listings.len(), 3);
        assert_eq!(snapshot.applied, Some(RequestToken(1)));

        assert!(feed.refresh().await);
        let refreshed = feed.snapshot();
        assert_eq!(refreshed.listings, snapshot.listings);
        assert_eq!(refreshed.applied, Some(RequestToken(2)));
    }

    #[tokio::test]
    async fn failed_retrieval_clears_listings_and_reports_error() {
        let feed = ListingFeed::new(ListingService::new(Arc::new(FailingSource::default())));
        assert!(feed.apply(ListingFilter::default()).await);

        let snapshot = feed.snapshot();
        assert!(snapshot.listings.is_empty());
        assert!(snapshot.error.is_some());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn stale_responses_are_discarded() {
        let source = Arc::new(GatedSource::new(vec![
            residence("annex", AgreementLength::TwelveMonth),
            residence("friel", AgreementLength::EightMonth),
        ]));
        let feed = ListingFeed::new(ListingService::new(source.clone()));

        let slow_feed = feed.clone();
        let slow = tokio::spawn(async move {
            slow_feed
                .apply(ListingFilter {
                    search: Some("annex".to_string()),
                    ..ListingFilter::default()
                })
                .await
        });
        source.wait_for_callers(1).await;

        let fresh_feed = feed.clone();
        let fresh = tokio::spawn(async move {
            fresh_feed
                .apply(ListingFilter {
                    search: Some("friel".to_string()),
                    ..ListingFilter::default()
                })
                .await
        });
        source.wait_for_callers(2).await;
        source.open();

        assert!(fresh.await.expect("task joins"));
        assert!(!slow.await.expect("task joins"), "superseded response applied");

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.applied, Some(RequestToken(2)));
        assert_eq!(snapshot.listings.len(), 1);
        assert_eq!(snapshot.listings[0].slug, "friel");
    }
}
