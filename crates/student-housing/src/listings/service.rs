use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ResidenceId, ResidenceRecord, ResidenceStyle};
use super::filter::ListingFilter;
use super::pricing::{monthly_price, PriceLabel};
use super::source::{ListingSource, SourceError};

/// Result of one retrieval pass. A failed pass carries the error message and no records.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    pub listings: Vec<ResidenceRecord>,
    pub error: Option<String>,
}

impl Retrieval {
    fn failed(error: &ListingServiceError) -> Self {
        Self {
            listings: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Error raised by single-record lookups.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("listing '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Composes a listing source with the filter evaluator.
pub struct ListingService<S> {
    source: Arc<S>,
}

impl<S> Clone for ListingService<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<S> ListingService<S>
where
    S: ListingSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch the eligible set and narrow it with `filter`, surfacing source failures.
    pub async fn search(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<ResidenceRecord>, ListingServiceError> {
        let records = match self.source.fetch_available().await {
            Ok(records) => records,
            Err(err) => {
                warn!(source = self.source.source_name(), error = %err, "listing retrieval failed");
                return Err(err.into());
            }
        };
        let listings = filter.apply(&records);
        info!(
            source = self.source.source_name(),
            candidates = records.len(),
            matched = listings.len(),
            "listing retrieval complete"
        );
        Ok(listings)
    }

    /// Fetch the eligible set and narrow it with `filter`. Failures are not retried.
    pub async fn retrieve(&self, filter: &ListingFilter) -> Retrieval {
        match self.search(filter).await {
            Ok(listings) => Retrieval {
                listings,
                error: None,
            },
            Err(err) => Retrieval::failed(&err),
        }
    }

    /// Look up one listing by slug or id.
    pub async fn find(&self, key: &str) -> Result<ResidenceRecord, ListingServiceError> {
        self.source
            .fetch_available()
            .await?
            .into_iter()
            .find(|record| record.is_addressed_by(key))
            .ok_or_else(|| ListingServiceError::NotFound(key.to_string()))
    }

    /// Lowest priced listing, ignoring records without published fees.
    pub async fn cheapest(&self) -> Result<Option<ResidenceRecord>, ListingServiceError> {
        let records = self.source.fetch_available().await?;
        Ok(records
            .into_iter()
            .filter(|record| monthly_price(record) > 0)
            .min_by_key(monthly_price))
    }
}

/// Card-sized projection of a listing used in result lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSummaryView {
    pub id: ResidenceId,
    pub slug: String,
    pub name: String,
    pub residence_style: ResidenceStyle,
    pub agreement_length: &'static str,
    pub total_beds: u32,
    pub monthly_price: u32,
    pub price_label: PriceLabel,
    pub tags: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

impl From<&ResidenceRecord> for ListingSummaryView {
    fn from(record: &ResidenceRecord) -> Self {
        let price = monthly_price(record);
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            name: record.name.clone(),
            residence_style: record.residence_style,
            agreement_length: record.agreement_length.label(),
            total_beds: record.total_beds,
            monthly_price: price,
            price_label: PriceLabel(price),
            tags: record.features.tags(),
            hero_image: record.hero_image().map(str::to_string),
        }
    }
}

/// Full record plus derived pricing for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDetailView {
    #[serde(flatten)]
    pub record: ResidenceRecord,
    pub monthly_price: u32,
    pub price_label: PriceLabel,
    pub tags: Vec<&'static str>,
}

impl From<ResidenceRecord> for ListingDetailView {
    fn from(record: ResidenceRecord) -> Self {
        let price = monthly_price(&record);
        let tags = record.features.tags();
        Self {
            record,
            monthly_price: price,
            price_label: PriceLabel(price),
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::AgreementLength;
    use crate::listings::source::StaticCatalog;
    use crate::listings::tests::{residence, with_total, FailingSource};

    fn service() -> ListingService<StaticCatalog> {
        ListingService::new(Arc::new(StaticCatalog::campus()))
    }

    #[tokio::test]
    async fn retrieve_is_idempotent_for_unchanged_filter() {
        let service = service();
        let filter = ListingFilter {
            search: Some("suite".to_string()),
            ..ListingFilter::default()
        };

        let first = service.retrieve(&filter).await;
        let second = service.retrieve(&filter).await;
        assert!(first.is_ok());
        assert_eq!(first, second);
        assert!(!first.listings.is_empty());
    }

    #[tokio::test]
    async fn retrieve_reports_source_failures_as_empty_results() {
        let service = ListingService::new(Arc::new(FailingSource::default()));
        let outcome = service.retrieve(&ListingFilter::default()).await;

        assert!(outcome.listings.is_empty());
        let error = outcome.error.expect("error surfaced");
        assert!(error.contains("unreachable"));
    }

    #[tokio::test]
    async fn find_accepts_slug_or_id() {
        let service = service();
        assert_eq!(service.find("stanton").await.expect("found").name, "Stanton");
        assert_eq!(
            service.find("res_stanton").await.expect("found").slug,
            "stanton"
        );
        assert!(matches!(
            service.find("unknown").await,
            Err(ListingServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn cheapest_skips_unpriced_listings() {
        let mut unpriced = residence("unpriced", AgreementLength::TwelveMonth);
        unpriced.fees_by_year.clear();
        let catalog = StaticCatalog::new(vec![
            with_total(residence("pricey", AgreementLength::EightMonth), 16_000),
            unpriced,
            with_total(residence("budget", AgreementLength::TwelveMonth), 12_000),
        ]);
        let service = ListingService::new(Arc::new(catalog));

        let cheapest = service.cheapest().await.expect("lookup succeeds");
        assert_eq!(cheapest.map(|record| record.slug), Some("budget".to_string()));
    }

    #[test]
    fn summary_view_uses_placeholder_for_missing_fees() {
        let mut record = residence("unpriced", AgreementLength::TwelveMonth);
        record.fees_by_year.clear();
        let view = ListingSummaryView::from(&record);
        assert_eq!(view.monthly_price, 0);
        assert_eq!(view.price_label.to_string(), "Price unavailable");
    }
}
