use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::catalog::campus_residences;
use super::domain::ResidenceRecord;

/// Where browsable records come from. Implementations return only available records.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_available(&self) -> Result<Vec<ResidenceRecord>, SourceError>;

    fn source_name(&self) -> &'static str;
}

/// Retrieval failure reported by a listing source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("listing store unreachable: {0}")]
    Transport(String),
    #[error("listing query failed: {0}")]
    Query(String),
    #[error("listing payload could not be decoded: {0}")]
    Decode(String),
}

/// Synchronous selection from the in-memory seed catalog. Never fails.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    records: Vec<ResidenceRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<ResidenceRecord>) -> Self {
        Self { records }
    }

    pub fn campus() -> Self {
        Self::new(campus_residences())
    }

    pub fn records(&self) -> &[ResidenceRecord] {
        &self.records
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::campus()
    }
}

#[async_trait]
impl ListingSource for StaticCatalog {
    async fn fetch_available(&self) -> Result<Vec<ResidenceRecord>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.available)
            .cloned()
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "static-catalog"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Server-side portion of a listing query: one boolean equality plus an ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionQuery {
    pub collection: String,
    pub field: String,
    pub equals: bool,
    pub order_by: String,
    pub direction: SortDirection,
}

impl CollectionQuery {
    /// `listings` where `available == true`, newest first.
    pub fn available_listings() -> Self {
        Self {
            collection: "listings".to_string(),
            field: "available".to_string(),
            equals: true,
            order_by: "created_at".to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Storage abstraction for a persisted document collection.
#[async_trait]
pub trait ListingCollection: Send + Sync {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<ResidenceRecord>, SourceError>;
}

/// Asynchronous retrieval from a remote collection scoped to available records.
pub struct RemoteListingSource<C> {
    collection: C,
}

impl<C> RemoteListingSource<C>
where
    C: ListingCollection,
{
    pub fn new(collection: C) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl<C> ListingSource for RemoteListingSource<C>
where
    C: ListingCollection,
{
    async fn fetch_available(&self) -> Result<Vec<ResidenceRecord>, SourceError> {
        self.collection
            .query(&CollectionQuery::available_listings())
            .await
    }

    fn source_name(&self) -> &'static str {
        "remote-collection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::AgreementLength;
    use crate::listings::tests::{residence, RecordingCollection};

    #[tokio::test]
    async fn static_catalog_skips_unavailable_records() {
        let mut hidden = residence("hidden", AgreementLength::EightMonth);
        hidden.available = false;
        let catalog = StaticCatalog::new(vec![
            residence("annex", AgreementLength::TwelveMonth),
            hidden,
        ]);

        let records = catalog.fetch_available().await.expect("static never fails");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug, "annex");
    }

    #[tokio::test]
    async fn remote_source_requests_available_newest_first() {
        let collection = RecordingCollection::with_records(vec![residence(
            "annex",
            AgreementLength::TwelveMonth,
        )]);
        let source = RemoteListingSource::new(collection.clone());

        let records = source.fetch_available().await.expect("query succeeds");
        assert_eq!(records.len(), 1);

        let queries = collection.queries();
        assert_eq!(queries, vec![CollectionQuery::available_listings()]);
        assert_eq!(queries[0].direction.as_str(), "desc");
    }
}
