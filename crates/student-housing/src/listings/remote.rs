use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::domain::ResidenceRecord;
use super::source::{CollectionQuery, ListingCollection, SourceError};

/// Document-store collection reached over its JSON REST interface.
///
/// Issues `GET {base}/collections/{name}/documents?where={field}:eq:{value}&order_by=..&direction=..`
/// and expects `{ "documents": [...] }` back.
#[derive(Debug, Clone)]
pub struct HttpDocumentCollection {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DocumentPage {
    documents: Vec<ResidenceRecord>,
}

impl HttpDocumentCollection {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn documents_url(&self, query: &CollectionQuery) -> String {
        format!(
            "{}/collections/{}/documents",
            self.base_url, query.collection
        )
    }
}

#[async_trait]
impl ListingCollection for HttpDocumentCollection {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<ResidenceRecord>, SourceError> {
        let url = self.documents_url(query);
        let predicate = format!("{}:eq:{}", query.field, query.equals);
        debug!(%url, %predicate, order_by = %query.order_by, "querying document collection");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("where", predicate.as_str()),
                ("order_by", query.order_by.as_str()),
                ("direction", query.direction.as_str()),
            ])
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Query(format!(
                "document store answered {status}"
            )));
        }

        let page: DocumentPage = response
            .json()
            .await
            .map_err(|err| SourceError::Decode(err.to_string()))?;
        Ok(page.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_url_trims_trailing_slash() {
        let collection = HttpDocumentCollection::new("http://store.local/v1/");
        assert_eq!(
            collection.documents_url(&CollectionQuery::available_listings()),
            "http://store.local/v1/collections/listings/documents"
        );
    }

    #[tokio::test]
    async fn unreachable_store_is_a_transport_error() {
        let collection = HttpDocumentCollection::new("http://127.0.0.1:9");
        let result = collection
            .query(&CollectionQuery::available_listings())
            .await;
        assert!(matches!(result, Err(SourceError::Transport(_))));
    }
}
