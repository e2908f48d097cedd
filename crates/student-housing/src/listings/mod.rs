//! Residence listings: domain records, price normalization, filtering and retrieval.

pub mod catalog;
pub mod domain;
pub mod feed;
pub mod filter;
pub mod pricing;
pub mod remote;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{
    AgreementLength, Amenities, Coordinates, FeatureChecklist, FeeSchedule, FeeTier, Furniture,
    ResidenceId, ResidenceRecord, ResidenceStyle,
};
pub use feed::{FeedSnapshot, ListingFeed, RequestToken};
pub use filter::ListingFilter;
pub use pricing::{monthly_price, PriceLabel};
pub use remote::HttpDocumentCollection;
pub use router::listing_router;
pub use service::{
    ListingDetailView, ListingService, ListingServiceError, ListingSummaryView, Retrieval,
};
pub use source::{
    CollectionQuery, ListingCollection, ListingSource, RemoteListingSource, SortDirection,
    SourceError, StaticCatalog,
};
