//! Route and distance queries from a listing to a chosen destination.

pub mod domain;
pub mod provider;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    point_of_interest, points_of_interest, Destination, DestinationError, PointOfInterest,
    ResolvedDestination, RouteRequest, RouteSummary, TravelMode,
};
pub use provider::{DirectionsProvider, GoogleDirectionsClient, ProviderError};
pub use router::{directions_router, DirectionsState, RouteQuery};
pub use service::{RouteError, RoutePlanner, ROUTE_FAILURE_MESSAGE};
