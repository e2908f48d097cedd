use serde::{Deserialize, Serialize};

use crate::listings::catalog::{CAMPUS_COORDINATES, CAMPUS_NAME};
use crate::listings::Coordinates;

/// Travel modes offered next to the route form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Transit,
    Walking,
    Cycling,
}

impl TravelMode {
    /// Value of the provider's `mode` parameter.
    pub fn provider_value(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "bicycling",
        }
    }
}

/// Curated destination shown in the point-of-interest picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub id: &'static str,
    pub name: &'static str,
    pub coordinates: Coordinates,
}

const POINTS_OF_INTEREST: &[PointOfInterest] = &[
    PointOfInterest {
        id: "campus",
        name: CAMPUS_NAME,
        coordinates: CAMPUS_COORDINATES,
    },
    PointOfInterest {
        id: "rideau-centre",
        name: "CF Rideau Centre",
        coordinates: Coordinates::new(45.4255, -75.6920),
    },
    PointOfInterest {
        id: "byward-market",
        name: "ByWard Market",
        coordinates: Coordinates::new(45.4289, -75.6920),
    },
    PointOfInterest {
        id: "parliament-hill",
        name: "Parliament Hill",
        coordinates: Coordinates::new(45.4236, -75.7009),
    },
    PointOfInterest {
        id: "train-station",
        name: "Ottawa Train Station",
        coordinates: Coordinates::new(45.4166, -75.6517),
    },
    PointOfInterest {
        id: "general-hospital",
        name: "The Ottawa Hospital, General Campus",
        coordinates: Coordinates::new(45.4015, -75.6497),
    },
];

pub fn points_of_interest() -> &'static [PointOfInterest] {
    POINTS_OF_INTEREST
}

pub fn point_of_interest(id: &str) -> Option<&'static PointOfInterest> {
    POINTS_OF_INTEREST.iter().find(|point| point.id == id)
}

/// Where the user wants to go from a listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    PointOfInterest { id: String },
    Coordinates { latitude: f64, longitude: f64 },
    Address { address: String },
}

/// Destination resolved into the provider's query form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDestination {
    pub label: String,
    pub query: String,
}

impl Destination {
    pub fn resolve(&self) -> Result<ResolvedDestination, DestinationError> {
        match self {
            Destination::PointOfInterest { id } => {
                let point =
                    point_of_interest(id).ok_or_else(|| DestinationError::UnknownPoint(id.clone()))?;
                Ok(ResolvedDestination {
                    label: point.name.to_string(),
                    query: point.coordinates.as_query_value(),
                })
            }
            Destination::Coordinates {
                latitude,
                longitude,
            } => {
                if !(-90.0..=90.0).contains(latitude) || !(-180.0..=180.0).contains(longitude) {
                    return Err(DestinationError::OutOfRange);
                }
                let query = Coordinates::new(*latitude, *longitude).as_query_value();
                Ok(ResolvedDestination {
                    label: query.clone(),
                    query,
                })
            }
            Destination::Address { address } => {
                let address = address.trim();
                if address.is_empty() {
                    return Err(DestinationError::EmptyAddress);
                }
                Ok(ResolvedDestination {
                    label: address.to_string(),
                    query: address.to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationError {
    #[error("unknown point of interest: {0}")]
    UnknownPoint(String),
    #[error("destination address is empty")]
    EmptyAddress,
    #[error("destination coordinates are out of range")]
    OutOfRange,
}

/// Provider request: fixed origin, resolved destination, travel mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub destination: String,
    pub mode: TravelMode,
}

/// Human-readable distance and duration plus an encoded path for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub distance: String,
    pub duration: String,
    pub polyline: String,
}
