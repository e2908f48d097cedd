use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::listings::domain::{
    AgreementLength, Amenities, Coordinates, FeatureChecklist, FeeSchedule, FeeTier, Furniture,
    ResidenceId, ResidenceRecord, ResidenceStyle,
};
use crate::listings::source::{CollectionQuery, ListingCollection, ListingSource, SourceError};

pub(crate) fn residence(slug: &str, agreement_length: AgreementLength) -> ResidenceRecord {
    let created_at = Utc
        .with_ymd_and_hms(2026, 2, 6, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    ResidenceRecord {
        id: ResidenceId(format!("res_{slug}")),
        slug: slug.to_string(),
        name: slug.to_string(),
        description: format!("{slug} residence"),
        residence_style: ResidenceStyle::Apartment,
        agreement_length,
        total_beds: 100,
        bedrooms: None,
        location_description: "Downtown campus".to_string(),
        coordinates: Coordinates::new(45.4231, -75.6831),
        features: FeatureChecklist::default(),
        furniture: Furniture::default(),
        notes: None,
        fees_by_year: vec![FeeSchedule {
            year: "2026-2027".to_string(),
            fees: vec![FeeTier {
                room_type: "Single".to_string(),
                room_cost: None,
                meal_plan_cost: None,
                total_cost: 12_000,
            }],
        }],
        amenities: Amenities::default(),
        virtual_tour_url: None,
        image_urls: vec![format!("/images/{slug}/hero.jpg")],
        available: true,
        created_at,
        updated_at: created_at,
    }
}

pub(crate) fn with_total(mut record: ResidenceRecord, total_cost: u32) -> ResidenceRecord {
    for schedule in &mut record.fees_by_year {
        for fee in &mut schedule.fees {
            fee.total_cost = total_cost;
        }
    }
    record
}

/// Source whose store is never reachable.
#[derive(Default)]
pub(crate) struct FailingSource;

#[async_trait]
impl ListingSource for FailingSource {
    async fn fetch_available(&self) -> Result<Vec<ResidenceRecord>, SourceError> {
        Err(SourceError::Transport("connection refused".to_string()))
    }

    fn source_name(&self) -> &'static str {
        "failing"
    }
}

/// Source that holds every caller until `open` is called.
pub(crate) struct GatedSource {
    records: Vec<ResidenceRecord>,
    gate: Semaphore,
    callers: AtomicUsize,
}

impl GatedSource {
    pub(crate) fn new(records: Vec<ResidenceRecord>) -> Self {
        Self {
            records,
            gate: Semaphore::new(0),
            callers: AtomicUsize::new(0),
        }
    }

    pub(crate) fn open(&self) {
        self.gate.add_permits(1024);
    }

    pub(crate) async fn wait_for_callers(&self, expected: usize) {
        while self.callers.load(Ordering::SeqCst) < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl ListingSource for GatedSource {
    async fn fetch_available(&self) -> Result<Vec<ResidenceRecord>, SourceError> {
        self.callers.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &'static str {
        "gated"
    }
}

/// Collection double that records the queries it receives.
#[derive(Clone, Default)]
pub(crate) struct RecordingCollection {
    records: Arc<Vec<ResidenceRecord>>,
    queries: Arc<Mutex<Vec<CollectionQuery>>>,
}

impl RecordingCollection {
    pub(crate) fn with_records(records: Vec<ResidenceRecord>) -> Self {
        Self {
            records: Arc::new(records),
            queries: Arc::default(),
        }
    }

    pub(crate) fn queries(&self) -> Vec<CollectionQuery> {
        self.queries.lock().expect("query log poisoned").clone()
    }
}

#[async_trait]
impl ListingCollection for RecordingCollection {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<ResidenceRecord>, SourceError> {
        self.queries
            .lock()
            .expect("query log poisoned")
            .push(query.clone());
        Ok(self.records.as_ref().clone())
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
