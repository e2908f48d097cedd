use serde::{Deserialize, Serialize};

use super::domain::{ResidenceRecord, ResidenceStyle};
use super::pricing::monthly_price;

/// User-chosen narrowing criteria. Every field is optional and an empty filter matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ResidenceStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<u8>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.style.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// Inclusion decision for one record; all active predicates must hold.
    pub fn matches(&self, record: &ResidenceRecord) -> bool {
        self.matches_search(record)
            && self.matches_style(record)
            && self.matches_price(record)
            && self.matches_bedrooms(record)
    }

    /// Apply the filter across a candidate set, preserving order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<ResidenceRecord>
    where
        I: IntoIterator<Item = &'a ResidenceRecord>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    fn matches_search(&self, record: &ResidenceRecord) -> bool {
        let Some(term) = self.search_term() else {
            return true;
        };

        [
            record.name.as_str(),
            record.description.as_str(),
            record.residence_style.label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_style(&self, record: &ResidenceRecord) -> bool {
        self.style
            .map_or(true, |style| record.residence_style == style)
    }

    fn matches_price(&self, record: &ResidenceRecord) -> bool {
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }

        let price = monthly_price(record);
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }

    fn matches_bedrooms(&self, record: &ResidenceRecord) -> bool {
        self.min_bedrooms
            .map_or(true, |min| record.bedrooms.unwrap_or(0) >= min)
    }
}
