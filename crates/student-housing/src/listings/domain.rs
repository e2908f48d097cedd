use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for residence records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResidenceId(pub String);

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `lat,lng` form accepted by mapping providers.
    pub fn as_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Categorical tag used as a filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidenceStyle {
    Traditional,
    TraditionalPlus,
    Suite,
    Studio,
    Apartment,
    Room,
    House,
}

impl ResidenceStyle {
    pub fn label(&self) -> &'static str {
        match self {
            ResidenceStyle::Traditional => "traditional",
            ResidenceStyle::TraditionalPlus => "traditional-plus",
            ResidenceStyle::Suite => "suite",
            ResidenceStyle::Studio => "studio",
            ResidenceStyle::Apartment => "apartment",
            ResidenceStyle::Room => "room",
            ResidenceStyle::House => "house",
        }
    }
}

impl FromStr for ResidenceStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let style = match value.trim().to_ascii_lowercase().as_str() {
            "traditional" => ResidenceStyle::Traditional,
            "traditional-plus" => ResidenceStyle::TraditionalPlus,
            "suite" => ResidenceStyle::Suite,
            "studio" => ResidenceStyle::Studio,
            "apartment" => ResidenceStyle::Apartment,
            "room" => ResidenceStyle::Room,
            "house" => ResidenceStyle::House,
            other => return Err(format!("unknown residence style '{other}'")),
        };
        Ok(style)
    }
}

/// Length of the housing agreement, which drives the monthly price divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgreementLength {
    #[serde(rename = "8-month")]
    EightMonth,
    #[serde(rename = "12-month")]
    TwelveMonth,
}

impl AgreementLength {
    pub fn months(&self) -> u32 {
        match self {
            AgreementLength::EightMonth => 8,
            AgreementLength::TwelveMonth => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgreementLength::EightMonth => "8-month",
            AgreementLength::TwelveMonth => "12-month",
        }
    }
}

/// One room type and its annual cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan_cost: Option<u32>,
    pub total_cost: u32,
}

/// Fee tiers published for one academic year, e.g. `2026-2027`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub year: String,
    pub fees: Vec<FeeTier>,
}

impl FeeSchedule {
    /// Leading year of the label (`2026` for `2026-2027`).
    pub fn starting_year(&self) -> Option<i32> {
        let head = self.year.trim().split(['-', '/']).next()?;
        head.trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureChecklist {
    pub studio_or_single_room: bool,
    pub private_bathroom: bool,
    pub shared_in_unit_bathrooms: bool,
    pub common_kitchen: bool,
    pub in_unit_kitchen_dining: bool,
    pub shared_common_spaces: bool,
    #[serde(default)]
    pub games_room: bool,
    #[serde(default)]
    pub fitness_room: bool,
    pub tv_in_bedroom: bool,
    pub tv_in_common_room: bool,
    pub mini_fridge_space: bool,
    pub kitchen_appliances: bool,
    pub in_unit_temperature_control: bool,
}

impl FeatureChecklist {
    /// Short tags shown on listing cards.
    pub fn tags(&self) -> Vec<&'static str> {
        [
            (self.private_bathroom, "Private Bath"),
            (self.in_unit_kitchen_dining, "Kitchen"),
            (self.in_unit_temperature_control, "AC"),
            (self.fitness_room, "Fitness"),
            (self.games_room, "Games Room"),
            (self.tv_in_common_room, "TV Lounge"),
        ]
        .into_iter()
        .filter_map(|(present, tag)| present.then_some(tag))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BedSize {
    #[default]
    Single,
    Double,
    Queen,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Furniture {
    pub bed_size: BedSize,
    pub bedding_included: bool,
    pub nightstand: bool,
    pub desk: bool,
    pub chair: bool,
    pub closet: bool,
    #[serde(default)]
    pub open_closet: bool,
    #[serde(default)]
    pub dresser_or_wardrobe: bool,
    #[serde(default)]
    pub armoire_with_drawers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaundryInfo {
    pub description: String,
    #[serde(default)]
    pub required_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_issue_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WasteInfo {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub bin_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Amenities {
    pub kitchen: String,
    pub laundry: LaundryInfo,
    pub garbage_and_recycling: WasteInfo,
}

/// A browsable housing record. Never mutated by the search flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidenceRecord {
    pub id: ResidenceId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub residence_style: ResidenceStyle,
    pub agreement_length: AgreementLength,
    pub total_beds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u8>,
    pub location_description: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub features: FeatureChecklist,
    #[serde(default)]
    pub furniture: Furniture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub fees_by_year: Vec<FeeSchedule>,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_tour_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_available() -> bool {
    true
}

impl ResidenceRecord {
    pub fn hero_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Matches either the URL slug or the record id.
    pub fn is_addressed_by(&self, key: &str) -> bool {
        self.slug == key || self.id.0 == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_year_reads_leading_component() {
        let schedule = |year: &str| FeeSchedule {
            year: year.to_string(),
            fees: Vec::new(),
        };
        assert_eq!(schedule("2026-2027").starting_year(), Some(2026));
        assert_eq!(schedule(" 2025 ").starting_year(), Some(2025));
        assert_eq!(schedule("2024/25").starting_year(), Some(2024));
        assert_eq!(schedule("current").starting_year(), None);
    }

    #[test]
    fn feature_tags_follow_checklist() {
        let features = FeatureChecklist {
            private_bathroom: true,
            in_unit_temperature_control: true,
            games_room: true,
            ..FeatureChecklist::default()
        };
        assert_eq!(features.tags(), vec!["Private Bath", "AC", "Games Room"]);
    }

    #[test]
    fn agreement_length_uses_wire_labels() {
        let parsed: AgreementLength = serde_json::from_str("\"8-month\"").expect("parses");
        assert_eq!(parsed, AgreementLength::EightMonth);
        assert_eq!(parsed.months(), 8);
        let style: ResidenceStyle = serde_json::from_str("\"traditional-plus\"").expect("parses");
        assert_eq!(style.label(), "traditional-plus");
    }
}
