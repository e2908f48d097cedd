//! Seed catalog of on-campus residences served by the static listing source.

use chrono::{DateTime, NaiveDate, Utc};

use super::domain::{
    AgreementLength, Amenities, BedSize, Coordinates, FeatureChecklist, FeeSchedule, FeeTier,
    Furniture, LaundryInfo, ResidenceId, ResidenceRecord, ResidenceStyle, WasteInfo,
};

/// Main campus marker, used as the default point of interest for routes.
pub const CAMPUS_NAME: &str = "University of Ottawa";
pub const CAMPUS_ADDRESS: &str = "75 Laurier Ave E, Ottawa, ON";
pub const CAMPUS_COORDINATES: Coordinates = Coordinates::new(45.4231, -75.6831);

const RECYCLING_CONTACT: &str = "prs-recy@uOttawa.ca";

fn seeded_on() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 2, 6)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn flat_fees(year: &str, tiers: &[(&str, u32)]) -> FeeSchedule {
    FeeSchedule {
        year: year.to_string(),
        fees: tiers
            .iter()
            .map(|(room_type, total_cost)| FeeTier {
                room_type: room_type.to_string(),
                room_cost: None,
                meal_plan_cost: None,
                total_cost: *total_cost,
            })
            .collect(),
    }
}

fn meal_plan_fees(year: &str, tiers: &[(&str, u32, u32)]) -> FeeSchedule {
    FeeSchedule {
        year: year.to_string(),
        fees: tiers
            .iter()
            .map(|(room_type, room_cost, meal_plan_cost)| FeeTier {
                room_type: room_type.to_string(),
                room_cost: Some(*room_cost),
                meal_plan_cost: Some(*meal_plan_cost),
                total_cost: room_cost + meal_plan_cost,
            })
            .collect(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn laundry(description: &str, required_items: &[&str], notes: &str) -> LaundryInfo {
    LaundryInfo {
        description: description.to_string(),
        required_items: strings(required_items),
        notes: Some(notes.to_string()),
        report_issue_url: None,
    }
}

fn waste(description: &str, bin_locations: &[&str]) -> WasteInfo {
    WasteInfo {
        description: description.to_string(),
        contact_email: Some(RECYCLING_CONTACT.to_string()),
        bin_locations: strings(bin_locations),
    }
}

struct Seed {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    style: ResidenceStyle,
    agreement: AgreementLength,
    total_beds: u32,
    location: &'static str,
    notes: &'static str,
    image: &'static str,
}

impl Seed {
    fn build(
        self,
        features: FeatureChecklist,
        furniture: Furniture,
        fees_by_year: Vec<FeeSchedule>,
        amenities: Amenities,
    ) -> ResidenceRecord {
        let id = format!("res_{}", self.slug.replace('-', "_"));
        ResidenceRecord {
            id: ResidenceId(id),
            slug: self.slug.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            residence_style: self.style,
            agreement_length: self.agreement,
            total_beds: self.total_beds,
            bedrooms: None,
            location_description: self.location.to_string(),
            coordinates: CAMPUS_COORDINATES,
            features,
            furniture,
            notes: Some(self.notes.to_string()),
            fees_by_year,
            amenities,
            virtual_tour_url: None,
            image_urls: vec![self.image.to_string()],
            available: true,
            created_at: seeded_on(),
            updated_at: seeded_on(),
        }
    }
}

/// All seed residences in display order. Fee schedules are listed newest year first.
pub fn campus_residences() -> Vec<ResidenceRecord> {
    vec![annex(), hyman_soloway(), mann_45(), university_90(), friel(), stanton()]
}

fn annex() -> ResidenceRecord {
    Seed {
        slug: "annex",
        name: "Annex",
        description: "Annex is one of three apartment-style residences, ideal for students seeking a more independent lifestyle.",
        style: ResidenceStyle::Apartment,
        agreement: AgreementLength::TwelveMonth,
        total_beds: 518,
        location: "Located at the north end of the downtown campus. Multi-bedroom coed units with kitchens, dining rooms and living rooms.",
        notes: "28 residents share bedrooms and bathrooms; all others have a single room and private bathroom.",
        image: "/images/annex/hero.jpg",
    }
    .build(
        FeatureChecklist {
            studio_or_single_room: true,
            private_bathroom: true,
            in_unit_kitchen_dining: true,
            shared_common_spaces: true,
            tv_in_common_room: true,
            mini_fridge_space: true,
            kitchen_appliances: true,
            in_unit_temperature_control: true,
            ..FeatureChecklist::default()
        },
        Furniture {
            bed_size: BedSize::Double,
            nightstand: true,
            desk: true,
            chair: true,
            closet: true,
            ..Furniture::default()
        },
        vec![
            flat_fees(
                "2026-2027",
                &[
                    ("Premium Studio", 27_304),
                    ("Studio", 26_860),
                    ("Room in a 2-bedroom apartment", 20_464),
                    ("Room in a 3-bedroom apartment", 18_148),
                    ("Room in a 4-bedroom apartment", 17_068),
                    ("Room in a 5-bedroom apartment", 15_940),
                ],
            ),
            flat_fees(
                "2025-2026",
                &[
                    ("Premium Studio", 25_758),
                    ("Studio", 25_345),
                    ("Room in a 2-bedroom apartment", 19_345),
                    ("Room in a 3-bedroom apartment", 17_131),
                    ("Room in a 4-bedroom apartment", 16_092),
                    ("Room in a 5-bedroom apartment", 15_032),
                ],
            ),
        ],
        Amenities {
            kitchen: "In-unit kitchen and dining area with sink, refrigerator, stove, microwave, and dishwasher.".to_string(),
            laundry: laundry(
                "Free washer and dryer in each unit.",
                &["Detergent", "Dryer sheets"],
                "Clean the dryer lint filter after each use.",
            ),
            garbage_and_recycling: waste(
                "Garbage chutes are next to elevators on each floor. Recycling and compost bins are nearby in specific rooms.",
                &["Room 116", "Room 231", "Room 324", "Room 428", "Rooms ending in -21 (floors 5-8)"],
            ),
        },
    )
}

fn hyman_soloway() -> ResidenceRecord {
    Seed {
        slug: "hyman-soloway",
        name: "Hyman Soloway",
        description: "Hyman Soloway is an apartment-style residence offering independent living for students planning to stay on campus.",
        style: ResidenceStyle::Apartment,
        agreement: AgreementLength::TwelveMonth,
        total_beds: 239,
        location: "Multi-bedroom coed apartments with shared in-unit bathrooms and in-unit kitchen/dining.",
        notes: "No TV in unit common room (TV available in the ground-floor common room). Kitchen appliances include fridge, stove and microwave (no dishwasher).",
        image: "/images/hyman/hero.jpg",
    }
    .build(
        FeatureChecklist {
            studio_or_single_room: true,
            shared_in_unit_bathrooms: true,
            in_unit_kitchen_dining: true,
            shared_common_spaces: true,
            mini_fridge_space: true,
            kitchen_appliances: true,
            in_unit_temperature_control: true,
            ..FeatureChecklist::default()
        },
        Furniture {
            bed_size: BedSize::Double,
            desk: true,
            chair: true,
            closet: true,
            ..Furniture::default()
        },
        vec![
            flat_fees(
                "2026-2027",
                &[
                    ("Room in a 2-bedroom apartment", 18_757),
                    ("Room in a 3-bedroom apartment", 16_501),
                    ("Room in a 4-bedroom apartment", 15_601),
                ],
            ),
            flat_fees(
                "2025-2026",
                &[
                    ("Room in a 2-bedroom apartment", 17_701),
                    ("Room in a 3-bedroom apartment", 15_578),
                    ("Room in a 4-bedroom apartment", 14_726),
                ],
            ),
        ],
        Amenities {
            kitchen: "In-unit, open concept kitchen and dining area with sink, refrigerator, full-size range and microwave.".to_string(),
            laundry: laundry(
                "Free laundry room located on the ground floor.",
                &["Detergent", "Dryer sheets", "uOttawa Card"],
                "Laundry instructions are posted in each laundry room.",
            ),
            garbage_and_recycling: waste(
                "Garbage, recycling, and compost bins are located in the basement in room 009.",
                &["Basement, Room 009"],
            ),
        },
    )
}

fn mann_45() -> ResidenceRecord {
    Seed {
        slug: "45-mann",
        name: "45 Mann",
        description: "45 Mann is an apartment-style residence reserved for students in second year and up, designed for independent living with strong community spaces.",
        style: ResidenceStyle::Apartment,
        agreement: AgreementLength::TwelveMonth,
        total_beds: 385,
        location: "Coed multi-bedroom apartments with in-unit kitchen/dining, living room, games room and fitness room.",
        notes: "Reserved for students in second year and up.",
        image: "/images/45-mann/hero.jpg",
    }
    .build(
        FeatureChecklist {
            studio_or_single_room: true,
            private_bathroom: true,
            in_unit_kitchen_dining: true,
            shared_common_spaces: true,
            games_room: true,
            fitness_room: true,
            tv_in_common_room: true,
            mini_fridge_space: true,
            kitchen_appliances: true,
            in_unit_temperature_control: true,
            ..FeatureChecklist::default()
        },
        Furniture {
            bed_size: BedSize::Double,
            nightstand: true,
            desk: true,
            chair: true,
            closet: true,
            dresser_or_wardrobe: true,
            ..Furniture::default()
        },
        vec![
            flat_fees(
                "2026-2027",
                &[
                    ("1-bedroom apartment", 26_308),
                    ("Room in a 2-bedroom apartment", 19_804),
                    ("Room in a 3-bedroom apartment", 17_524),
                    ("Room in a 4-bedroom apartment", 16_600),
                ],
            ),
            flat_fees(
                "2025-2026",
                &[
                    ("1-bedroom apartment", 24_816),
                    ("Room in a 2-bedroom apartment", 18_684),
                    ("Room in a 3-bedroom apartment", 16_531),
                    ("Room in a 4-bedroom apartment", 15_667),
                ],
            ),
        ],
        Amenities {
            kitchen: "In-unit open-concept kitchen and dining area with sink, refrigerator, stove and dishwasher.".to_string(),
            laundry: laundry(
                "Laundry facilities are available to residents (free).",
                &["Detergent", "Dryer sheets", "uOttawa Card"],
                "Laundry instructions are posted in the laundry areas.",
            ),
            garbage_and_recycling: waste(
                "Garbage, recycling, and compost services are available within the residence.",
                &["Designated waste areas within the building"],
            ),
        },
    )
}

fn university_90() -> ResidenceRecord {
    Seed {
        slug: "90-university",
        name: "90 University (90U)",
        description: "90 University (\"90U\") is a suite-style residence with two-bedroom non-coed suites, combining community and privacy.",
        style: ResidenceStyle::Suite,
        agreement: AgreementLength::EightMonth,
        total_beds: 652,
        location: "Two-bedroom non-coed suites with kitchenette and a bathroom shared with your roommate. Shared common spaces on all floors.",
        notes: "12 rooms on the 20th floor are Traditional Plus with a shared bedroom (single bed) and no in-unit kitchenette.",
        image: "/images/90u/hero.jpg",
    }
    .build(
        FeatureChecklist {
            studio_or_single_room: true,
            shared_in_unit_bathrooms: true,
            common_kitchen: true,
            in_unit_kitchen_dining: true,
            shared_common_spaces: true,
            tv_in_bedroom: true,
            tv_in_common_room: true,
            mini_fridge_space: true,
            kitchen_appliances: true,
            in_unit_temperature_control: true,
            ..FeatureChecklist::default()
        },
        Furniture {
            bed_size: BedSize::Double,
            desk: true,
            chair: true,
            closet: true,
            open_closet: true,
            dresser_or_wardrobe: true,
            ..Furniture::default()
        },
        vec![
            meal_plan_fees(
                "2026-2027",
                &[
                    ("Suite with 2 single occupancy bedrooms", 15_448, 7_125),
                    ("Double occupancy room (20th floor)", 13_590, 7_125),
                ],
            ),
            meal_plan_fees(
                "2025-2026",
                &[
                    ("Suite with 2 single occupancy bedrooms", 13_677, 6_825),
                    ("Double occupancy room (20th floor)", 12_033, 6_825),
                ],
            ),
        ],
        Amenities {
            kitchen: "Each suite has a kitchenette with microwave, full-size fridge, table and two chairs. A large common kitchen on the ground floor has full-size ranges and microwave ovens.".to_string(),
            laundry: laundry(
                "Free laundry room on the ground floor.",
                &["Detergent", "Dryer sheets", "uOttawa Card"],
                "Laundry instructions are posted in each laundry room.",
            ),
            garbage_and_recycling: waste(
                "Garbage and recycling bins are across from the -03 unit on floors 2-20. Compost is in the first-floor kitchen and in the Complex lobby.",
                &[
                    "Floors 2-20: across from the -03 unit",
                    "Floor 1: hallway to units 124-134 (past elevator)",
                    "Compost: first-floor kitchen (across from high-rise elevators)",
                    "Compost: Complex lobby near 90U low-rise entrance",
                ],
            ),
        },
    )
}

fn friel() -> ResidenceRecord {
    Seed {
        slug: "friel",
        name: "Friel",
        description: "Friel is a suite and studio style residence with 380 beds, designed for students who want both privacy and community.",
        style: ResidenceStyle::Suite,
        agreement: AgreementLength::EightMonth,
        total_beds: 380,
        location: "Single, double and quadruple occupancy units with living space. All units except the 3rd floor have a kitchenette. Community kitchen on the 3rd floor.",
        notes: "Variety of studios and 1- or 2-bedroom suites with single, double, or quadruple occupancy. Units on the 3rd floor do not have a kitchenette.",
        image: "/images/friel/hero.jpg",
    }
    .build(
        FeatureChecklist {
            studio_or_single_room: true,
            shared_in_unit_bathrooms: true,
            common_kitchen: true,
            in_unit_kitchen_dining: true,
            shared_common_spaces: true,
            tv_in_common_room: true,
            mini_fridge_space: true,
            kitchen_appliances: true,
            in_unit_temperature_control: true,
            ..FeatureChecklist::default()
        },
        Furniture {
            bed_size: BedSize::Single,
            desk: true,
            chair: true,
            closet: true,
            dresser_or_wardrobe: true,
            ..Furniture::default()
        },
        vec![
            flat_fees(
                "2026-2027",
                &[
                    ("Suite with two double occupancy bedrooms", 10_043),
                    ("Double occupancy suite", 11_468),
                    ("Suite with two single occupancy bedrooms", 13_348),
                    ("Suite with one single occupancy bedroom", 14_345),
                    ("Double occupancy studio", 11_367),
                    ("Single occupancy studio", 13_968),
                    ("Double occupancy studio without kitchenette", 10_814),
                    ("Single occupancy studio without kitchenette", 12_877),
                ],
            ),
            flat_fees(
                "2025-2026",
                &[
                    ("Suite with two double occupancy bedrooms", 9_233),
                    ("Double occupancy suite", 10_543),
                    ("Suite with two single occupancy bedrooms", 12_097),
                    ("Suite with one single occupancy bedroom", 13_000),
                    ("Double occupancy studio", 10_450),
                    ("Single occupancy studio", 12_658),
                    ("Double occupancy studio without kitchenette", 9_942),
                    ("Single occupancy studio without kitchenette", 11_671),
                ],
            ),
        ],
        Amenities {
            kitchen: "Kitchenette (where applicable) with sink, mini-fridge and microwave. Large ground-floor kitchen with full-size range and microwave ovens.".to_string(),
            laundry: laundry(
                "Free laundry room on every floor.",
                &["Detergent", "Dryer sheets"],
                "Laundry instructions are posted in each laundry room.",
            ),
            garbage_and_recycling: waste(
                "Garbage, recycling and compost bins are on the 3rd floor (room 336) and on the 8th floor beside stairwell C.",
                &["3rd floor, Room 336", "8th floor, beside stairwell C"],
            ),
        },
    )
}

fn stanton() -> ResidenceRecord {
    Seed {
        slug: "stanton",
        name: "Stanton",
        description: "Stanton is a traditional-style residence known for a social environment. Students have a single room or share with one roommate, and share bathrooms with floormates.",
        style: ResidenceStyle::Traditional,
        agreement: AgreementLength::EightMonth,
        total_beds: 357,
        location: "Part of the main residential complex. Every floor has common spaces and a kitchenette.",
        notes: "Single bedroom or shared bedroom with one roommate. Shared bathroom with floormates.",
        image: "/images/stanton/hero.jpg",
    }
    .build(
        FeatureChecklist {
            studio_or_single_room: true,
            shared_in_unit_bathrooms: true,
            common_kitchen: true,
            shared_common_spaces: true,
            tv_in_common_room: true,
            mini_fridge_space: true,
            ..FeatureChecklist::default()
        },
        Furniture {
            bed_size: BedSize::Single,
            desk: true,
            chair: true,
            armoire_with_drawers: true,
            ..Furniture::default()
        },
        vec![
            meal_plan_fees(
                "2026-2027",
                &[("Double", 9_278, 7_125), ("Single", 11_608, 7_125)],
            ),
            meal_plan_fees(
                "2025-2026",
                &[("Double", 8_528, 6_825), ("Single", 10_623, 6_825)],
            ),
        ],
        Amenities {
            kitchen: "Common kitchen with sink and cooktop, a refrigerator and microwave ovens, plus a separate seating area.".to_string(),
            laundry: laundry(
                "Free laundry room on the ground floor.",
                &["Detergent", "Dryer sheets", "uOttawa Card"],
                "Laundry instructions are posted in each laundry room.",
            ),
            garbage_and_recycling: waste(
                "Garbage and recycling bins are on all floors in front of the elevator. Compost is located in the Complex lobby near the 90U low-rise entrance.",
                &[
                    "All floors: in front of the elevator",
                    "Compost: Complex lobby near 90U low-rise entrance",
                ],
            ),
        },
    )
}
