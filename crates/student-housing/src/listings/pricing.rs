use std::fmt;

use serde::Serialize;

use super::domain::{FeeSchedule, ResidenceRecord};

/// Pick the schedule for the most recent academic year.
///
/// Schedules are ranked by the starting year parsed from their label. Labels that do not
/// parse rank below every dated schedule, and ties keep their position in the list, so a
/// feed without usable year labels falls back to its first entry.
pub fn current_schedule(schedules: &[FeeSchedule]) -> Option<&FeeSchedule> {
    schedules
        .iter()
        .enumerate()
        .max_by(|(left_index, left), (right_index, right)| {
            left.starting_year()
                .cmp(&right.starting_year())
                .then(right_index.cmp(left_index))
        })
        .map(|(_, schedule)| schedule)
}

/// Single comparable monthly figure for a residence, or 0 when no fees are published.
pub fn monthly_price(record: &ResidenceRecord) -> u32 {
    let Some(schedule) = current_schedule(&record.fees_by_year) else {
        return 0;
    };
    let Some(cheapest) = schedule.fees.iter().map(|fee| fee.total_cost).min() else {
        return 0;
    };

    divide_rounded(cheapest, record.agreement_length.months())
}

fn divide_rounded(total: u32, months: u32) -> u32 {
    let total = u64::from(total);
    let months = u64::from(months);
    ((total + months / 2) / months) as u32
}

/// Display form of a normalized price; zero is never shown as free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLabel(pub u32);

impl fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "Price unavailable"),
            amount => write!(f, "${amount}/mo"),
        }
    }
}

impl Serialize for PriceLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
