use serde::{Deserialize, Serialize};

use crate::record::Record;

/// The active filter: one optional exact-match constraint per recognized field.
///
/// `None` is the wildcard state. Set constraints are ANDed; a record passes
/// only if every set constraint matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub topic: Option<String>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub end_year: Option<i64>,
    pub pest: Option<String>,
    pub source: Option<String>,
    pub swot: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.topic.is_none()
            && self.sector.is_none()
            && self.region.is_none()
            && self.end_year.is_none()
            && self.pest.is_none()
            && self.source.is_none()
            && self.swot.is_none()
            && self.country.is_none()
            && self.city.is_none()
    }

    /// Decide whether a record satisfies every set constraint.
    ///
    /// An absent record field never matches a set constraint; it only passes
    /// under the wildcard.
    pub fn matches(&self, record: &Record) -> bool {
        matches_label(&self.topic, &record.topic)
            && matches_label(&self.sector, &record.sector)
            && matches_label(&self.region, &record.region)
            && matches_year(self.end_year, record.end_year)
            && matches_label(&self.pest, &record.pestle)
            && matches_label(&self.source, &record.source)
            && matches_label(&self.swot, &record.swot)
            && matches_label(&self.country, &record.country)
            && matches_label(&self.city, &record.city)
    }
}

fn matches_label(constraint: &Option<String>, value: &Option<String>) -> bool {
    match constraint {
        None => true,
        Some(wanted) => value.as_deref() == Some(wanted.as_str()),
    }
}

fn matches_year(constraint: Option<i64>, value: Option<i64>) -> bool {
    match constraint {
        None => true,
        Some(wanted) => value == Some(wanted),
    }
}
