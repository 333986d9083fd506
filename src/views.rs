use serde::{Deserialize, Serialize};

use crate::aggregate::{group_by, Reducer};
use crate::filter::FilterCriteria;
use crate::histogram::{histogram, HistogramBin, DEFAULT_BIN_COUNT};
use crate::rank::{rank_desc, sort_asc_prefix};
use crate::record::{CategoricalField, NumericField, Record};
use crate::scale::{extent, SqrtScale, RADIUS_RANGE};

/// Sentinel bucket for absent categorical values in the distribution views.
pub const OTHERS_LABEL: &str = "Others";

/// Cap for the value-ranked bar views.
pub const TOP_RANKED: usize = 10;
/// Cap for the two donut distribution views.
pub const TOP_DISTRIBUTION: usize = 5;
/// Prefix length of the year axis in the end-year distribution.
pub const YEAR_PREFIX: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i64,
    pub count: u64,
}

/// One point of the relevance-vs-intensity view; no aggregation is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub intensity: f64,
    pub relevance: f64,
    pub impact: Option<f64>,
}

/// The relevance-vs-intensity view plus the extents the axes scale from and
/// the square-root radius encoding for impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterView {
    pub points: Vec<ScatterPoint>,
    pub intensity_extent: Option<(f64, f64)>,
    pub relevance_extent: Option<(f64, f64)>,
    pub impact_extent: Option<(f64, f64)>,
    pub radius_scale: Option<SqrtScale>,
}

/// The eleven datasets one filter pass produces, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub intensity_by_sector: Vec<LabelValue>,
    pub intensity_by_topic: Vec<LabelValue>,
    pub impact_by_country: Vec<LabelValue>,
    pub relevance_distribution: Vec<HistogramBin>,
    pub intensity_over_time: Vec<YearValue>,
    pub frequency_of_sources: Vec<LabelCount>,
    pub sector_distribution: Vec<LabelCount>,
    pub pest_distribution: Vec<LabelCount>,
    pub end_year_distribution: Vec<YearCount>,
    pub relevance_vs_intensity: ScatterView,
    pub relevance_by_country: Vec<LabelValue>,
}

/// Declarative rule for a label-keyed group/reduce/rank view.
struct LabelViewSpec {
    key: CategoricalField,
    reducer: Reducer,
    /// Substitute `OTHERS_LABEL` for absent keys instead of dropping the record.
    bucket_empty: bool,
    /// Drop groups whose aggregate is not strictly positive.
    positive_only: bool,
    limit: Option<usize>,
}

const INTENSITY_BY_SECTOR: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Sector,
    reducer: Reducer::Sum(NumericField::Intensity),
    bucket_empty: false,
    positive_only: false,
    limit: Some(TOP_RANKED),
};

const INTENSITY_BY_TOPIC: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Topic,
    reducer: Reducer::Sum(NumericField::Intensity),
    bucket_empty: false,
    positive_only: false,
    limit: Some(TOP_RANKED),
};

const IMPACT_BY_COUNTRY: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Country,
    reducer: Reducer::Sum(NumericField::Impact),
    bucket_empty: false,
    positive_only: true,
    limit: None,
};

const FREQUENCY_OF_SOURCES: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Source,
    reducer: Reducer::Count,
    bucket_empty: false,
    positive_only: false,
    limit: Some(TOP_RANKED),
};

const SECTOR_DISTRIBUTION: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Sector,
    reducer: Reducer::Count,
    bucket_empty: true,
    positive_only: false,
    limit: Some(TOP_DISTRIBUTION),
};

const PEST_DISTRIBUTION: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Pestle,
    reducer: Reducer::Count,
    bucket_empty: true,
    positive_only: false,
    limit: Some(TOP_DISTRIBUTION),
};

const RELEVANCE_BY_COUNTRY: LabelViewSpec = LabelViewSpec {
    key: CategoricalField::Country,
    reducer: Reducer::Mean(NumericField::Relevance),
    bucket_empty: false,
    positive_only: false,
    limit: Some(TOP_RANKED),
};

/// Run the whole pipeline once: filter, then derive all eleven views from the
/// same filtered sequence. Pure; every invocation allocates fresh output.
pub fn assemble(records: &[Record], criteria: &FilterCriteria) -> Dashboard {
    let filtered: Vec<&Record> = records.iter().filter(|r| criteria.matches(r)).collect();

    let relevance_values: Vec<f64> = filtered
        .iter()
        .filter_map(|r| r.numeric(NumericField::Relevance))
        .collect();

    Dashboard {
        intensity_by_sector: label_values(&filtered, &INTENSITY_BY_SECTOR),
        intensity_by_topic: label_values(&filtered, &INTENSITY_BY_TOPIC),
        impact_by_country: label_values(&filtered, &IMPACT_BY_COUNTRY),
        relevance_distribution: histogram(&relevance_values, DEFAULT_BIN_COUNT),
        intensity_over_time: intensity_over_time(&filtered),
        frequency_of_sources: label_counts(&filtered, &FREQUENCY_OF_SOURCES),
        sector_distribution: label_counts(&filtered, &SECTOR_DISTRIBUTION),
        pest_distribution: label_counts(&filtered, &PEST_DISTRIBUTION),
        end_year_distribution: end_year_distribution(&filtered),
        relevance_vs_intensity: scatter_view(&filtered),
        relevance_by_country: label_values(&filtered, &RELEVANCE_BY_COUNTRY),
    }
}

/// Group, reduce, and rank one label-keyed view per its descriptor.
fn label_view(records: &[&Record], spec: &LabelViewSpec) -> Vec<(String, f64)> {
    let grouped = group_by(
        records,
        |record| match record.categorical(spec.key) {
            Some(value) => Some(value.to_string()),
            None if spec.bucket_empty => Some(OTHERS_LABEL.to_string()),
            None => None,
        },
        spec.reducer,
    );

    let grouped: Vec<(String, f64)> = if spec.positive_only {
        grouped.into_iter().filter(|(_, v)| *v > 0.0).collect()
    } else {
        grouped
    };

    rank_desc(&grouped, spec.limit)
}

fn label_values(records: &[&Record], spec: &LabelViewSpec) -> Vec<LabelValue> {
    label_view(records, spec)
        .into_iter()
        .map(|(label, value)| LabelValue { label, value })
        .collect()
}

fn label_counts(records: &[&Record], spec: &LabelViewSpec) -> Vec<LabelCount> {
    label_view(records, spec)
        .into_iter()
        .map(|(label, count)| LabelCount {
            label,
            count: count as u64,
        })
        .collect()
}

/// Sum of intensity per end year, chronological, uncapped.
fn intensity_over_time(records: &[&Record]) -> Vec<YearValue> {
    let grouped = group_by(
        records,
        |r| r.end_year,
        Reducer::Sum(NumericField::Intensity),
    );
    sort_asc_prefix(&grouped, None)
        .into_iter()
        .map(|(year, value)| YearValue { year, value })
        .collect()
}

/// Record count per end year, chronological, first twenty years.
fn end_year_distribution(records: &[&Record]) -> Vec<YearCount> {
    let grouped = group_by(records, |r| r.end_year, Reducer::Count);
    sort_asc_prefix(&grouped, Some(YEAR_PREFIX))
        .into_iter()
        .map(|(year, count)| YearCount {
            year,
            count: count as u64,
        })
        .collect()
}

/// Per-record identity triples with the extents the axes scale from.
///
/// A point needs both axis values; impact stays optional per point. Extents
/// span every defined value in the filtered sequence, not just plotted points.
fn scatter_view(records: &[&Record]) -> ScatterView {
    let points = records
        .iter()
        .filter_map(|r| {
            match (
                r.numeric(NumericField::Intensity),
                r.numeric(NumericField::Relevance),
            ) {
                (Some(intensity), Some(relevance)) => Some(ScatterPoint {
                    intensity,
                    relevance,
                    impact: r.numeric(NumericField::Impact),
                }),
                _ => None,
            }
        })
        .collect();

    let intensity_extent = extent(records.iter().map(|r| r.numeric(NumericField::Intensity)));
    let relevance_extent = extent(records.iter().map(|r| r.numeric(NumericField::Relevance)));
    let impact_extent = extent(records.iter().map(|r| r.numeric(NumericField::Impact)));

    ScatterView {
        points,
        intensity_extent,
        relevance_extent,
        impact_extent,
        radius_scale: impact_extent.map(|domain| SqrtScale::new(domain, RADIUS_RANGE)),
    }
}
