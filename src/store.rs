use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::Read;

use crate::record::{CategoricalField, Record};

/// The immutable record collection for one session.
///
/// Loaded once from the upstream snapshot; every aggregation request reads it,
/// nothing mutates it.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

/// Distinct values per filterable field, for populating filter controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub topics: Vec<String>,
    pub sectors: Vec<String>,
    pub regions: Vec<String>,
    pub end_years: Vec<i64>,
    pub pestles: Vec<String>,
    pub sources: Vec<String>,
    pub swots: Vec<String>,
    pub countries: Vec<String>,
    pub cities: Vec<String>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load a snapshot from a JSON array-of-objects payload.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(payload).context("Snapshot is not valid JSON")?;
        Self::from_json_value(&value)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value =
            serde_json::from_reader(reader).context("Snapshot is not valid JSON")?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Snapshot must be a JSON array of objects"))?;

        let mut records = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            if !item.is_object() {
                return Err(anyhow!("Items in the snapshot array must be objects"));
            }
            let record: Record = serde_json::from_value(item.clone())
                .with_context(|| format!("Failed to read record at index {idx}"))?;
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Load a snapshot from CSV with a header row.
    ///
    /// Cells are coerced through the same rules as JSON string values, so an
    /// empty cell is an absent field and numeric columns may carry digits.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();

        let mut records = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
            let mut object = serde_json::Map::new();
            for (header, cell) in headers.iter().zip(row.iter()) {
                object.insert(header.clone(), Value::String(cell.to_string()));
            }
            let record: Record = serde_json::from_value(Value::Object(object))
                .with_context(|| format!("Failed to read record at CSV row {}", idx + 1))?;
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Collect the distinct non-absent values per filterable field, sorted.
    pub fn filter_options(&self) -> FilterOptions {
        let end_years: BTreeSet<i64> = self.records.iter().filter_map(|r| r.end_year).collect();
        FilterOptions {
            topics: self.distinct(CategoricalField::Topic),
            sectors: self.distinct(CategoricalField::Sector),
            regions: self.distinct(CategoricalField::Region),
            end_years: end_years.into_iter().collect(),
            pestles: self.distinct(CategoricalField::Pestle),
            sources: self.distinct(CategoricalField::Source),
            swots: self.distinct(CategoricalField::Swot),
            countries: self.distinct(CategoricalField::Country),
            cities: self.distinct(CategoricalField::City),
        }
    }

    fn distinct(&self, field: CategoricalField) -> Vec<String> {
        let values: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.categorical(field))
            .collect();
        values.into_iter().map(str::to_string).collect()
    }
}
