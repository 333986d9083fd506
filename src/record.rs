use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One analytical observation from the upstream snapshot.
///
/// Categorical fields normalize the upstream's `null` / missing / `""` variants
/// into `None`; numeric fields additionally accept numbers carried as strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(deserialize_with = "de_opt_int")]
    pub id: Option<i64>,

    #[serde(deserialize_with = "de_opt_label")]
    pub topic: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub sector: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub region: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub pestle: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub source: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub swot: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub country: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub city: Option<String>,

    #[serde(deserialize_with = "de_opt_int")]
    pub end_year: Option<i64>,
    #[serde(deserialize_with = "de_opt_number")]
    pub intensity: Option<f64>,
    #[serde(deserialize_with = "de_opt_number")]
    pub relevance: Option<f64>,
    #[serde(deserialize_with = "de_opt_number")]
    pub impact: Option<f64>,

    // Provenance, carried through untouched by the pipeline.
    #[serde(deserialize_with = "de_opt_label")]
    pub title: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub insight: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub url: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub start_year: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub added: Option<String>,
    #[serde(deserialize_with = "de_opt_label")]
    pub published: Option<String>,
}

/// The categorical fields a view may group or filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Topic,
    Sector,
    Region,
    Pestle,
    Source,
    Swot,
    Country,
    City,
}

/// The numeric fields a reducer may aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Intensity,
    Relevance,
    Impact,
}

impl Record {
    /// Look up a categorical field by name. `None` means the value is absent.
    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::Topic => &self.topic,
            CategoricalField::Sector => &self.sector,
            CategoricalField::Region => &self.region,
            CategoricalField::Pestle => &self.pestle,
            CategoricalField::Source => &self.source,
            CategoricalField::Swot => &self.swot,
            CategoricalField::Country => &self.country,
            CategoricalField::City => &self.city,
        };
        value.as_deref()
    }

    /// Look up a numeric field. `None` means the value is absent, not zero.
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Intensity => self.intensity,
            NumericField::Relevance => self.relevance,
            NumericField::Impact => self.impact,
        }
    }
}

fn de_opt_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    opt_label_from_value(&value).map_err(DeError::custom)
}

fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    opt_number_from_value(&value).map_err(DeError::custom)
}

fn de_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    opt_int_from_value(&value).map_err(DeError::custom)
}

/// Normalize a JSON value into an optional label.
fn opt_label_from_value(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(opt_label_from_str(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(format!("Unsupported value for a text field: {value}")),
    }
}

/// Normalize a JSON value into an optional float.
fn opt_number_from_value(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => opt_number_from_str(s),
        _ => Err(format!("Unsupported value for a numeric field: {value}")),
    }
}

/// Normalize a JSON value into an optional integer.
fn opt_int_from_value(value: &Value) -> Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("Failed to parse '{n}' as an integer")),
        Value::String(s) => opt_int_from_str(s),
        _ => Err(format!("Unsupported value for an integer field: {value}")),
    }
}

fn opt_label_from_str(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn opt_number_from_str(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("Failed to parse '{raw}' as a number"))
}

fn opt_int_from_str(raw: &str) -> Result<Option<i64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| format!("Failed to parse '{raw}' as an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let record: Record = serde_json::from_str(
            r#"{
                "id": 7,
                "end_year": 2027,
                "intensity": 6,
                "sector": "Energy",
                "topic": "gas",
                "insight": "Annual Energy Outlook",
                "url": "http://example.com",
                "region": "Northern America",
                "start_year": "2017",
                "impact": 3,
                "added": "January, 20 2017",
                "published": "January, 09 2017",
                "country": "United States of America",
                "relevance": 2,
                "pestle": "Industries",
                "source": "EIA",
                "title": "U.S. natural gas"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(record.sector.as_deref(), Some("Energy"));
        assert_eq!(record.end_year, Some(2027));
        assert_eq!(record.intensity, Some(6.0));
        assert_eq!(record.relevance, Some(2.0));
        assert_eq!(record.impact, Some(3.0));
        assert_eq!(record.swot, None);
        assert_eq!(record.city, None);
    }

    #[test]
    fn test_deserialize_empty_strings_fold_to_none() {
        let record: Record = serde_json::from_str(
            r#"{"sector": "", "end_year": "", "intensity": "", "pestle": "  "}"#,
        )
        .unwrap();
        assert_eq!(record.sector, None);
        assert_eq!(record.end_year, None);
        assert_eq!(record.intensity, None);
        assert_eq!(record.pestle, None);
    }

    #[test]
    fn test_deserialize_numeric_strings() {
        let record: Record =
            serde_json::from_str(r#"{"end_year": "2021", "intensity": "4.5"}"#).unwrap();
        assert_eq!(record.end_year, Some(2021));
        assert_eq!(record.intensity, Some(4.5));
    }

    #[test]
    fn test_deserialize_nulls_and_missing_fields() {
        let record: Record = serde_json::from_str(r#"{"sector": null, "impact": null}"#).unwrap();
        assert_eq!(record.sector, None);
        assert_eq!(record.impact, None);
        assert_eq!(record.topic, None);
    }

    #[test]
    fn test_deserialize_rejects_non_numeric_text() {
        let result = serde_json::from_str::<Record>(r#"{"intensity": "high"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_categorical_accessor() {
        let record: Record =
            serde_json::from_str(r#"{"sector": "Energy", "pestle": "Economic"}"#).unwrap();
        assert_eq!(
            record.categorical(CategoricalField::Sector),
            Some("Energy")
        );
        assert_eq!(
            record.categorical(CategoricalField::Pestle),
            Some("Economic")
        );
        assert_eq!(record.categorical(CategoricalField::City), None);
    }

    #[test]
    fn test_numeric_accessor() {
        let record: Record = serde_json::from_str(r#"{"relevance": 3}"#).unwrap();
        assert_eq!(record.numeric(NumericField::Relevance), Some(3.0));
        assert_eq!(record.numeric(NumericField::Impact), None);
    }
}
