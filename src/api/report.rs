//! Generated report model
//!
//! A report is a table: one header per column, rows of string cells, and
//! optional averages/totals rows. Every row, and the averages and totals
//! when present, has exactly one cell per header.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column role in a report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeaderType {
    /// Grouping column (date, ad client, ...)
    Dimension,
    /// Integer count
    MetricTally,
    /// Ratio
    MetricRatio,
    /// Monetary amount, see [`ReportHeader::currency`]
    MetricCurrency,
    /// A value this client does not know about
    Other(String),
}

impl HeaderType {
    /// Wire value
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dimension => "DIMENSION",
            Self::MetricTally => "METRIC_TALLY",
            Self::MetricRatio => "METRIC_RATIO",
            Self::MetricCurrency => "METRIC_CURRENCY",
            Self::Other(s) => s,
        }
    }

    /// True for the `METRIC_*` types
    pub fn is_metric(&self) -> bool {
        matches!(
            self,
            Self::MetricTally | Self::MetricRatio | Self::MetricCurrency
        )
    }
}

impl Default for HeaderType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for HeaderType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DIMENSION" => Self::Dimension,
            "METRIC_TALLY" => Self::MetricTally,
            "METRIC_RATIO" => Self::MetricRatio,
            "METRIC_CURRENCY" => Self::MetricCurrency,
            _ => Self::Other(value),
        }
    }
}

impl From<HeaderType> for String {
    fn from(value: HeaderType) -> Self {
        match value {
            HeaderType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for HeaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of one report column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    /// Column name (dimension or metric)
    #[serde(default)]
    pub name: String,
    /// Column role
    #[serde(rename = "type", default)]
    pub header_type: HeaderType,
    /// ISO-4217 currency code, only for `METRIC_CURRENCY` columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A generated report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Always `adexchangeseller#report`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Column headers, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<ReportHeader>,
    /// Data rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Vec<String>>,
    /// Per-column averages (empty cells for dimensions)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub averages: Vec<String>,
    /// Per-column totals (empty cells for dimensions)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<String>,
    /// Rows matched before `maxResults` was applied
    #[serde(
        default,
        with = "int64_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_matched_rows: Option<i64>,
    /// Warnings attached to the report
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Report {
    /// Check that every row, and the averages and totals, match the headers
    pub fn validate(&self) -> Result<()> {
        let width = self.headers.len();

        if let Some((index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(Error::decode(format!(
                "report row {index} has {} cells but there are {width} headers",
                row.len()
            )));
        }

        for (label, cells) in [("averages", &self.averages), ("totals", &self.totals)] {
            if !cells.is_empty() && cells.len() != width {
                return Err(Error::decode(format!(
                    "report {label} has {} cells but there are {width} headers",
                    cells.len()
                )));
            }
        }

        Ok(())
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the report has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column with this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.name == name)
    }

    /// Dimension columns
    pub fn dimension_headers(&self) -> impl Iterator<Item = &ReportHeader> {
        self.headers
            .iter()
            .filter(|h| h.header_type == HeaderType::Dimension)
    }

    /// Metric columns
    pub fn metric_headers(&self) -> impl Iterator<Item = &ReportHeader> {
        self.headers.iter().filter(|h| h.header_type.is_metric())
    }

    /// A cell parsed as a number
    pub fn cell_f64(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row)?.get(column)?.trim().parse().ok()
    }

    /// Rows as JSON objects keyed by header name
    pub fn rows_as_maps(&self) -> Vec<JsonObject> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.name.clone(), JsonValue::String(cell.clone())))
                    .collect()
            })
            .collect()
    }
}

/// `int64` values travel as JSON strings; plain numbers are accepted too
mod int64_string {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
