//! Report to Arrow conversion
//!
//! Column types follow the header roles:
//!
//! | Header type | Arrow type |
//! |---|---|
//! | `DIMENSION` | `Utf8` |
//! | `METRIC_TALLY` | `Int64` |
//! | `METRIC_RATIO`, `METRIC_CURRENCY` | `Float64` |
//! | anything else | `Utf8` |
//!
//! Metric cells that are empty or do not parse become nulls. The currency of
//! a `METRIC_CURRENCY` column is kept in the field metadata.

use crate::api::{HeaderType, Report, ReportHeader};
use crate::error::Result;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Field metadata key holding a column's currency
pub const CURRENCY_METADATA_KEY: &str = "currency";

/// Label written in the first column of the totals row
pub const TOTALS_LABEL: &str = "TOTALS";

/// Label written in the first column of the averages row
pub const AVERAGES_LABEL: &str = "AVERAGES";

/// Arrow type for a header role
pub fn column_type(header_type: &HeaderType) -> DataType {
    match header_type {
        HeaderType::MetricTally => DataType::Int64,
        HeaderType::MetricRatio | HeaderType::MetricCurrency => DataType::Float64,
        HeaderType::Dimension | HeaderType::Other(_) => DataType::Utf8,
    }
}

/// Typed schema of a report
pub fn report_schema(report: &Report) -> Schema {
    Schema::new(
        report
            .headers
            .iter()
            .map(|h| header_field(h, column_type(&h.header_type)))
            .collect::<Vec<_>>(),
    )
}

/// Convert a report's data rows to a typed batch
pub fn report_to_arrow(report: &Report) -> Result<RecordBatch> {
    report.validate()?;

    let schema = Arc::new(report_schema(report));
    let columns = report
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cells = report.rows.iter().map(|row| row[i].as_str());
            typed_column(&column_type(&header.header_type), cells)
        })
        .collect();

    build_batch(schema, columns, report.rows.len())
}

/// Convert a report to an all-`Utf8` batch, keeping cells exactly as sent
///
/// With `include_summary`, the totals and averages rows are appended after
/// the data rows; their first cell is labelled when the server left it
/// empty.
pub fn report_to_text_batch(report: &Report, include_summary: bool) -> Result<RecordBatch> {
    report.validate()?;

    let summary: Vec<(&str, &[String])> = if include_summary {
        [
            (TOTALS_LABEL, report.totals.as_slice()),
            (AVERAGES_LABEL, report.averages.as_slice()),
        ]
        .into_iter()
        .filter(|(_, cells)| !cells.is_empty())
        .collect()
    } else {
        Vec::new()
    };

    let schema = Arc::new(Schema::new(
        report
            .headers
            .iter()
            .map(|h| header_field(h, DataType::Utf8))
            .collect::<Vec<_>>(),
    ));

    let columns = (0..report.headers.len())
        .map(|i| {
            let data = report.rows.iter().map(|row| row[i].as_str());
            let extra = summary.iter().map(move |(label, cells)| {
                if i == 0 && cells[0].is_empty() {
                    *label
                } else {
                    cells[i].as_str()
                }
            });
            Arc::new(data.chain(extra).map(Some).collect::<StringArray>()) as ArrayRef
        })
        .collect();

    build_batch(schema, columns, report.rows.len() + summary.len())
}

fn header_field(header: &ReportHeader, data_type: DataType) -> Field {
    let field = Field::new(&header.name, data_type, true);
    match &header.currency {
        Some(currency) => field.with_metadata(HashMap::from([(
            CURRENCY_METADATA_KEY.to_string(),
            currency.clone(),
        )])),
        None => field,
    }
}

fn typed_column<'a>(data_type: &DataType, cells: impl Iterator<Item = &'a str>) -> ArrayRef {
    match data_type {
        DataType::Int64 => Arc::new(cells.map(parse_tally).collect::<Int64Array>()),
        DataType::Float64 => Arc::new(cells.map(parse_number).collect::<Float64Array>()),
        _ => Arc::new(cells.map(Some).collect::<StringArray>()),
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok()
}

fn parse_tally(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    trimmed.parse().ok().or_else(|| {
        parse_number(trimmed)
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

fn build_batch(schema: SchemaRef, columns: Vec<ArrayRef>, rows: usize) -> Result<RecordBatch> {
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(schema, columns, &options)?)
}
