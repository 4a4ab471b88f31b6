//! Tests for output module

use super::*;
use crate::api::{HeaderType, Report, ReportHeader};
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs::File;
use tempfile::tempdir;

fn header(name: &str, header_type: HeaderType) -> ReportHeader {
    ReportHeader {
        name: name.to_string(),
        header_type,
        currency: None,
    }
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

fn sample_report() -> Report {
    Report {
        headers: vec![
            header("DATE", HeaderType::Dimension),
            header("AD_REQUESTS", HeaderType::MetricTally),
            header("CTR", HeaderType::MetricRatio),
            ReportHeader {
                currency: Some("USD".to_string()),
                ..header("EARNINGS", HeaderType::MetricCurrency)
            },
        ],
        rows: vec![
            row(&["2024-01-01", "100", "0.02", "1.50"]),
            row(&["2024-01-02", "120", "", "2.25"]),
        ],
        totals: row(&["", "220", "", "3.75"]),
        averages: row(&["", "110", "0.02", "1.875"]),
        ..Default::default()
    }
}

// ============================================================================
// Arrow Conversion Tests
// ============================================================================

#[test]
fn test_column_types() {
    assert_eq!(column_type(&HeaderType::Dimension), DataType::Utf8);
    assert_eq!(column_type(&HeaderType::MetricTally), DataType::Int64);
    assert_eq!(column_type(&HeaderType::MetricRatio), DataType::Float64);
    assert_eq!(column_type(&HeaderType::MetricCurrency), DataType::Float64);
    assert_eq!(
        column_type(&HeaderType::Other("METRIC_NEW".to_string())),
        DataType::Utf8
    );
}

#[test]
fn test_report_to_arrow() {
    let batch = report_to_arrow(&sample_report()).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 4);

    let schema = batch.schema();
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(1).data_type(), &DataType::Int64);
    assert_eq!(
        schema.field(3).metadata().get(CURRENCY_METADATA_KEY),
        Some(&"USD".to_string())
    );

    let dates = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(dates.value(1), "2024-01-02");

    let requests = batch.column(1).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(requests.value(0), 100);

    let ctr = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
    assert!((ctr.value(0) - 0.02).abs() < f64::EPSILON);
    assert!(ctr.is_null(1));
}

#[test]
fn test_report_to_arrow_rejects_ragged_rows() {
    let mut report = sample_report();
    report.rows[0].pop();
    assert!(matches!(
        report_to_arrow(&report),
        Err(crate::error::Error::Decode { .. })
    ));
}

#[test]
fn test_empty_report_to_arrow() {
    let mut report = sample_report();
    report.rows.clear();
    let batch = report_to_arrow(&report).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 4);
}

#[test]
fn test_text_batch_with_summary() {
    let batch = report_to_text_batch(&sample_report(), true).unwrap();
    assert_eq!(batch.num_rows(), 4);

    let first = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(first.value(2), TOTALS_LABEL);
    assert_eq!(first.value(3), AVERAGES_LABEL);

    let without = report_to_text_batch(&sample_report(), false).unwrap();
    assert_eq!(without.num_rows(), 2);
}

// ============================================================================
// CSV / JSON Lines Tests
// ============================================================================

#[test]
fn test_write_csv() {
    let mut out = Vec::new();
    write_csv(&sample_report(), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "DATE,AD_REQUESTS,CTR,EARNINGS",
            "2024-01-01,100,0.02,1.50",
            "2024-01-02,120,,2.25",
            "TOTALS,220,,3.75",
            "AVERAGES,110,0.02,1.875",
        ]
    );
}

#[test]
fn test_write_csv_quotes_cells() {
    let report = Report {
        headers: vec![header("DOMAIN_NAME", HeaderType::Dimension)],
        rows: vec![row(&["Example, Inc"]), row(&["say \"hi\""])],
        ..Default::default()
    };

    let mut out = Vec::new();
    write_csv(&report, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "\"Example, Inc\"");
    assert_eq!(lines[2], "\"say \"\"hi\"\"\"");
}

#[test]
fn test_write_jsonl() {
    let mut out = Vec::new();
    write_jsonl(&sample_report(), &mut out).unwrap();

    let rows: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        json!({ "DATE": "2024-01-01", "AD_REQUESTS": 100, "CTR": 0.02, "EARNINGS": 1.5 })
    );
    assert_eq!(rows[1].get("CTR"), None);
}

// ============================================================================
// Parquet Writer Tests
// ============================================================================

#[test]
fn test_parquet_writer_config() {
    let config = ParquetWriterConfig::new()
        .with_row_group_size(0)
        .with_compression_name("ZSTD")
        .unwrap();
    assert_eq!(config.row_group_size(), 1);
    assert!(matches!(
        config.compression(),
        parquet::basic::Compression::ZSTD(_)
    ));

    assert!(ParquetWriterConfig::new()
        .with_compression_name("lz77")
        .is_err());
}

#[test]
fn test_write_report_parquet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.parquet");

    let rows = write_report_parquet(&path, &sample_report(), None).unwrap();
    assert_eq!(rows, 2);

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total, 2);
    assert_eq!(batches[0].schema().field(1).data_type(), &DataType::Int64);
}

#[test]
fn test_write_report_parquet_to_buffer() {
    let config = ParquetWriterConfig::new()
        .with_compression_name("none")
        .unwrap();
    let mut buffer = Vec::new();
    let rows = write_report_parquet_to(&mut buffer, &sample_report(), Some(&config)).unwrap();
    assert_eq!(rows, 2);
    assert_eq!(&buffer[..4], b"PAR1");
}
