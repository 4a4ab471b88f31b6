//! Output module
//!
//! Exports generated reports for downstream tools.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting a [`Report`](crate::api::Report) to an Arrow `RecordBatch`
//! - Writing CSV and JSON lines
//! - Writing Parquet files

mod schema;
mod text;
mod writer;

pub use schema::{
    column_type, report_schema, report_to_arrow, report_to_text_batch, AVERAGES_LABEL,
    CURRENCY_METADATA_KEY, TOTALS_LABEL,
};
pub use text::{write_csv, write_jsonl};
pub use writer::{write_report_parquet, write_report_parquet_to, ParquetWriter, ParquetWriterConfig};

#[cfg(test)]
mod tests;
