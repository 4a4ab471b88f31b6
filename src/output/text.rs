//! CSV and JSON lines export

use super::schema::{report_to_arrow, report_to_text_batch};
use crate::api::Report;
use crate::error::Result;
use arrow::csv::WriterBuilder;
use arrow::json::LineDelimitedWriter;
use std::io::Write;

/// Write a report as CSV
///
/// The first line holds the header names. Data rows follow with cells
/// exactly as the server sent them, then the totals and averages rows when
/// the report has them.
pub fn write_csv<W: Write>(report: &Report, writer: W) -> Result<()> {
    let batch = report_to_text_batch(report, true)?;
    let mut csv = WriterBuilder::new().with_header(true).build(writer);
    csv.write(&batch)?;
    Ok(())
}

/// Write a report as JSON lines, one object per data row
///
/// Metric cells are typed (integers for tallies, floats otherwise) and
/// unparsable metric cells are left out.
pub fn write_jsonl<W: Write>(report: &Report, writer: W) -> Result<()> {
    let batch = report_to_arrow(report)?;
    let mut json = LineDelimitedWriter::new(writer);
    json.write(&batch)?;
    json.finish()?;
    Ok(())
}
