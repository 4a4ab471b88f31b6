//! Report parameter checks
//!
//! Report modifiers are checked locally so a malformed request fails with
//! [`Error::InvalidParameter`] before any I/O.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Relative dates such as `today-7d` or `startOfMonth+1m-1d`
static RELATIVE_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(today|startOfMonth|startOfYear)([+-]\d+[dwmy]){0,3}$").expect("valid regex")
});

static ABSOLUTE_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_]+$").expect("valid regex"));

static FILTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_]+(==|=@).+$").expect("valid regex"));

static SORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+|-)?[a-zA-Z_]+$").expect("valid regex"));

// ============================================================================
// Validation
// ============================================================================

/// Check a report date: `YYYY-MM-DD` or a relative date
pub fn validate_date(name: &str, value: &str) -> Result<()> {
    if RELATIVE_DATE_REGEX.is_match(value) {
        return Ok(());
    }
    if ABSOLUTE_DATE_REGEX.is_match(value) {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|e| Error::invalid_param(name, format!("'{value}' is not a calendar date: {e}")));
    }
    Err(Error::invalid_param(
        name,
        format!("'{value}' is neither YYYY-MM-DD nor today|startOfMonth|startOfYear with offsets"),
    ))
}

/// Check a dimension, metric or locale name
pub fn validate_name(name: &str, value: &str) -> Result<()> {
    check(&NAME_REGEX, name, value, "[a-zA-Z_]+")
}

/// Check a filter expression
pub fn validate_filter(value: &str) -> Result<()> {
    check(&FILTER_REGEX, "filter", value, "NAME==VALUE or NAME=@VALUE")
}

/// Check a sort expression
pub fn validate_sort(value: &str) -> Result<()> {
    check(&SORT_REGEX, "sort", value, "[+|-]NAME")
}

fn check(regex: &Regex, name: &str, value: &str, expected: &str) -> Result<()> {
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(Error::invalid_param(
            name,
            format!("'{value}' does not match {expected}"),
        ))
    }
}

// ============================================================================
// Typed Helpers
// ============================================================================

/// A report filter, sent as `NAME==VALUE` or `NAME=@VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    /// Dimension equals value
    pub fn equals(dimension: &str, value: impl fmt::Display) -> Self {
        Self(format!("{dimension}=={value}"))
    }

    /// Dimension contains value
    pub fn contains(dimension: &str, value: impl fmt::Display) -> Self {
        Self(format!("{dimension}=@{value}"))
    }

    /// The raw expression
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Filter> for String {
    fn from(value: Filter) -> Self {
        value.0
    }
}

/// A sort key, sent as `+NAME` or `-NAME`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort(String);

impl Sort {
    /// Ascending on a column
    pub fn asc(column: &str) -> Self {
        Self(format!("+{column}"))
    }

    /// Descending on a column
    pub fn desc(column: &str) -> Self {
        Self(format!("-{column}"))
    }

    /// The raw expression
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Sort> for String {
    fn from(value: Sort) -> Self {
        value.0
    }
}
