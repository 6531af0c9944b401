//! Date dimension generator
//!
//! Calendar attributes are a pure function of the date; the only store
//! access is reading the observed transaction range and writing rows.

use chrono::{Datelike, NaiveDate};
use sqlx::SqliteConnection;

use super::error::WarehouseError;
use crate::data::sqlite::repositories::{insert_date, transaction_date_range};
use crate::data::types::DateDimensionRow;

/// Derive the calendar row for one day
pub fn calendar_day(date: NaiveDate) -> DateDimensionRow {
    let day_of_week = date.weekday().number_from_monday();
    DateDimensionRow {
        date_sk: date_sk(date),
        date_id: date,
        day_of_month: date.day(),
        day_of_week,
        day_name: date.format("%A").to_string(),
        month: date.month(),
        month_name: date.format("%B").to_string(),
        quarter: date.month().div_ceil(3),
        year: date.year(),
        week_of_year: date.iso_week().week(),
        is_weekend: day_of_week >= 6,
    }
}

/// One row per day in `[start, end]`; empty when `start > end`
pub fn calendar_days(start: NaiveDate, end: NaiveDate) -> Vec<DateDimensionRow> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(calendar_day)
        .collect()
}

/// Date surrogate key in `YYYYMMDD` form
pub fn date_sk(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

/// Inclusive range of transaction dates present in production
pub async fn date_range(
    conn: &mut SqliteConnection,
) -> Result<(NaiveDate, NaiveDate), WarehouseError> {
    transaction_date_range(conn)
        .await?
        .ok_or(WarehouseError::EmptyRange)
}

/// Write calendar rows for `[start, end]`, skipping days already present.
/// Returns the number of new rows.
pub async fn build_date_dimension(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<u64, WarehouseError> {
    let mut inserted = 0u64;
    for row in calendar_days(start, end) {
        if insert_date(conn, &row).await? {
            inserted += 1;
        }
    }

    tracing::debug!(%start, %end, inserted, "Date dimension built");
    Ok(inserted)
}
