//! Date dimension repository

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::data::sqlite::SqliteError;
use crate::data::types::DateDimensionRow;

/// Insert a calendar day (idempotent)
/// Returns true if created, false if the date already existed
pub async fn insert_date(
    conn: &mut SqliteConnection,
    row: &DateDimensionRow,
) -> Result<bool, SqliteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO dim_date
            (date_sk, date_id, day_of_month, day_of_week, day_name, month, month_name,
             quarter, year, week_of_year, is_weekend)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(row.date_sk)
    .bind(row.date_id)
    .bind(row.day_of_month)
    .bind(row.day_of_week)
    .bind(&row.day_name)
    .bind(row.month)
    .bind(&row.month_name)
    .bind(row.quarter)
    .bind(row.year)
    .bind(row.week_of_year)
    .bind(row.is_weekend)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Get a calendar day by date
pub async fn get_date(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<Option<DateDimensionRow>, SqliteError> {
    let row = sqlx::query_as::<
        _,
        (
            i64,
            NaiveDate,
            u32,
            u32,
            String,
            u32,
            String,
            u32,
            i32,
            u32,
            bool,
        ),
    >(
        r#"
        SELECT date_sk, date_id, day_of_month, day_of_week, day_name, month, month_name,
               quarter, year, week_of_year, is_weekend
        FROM dim_date
        WHERE date_id = ?
        "#,
    )
    .bind(date)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(
        |(
            date_sk,
            date_id,
            day_of_month,
            day_of_week,
            day_name,
            month,
            month_name,
            quarter,
            year,
            week_of_year,
            is_weekend,
        )| DateDimensionRow {
            date_sk,
            date_id,
            day_of_month,
            day_of_week,
            day_name,
            month,
            month_name,
            quarter,
            year,
            week_of_year,
            is_weekend,
        },
    ))
}

/// Number of calendar days in the dimension
pub async fn count_dates(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dim_date")
        .fetch_one(conn)
        .await?;

    Ok(count as u64)
}
