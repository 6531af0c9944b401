//! Type 2 dimension repository (customers, products)
//!
//! Every statement is parameterized by an [`ScdDimension`] descriptor. Table
//! and column names come from the descriptor constants; dates are bound.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::data::sqlite::SqliteError;
use crate::data::types::{DimensionVersion, ScdDimension};

/// Insert a current version for every active source row whose business key
/// has no dimension row yet. Returns the number of rows inserted.
pub async fn insert_new_versions(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
    effective_date: NaiveDate,
) -> Result<u64, SqliteError> {
    let columns = dim.column_list();
    let query = format!(
        r#"
        INSERT INTO {table} ({columns}, is_current, effective_date, end_date)
        SELECT {columns}, 1, ?, NULL
        FROM {source} src
        WHERE src.is_active = 1
          AND NOT EXISTS (
              SELECT 1 FROM {table} d WHERE d.{bk} = src.{bk}
          )
        ORDER BY src.{bk}
        "#,
        table = dim.table,
        source = dim.source,
        bk = dim.business_key,
        columns = columns,
    );

    let result = sqlx::query(&query)
        .bind(effective_date)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Retire current versions whose source row is now inactive
pub async fn retire_inactive_versions(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
    end_date: NaiveDate,
) -> Result<u64, SqliteError> {
    let query = format!(
        r#"
        UPDATE {table}
        SET is_current = 0, end_date = ?
        WHERE is_current = 1
          AND {bk} IN (
              SELECT {bk} FROM {source} WHERE is_active = 0
          )
        "#,
        table = dim.table,
        source = dim.source,
        bk = dim.business_key,
    );

    let result = sqlx::query(&query).bind(end_date).execute(conn).await?;

    Ok(result.rows_affected())
}

/// Business keys that currently have more than one current version
pub async fn business_keys_with_multiple_current(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
) -> Result<Vec<String>, SqliteError> {
    let query = format!(
        r#"
        SELECT {bk}
        FROM {table}
        WHERE is_current = 1
        GROUP BY {bk}
        HAVING COUNT(*) > 1
        ORDER BY {bk}
        "#,
        table = dim.table,
        bk = dim.business_key,
    );

    let rows: Vec<(String,)> = sqlx::query_as(&query).fetch_all(conn).await?;
    Ok(rows.into_iter().map(|(bk,)| bk).collect())
}

/// Surrogate key of the current version for a business key
pub async fn current_surrogate_key(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
    business_key: &str,
) -> Result<Option<i64>, SqliteError> {
    let query = format!(
        "SELECT {sk} FROM {table} WHERE {bk} = ? AND is_current = 1",
        sk = dim.surrogate_key,
        table = dim.table,
        bk = dim.business_key,
    );

    let sk: Option<i64> = sqlx::query_scalar(&query)
        .bind(business_key)
        .fetch_optional(conn)
        .await?;
    Ok(sk)
}

/// All versions of a business key, oldest first
pub async fn list_versions(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
    business_key: &str,
) -> Result<Vec<DimensionVersion>, SqliteError> {
    let query = format!(
        r#"
        SELECT {sk}, {bk}, is_current, effective_date, end_date
        FROM {table}
        WHERE {bk} = ?
        ORDER BY {sk}
        "#,
        sk = dim.surrogate_key,
        table = dim.table,
        bk = dim.business_key,
    );

    let rows = sqlx::query_as::<_, (i64, String, bool, NaiveDate, Option<NaiveDate>)>(&query)
        .bind(business_key)
        .fetch_all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(surrogate_key, business_key, is_current, effective_date, end_date)| {
                DimensionVersion {
                    surrogate_key,
                    business_key,
                    is_current,
                    effective_date,
                    end_date,
                }
            },
        )
        .collect())
}

/// Row counts as (total, current)
pub async fn count_versions(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
) -> Result<(u64, u64), SqliteError> {
    let query = format!(
        "SELECT COUNT(*), COALESCE(SUM(is_current), 0) FROM {table}",
        table = dim.table,
    );

    let (total, current): (i64, i64) = sqlx::query_as(&query).fetch_one(conn).await?;
    Ok((total as u64, current as u64))
}
