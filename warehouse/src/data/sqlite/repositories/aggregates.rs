//! Aggregate rollup repository
//!
//! Each rollup inserts only grouping keys that have no aggregate row yet.
//! Existing rows are snapshots and are never updated.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::data::sqlite::SqliteError;
use crate::data::types::{CustomerLifetimeRow, DailySalesRow, ProductSalesRow};

/// Roll up sales per day
pub async fn insert_daily_sales(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO agg_daily_sales
            (date_sk, total_sales, total_units_sold, transaction_count,
             customer_count, avg_transaction_value)
        SELECT
            fs.date_sk,
            SUM(fs.line_total),
            SUM(fs.quantity),
            COUNT(DISTINCT fs.transaction_id),
            COUNT(DISTINCT fs.customer_sk),
            AVG(fs.transaction_total)
        FROM fact_sales fs
        WHERE NOT EXISTS (
            SELECT 1 FROM agg_daily_sales a WHERE a.date_sk = fs.date_sk
        )
        GROUP BY fs.date_sk
        "#,
    )
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Roll up sales per product
pub async fn insert_product_sales(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO agg_product_sales
            (product_sk, total_sales, total_units_sold, transaction_count, avg_discount)
        SELECT
            fs.product_sk,
            SUM(fs.line_total),
            SUM(fs.quantity),
            COUNT(DISTINCT fs.transaction_id),
            AVG(fs.discount_percentage)
        FROM fact_sales fs
        WHERE NOT EXISTS (
            SELECT 1 FROM agg_product_sales a WHERE a.product_sk = fs.product_sk
        )
        GROUP BY fs.product_sk
        "#,
    )
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Roll up lifetime value per customer
pub async fn insert_customer_lifetime(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO agg_customer_lifetime
            (customer_sk, total_spent, total_units_purchased, transaction_count,
             first_purchase_date, last_purchase_date, avg_transaction_value)
        SELECT
            fs.customer_sk,
            SUM(fs.line_total),
            SUM(fs.quantity),
            COUNT(DISTINCT fs.transaction_id),
            MIN(dd.date_id),
            MAX(dd.date_id),
            AVG(fs.transaction_total)
        FROM fact_sales fs
        INNER JOIN dim_date dd ON fs.date_sk = dd.date_sk
        WHERE NOT EXISTS (
            SELECT 1 FROM agg_customer_lifetime a WHERE a.customer_sk = fs.customer_sk
        )
        GROUP BY fs.customer_sk
        "#,
    )
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Get the daily rollup for a date surrogate key
pub async fn get_daily_sales(
    conn: &mut SqliteConnection,
    date_sk: i64,
) -> Result<Option<DailySalesRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, f64, i64, i64, i64, f64)>(
        r#"
        SELECT date_sk, total_sales, total_units_sold, transaction_count,
               customer_count, avg_transaction_value
        FROM agg_daily_sales
        WHERE date_sk = ?
        "#,
    )
    .bind(date_sk)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(
        |(
            date_sk,
            total_sales,
            total_units_sold,
            transaction_count,
            customer_count,
            avg_transaction_value,
        )| DailySalesRow {
            date_sk,
            total_sales,
            total_units_sold,
            transaction_count,
            customer_count,
            avg_transaction_value,
        },
    ))
}

/// Get the product rollup for a product surrogate key
pub async fn get_product_sales(
    conn: &mut SqliteConnection,
    product_sk: i64,
) -> Result<Option<ProductSalesRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, f64, i64, i64, f64)>(
        r#"
        SELECT product_sk, total_sales, total_units_sold, transaction_count, avg_discount
        FROM agg_product_sales
        WHERE product_sk = ?
        "#,
    )
    .bind(product_sk)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(
        |(product_sk, total_sales, total_units_sold, transaction_count, avg_discount)| {
            ProductSalesRow {
                product_sk,
                total_sales,
                total_units_sold,
                transaction_count,
                avg_discount,
            }
        },
    ))
}

/// Get the lifetime rollup for a customer surrogate key
pub async fn get_customer_lifetime(
    conn: &mut SqliteConnection,
    customer_sk: i64,
) -> Result<Option<CustomerLifetimeRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, f64, i64, i64, NaiveDate, NaiveDate, f64)>(
        r#"
        SELECT customer_sk, total_spent, total_units_purchased, transaction_count,
               first_purchase_date, last_purchase_date, avg_transaction_value
        FROM agg_customer_lifetime
        WHERE customer_sk = ?
        "#,
    )
    .bind(customer_sk)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(
        |(
            customer_sk,
            total_spent,
            total_units_purchased,
            transaction_count,
            first_purchase_date,
            last_purchase_date,
            avg_transaction_value,
        )| CustomerLifetimeRow {
            customer_sk,
            total_spent,
            total_units_purchased,
            transaction_count,
            first_purchase_date,
            last_purchase_date,
            avg_transaction_value,
        },
    ))
}

/// Row counts per rollup table as (daily, product, customer_lifetime)
pub async fn count_aggregates(
    conn: &mut SqliteConnection,
) -> Result<(u64, u64, u64), SqliteError> {
    let (daily, product, customer): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM agg_daily_sales),
            (SELECT COUNT(*) FROM agg_product_sales),
            (SELECT COUNT(*) FROM agg_customer_lifetime)
        "#,
    )
    .fetch_one(conn)
    .await?;

    Ok((daily as u64, product as u64, customer as u64))
}
