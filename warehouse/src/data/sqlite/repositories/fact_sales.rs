//! Sales fact repository

use sqlx::SqliteConnection;

use crate::data::sqlite::SqliteError;
use crate::data::types::FactSaleRow;

/// Append every production line item not yet in the fact table whose
/// customer and product both have a current dimension version and whose
/// transaction date is in the date dimension.
///
/// The payment method join is a LEFT JOIN: an unknown label leaves
/// `payment_method_sk` NULL. The label normalization must stay in sync with
/// `domain::warehouse::payment_method::normalize_payment_method`.
pub async fn insert_new_facts(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO fact_sales
            (transaction_id, item_id, customer_sk, product_sk, date_sk,
             payment_method_sk, quantity, unit_price, discount_percentage,
             line_total, transaction_total, shipping_address)
        SELECT
            t.transaction_id,
            ti.item_id,
            dc.customer_sk,
            dp.product_sk,
            dd.date_sk,
            dpm.payment_method_sk,
            ti.quantity,
            ti.unit_price,
            ti.discount_percentage,
            ti.line_total,
            t.total_amount,
            t.shipping_address
        FROM production_transaction_items ti
        INNER JOIN production_transactions t
            ON ti.transaction_id = t.transaction_id
        INNER JOIN dim_customers dc
            ON t.customer_id = dc.customer_id AND dc.is_current = 1
        INNER JOIN dim_products dp
            ON ti.product_id = dp.product_id AND dp.is_current = 1
        INNER JOIN dim_date dd
            ON t.transaction_date = dd.date_id
        LEFT JOIN dim_payment_method dpm
            ON LOWER(REPLACE(t.payment_method, ' ', '_')) = dpm.payment_method_id
        WHERE NOT EXISTS (
            SELECT 1 FROM fact_sales fs WHERE fs.item_id = ti.item_id
        )
        ORDER BY ti.item_id
        "#,
    )
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Production line items not represented in the fact table
pub async fn count_unloaded_items(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM production_transaction_items ti
        WHERE NOT EXISTS (
            SELECT 1 FROM fact_sales fs WHERE fs.item_id = ti.item_id
        )
        "#,
    )
    .fetch_one(conn)
    .await?;

    Ok(count as u64)
}

/// Number of loaded fact rows
pub async fn count_facts(conn: &mut SqliteConnection) -> Result<u64, SqliteError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fact_sales")
        .fetch_one(conn)
        .await?;

    Ok(count as u64)
}

/// Get the fact row loaded for a source line item
pub async fn get_fact_by_item(
    conn: &mut SqliteConnection,
    item_id: &str,
) -> Result<Option<FactSaleRow>, SqliteError> {
    let row = sqlx::query_as::<
        _,
        (
            i64,
            String,
            String,
            i64,
            i64,
            i64,
            Option<i64>,
            i64,
            f64,
            f64,
            f64,
            f64,
            Option<String>,
        ),
    >(
        r#"
        SELECT sale_sk, transaction_id, item_id, customer_sk, product_sk, date_sk,
               payment_method_sk, quantity, unit_price, discount_percentage,
               line_total, transaction_total, shipping_address
        FROM fact_sales
        WHERE item_id = ?
        "#,
    )
    .bind(item_id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(
        |(
            sale_sk,
            transaction_id,
            item_id,
            customer_sk,
            product_sk,
            date_sk,
            payment_method_sk,
            quantity,
            unit_price,
            discount_percentage,
            line_total,
            transaction_total,
            shipping_address,
        )| FactSaleRow {
            sale_sk,
            transaction_id,
            item_id,
            customer_sk,
            product_sk,
            date_sk,
            payment_method_sk,
            quantity,
            unit_price,
            discount_percentage,
            line_total,
            transaction_total,
            shipping_address,
        },
    ))
}
