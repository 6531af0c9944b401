//! Read-only queries against the production contract tables

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::data::sqlite::SqliteError;

/// Earliest and latest transaction date, `None` when there are no transactions
pub async fn transaction_date_range(
    conn: &mut SqliteConnection,
) -> Result<Option<(NaiveDate, NaiveDate)>, SqliteError> {
    let (min, max): (Option<NaiveDate>, Option<NaiveDate>) = sqlx::query_as(
        "SELECT MIN(transaction_date), MAX(transaction_date) FROM production_transactions",
    )
    .fetch_one(conn)
    .await?;

    Ok(min.zip(max))
}

/// Distinct non-null raw payment method labels, sorted
pub async fn distinct_payment_methods(
    conn: &mut SqliteConnection,
) -> Result<Vec<String>, SqliteError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT DISTINCT payment_method
        FROM production_transactions
        WHERE payment_method IS NOT NULL AND payment_method <> ''
        ORDER BY payment_method
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(|(label,)| label).collect())
}

/// Fixtures standing in for the upstream cleansing pipeline
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub async fn insert_customer(conn: &mut SqliteConnection, customer_id: &str, is_active: bool) {
        sqlx::query(
            r#"
            INSERT INTO production_customers
                (customer_id, first_name, last_name, email, phone, city, state, country,
                 age_group, registration_date, is_active)
            VALUES (?, 'Asha', 'Rao', ?, '5550100', 'Pune', 'MH', 'India', '26-35', '2023-06-01', ?)
            "#,
        )
        .bind(customer_id)
        .bind(format!("{}@example.com", customer_id.to_lowercase()))
        .bind(is_active)
        .execute(conn)
        .await
        .unwrap();
    }

    pub async fn insert_product(conn: &mut SqliteConnection, product_id: &str, is_active: bool) {
        sqlx::query(
            r#"
            INSERT INTO production_products
                (product_id, product_name, category, sub_category, price, cost, brand,
                 stock_quantity, supplier_id, is_active)
            VALUES (?, ?, 'Electronics', 'General', 15.0, 7.5, 'Acme', 100, 'SUP0001', ?)
            "#,
        )
        .bind(product_id)
        .bind(format!("Product {}", product_id))
        .bind(is_active)
        .execute(conn)
        .await
        .unwrap();
    }

    pub async fn insert_transaction(
        conn: &mut SqliteConnection,
        transaction_id: &str,
        customer_id: &str,
        date: &str,
        payment_method: Option<&str>,
        total_amount: f64,
    ) {
        sqlx::query(
            r#"
            INSERT INTO production_transactions
                (transaction_id, customer_id, transaction_date, transaction_time,
                 payment_method, shipping_address, total_amount)
            VALUES (?, ?, ?, '12:00:00', ?, '1 Main St, Pune', ?)
            "#,
        )
        .bind(transaction_id)
        .bind(customer_id)
        .bind(date)
        .bind(payment_method)
        .bind(total_amount)
        .execute(conn)
        .await
        .unwrap();
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item(
        conn: &mut SqliteConnection,
        item_id: &str,
        transaction_id: &str,
        product_id: &str,
        quantity: i64,
        unit_price: f64,
        discount_percentage: f64,
        line_total: f64,
    ) {
        sqlx::query(
            r#"
            INSERT INTO production_transaction_items
                (item_id, transaction_id, product_id, quantity, unit_price,
                 discount_percentage, line_total)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(transaction_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(discount_percentage)
        .bind(line_total)
        .execute(conn)
        .await
        .unwrap();
    }

    pub async fn set_customer_active(conn: &mut SqliteConnection, customer_id: &str, active: bool) {
        sqlx::query("UPDATE production_customers SET is_active = ? WHERE customer_id = ?")
            .bind(active)
            .bind(customer_id)
            .execute(conn)
            .await
            .unwrap();
    }

    pub async fn set_product_active(conn: &mut SqliteConnection, product_id: &str, active: bool) {
        sqlx::query("UPDATE production_products SET is_active = ? WHERE product_id = ?")
            .bind(active)
            .bind(product_id)
            .execute(conn)
            .await
            .unwrap();
    }
}
