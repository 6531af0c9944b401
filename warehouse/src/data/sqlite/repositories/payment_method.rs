//! Payment method dimension repository

use sqlx::SqliteConnection;

use crate::data::sqlite::SqliteError;
use crate::data::types::{PaymentCategory, PaymentMethodRow};

/// Check whether a normalized payment method id is already present
pub async fn payment_method_exists(
    conn: &mut SqliteConnection,
    payment_method_id: &str,
) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM dim_payment_method WHERE payment_method_id = ?)",
    )
    .bind(payment_method_id)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

/// Insert a payment method row and return its surrogate key
///
/// A duplicate id is a constraint violation; callers check existence first.
pub async fn insert_payment_method(
    conn: &mut SqliteConnection,
    row: &PaymentMethodRow,
) -> Result<i64, SqliteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO dim_payment_method
            (payment_method_id, payment_method_name, category, is_active)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&row.payment_method_id)
    .bind(&row.payment_method_name)
    .bind(row.category.as_str())
    .bind(row.is_active)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get a payment method by normalized id
pub async fn get_payment_method(
    conn: &mut SqliteConnection,
    payment_method_id: &str,
) -> Result<Option<PaymentMethodRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String, String, String, bool)>(
        r#"
        SELECT payment_method_sk, payment_method_id, payment_method_name, category, is_active
        FROM dim_payment_method
        WHERE payment_method_id = ?
        "#,
    )
    .bind(payment_method_id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|(sk, id, name, category, is_active)| PaymentMethodRow {
        payment_method_sk: Some(sk),
        payment_method_id: id,
        payment_method_name: name,
        category: PaymentCategory::from_stored(&category),
        is_active,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::test_pool;

    fn upi() -> PaymentMethodRow {
        PaymentMethodRow {
            payment_method_sk: None,
            payment_method_id: "upi".to_string(),
            payment_method_name: "UPI".to_string(),
            category: PaymentCategory::Digital,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_payment_method() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(!payment_method_exists(&mut conn, "upi").await.unwrap());
        let sk = insert_payment_method(&mut conn, &upi()).await.unwrap();
        assert!(payment_method_exists(&mut conn, "upi").await.unwrap());

        let stored = get_payment_method(&mut conn, "upi").await.unwrap().unwrap();
        assert_eq!(stored.payment_method_sk, Some(sk));
        assert_eq!(stored.category, PaymentCategory::Digital);
        assert_eq!(stored.payment_method_name, "UPI");
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_constraint_violation() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        insert_payment_method(&mut conn, &upi()).await.unwrap();
        let err = insert_payment_method(&mut conn, &upi()).await.unwrap_err();
        assert!(err.is_unique_violation());
    }
}
