//! Payment method reference dimension

use std::collections::BTreeMap;

use sqlx::SqliteConnection;

use super::error::WarehouseError;
use crate::data::sqlite::repositories::{
    distinct_payment_methods, insert_payment_method, payment_method_exists,
};
use crate::data::types::{PaymentCategory, PaymentMethodRow};

/// Business key for a raw label: ASCII lower-case with spaces as `_`.
///
/// Must agree with the `LOWER(REPLACE(.., ' ', '_'))` join in the fact loader;
/// SQLite's `LOWER` only folds ASCII.
pub fn normalize_payment_method(label: &str) -> String {
    label.to_ascii_lowercase().replace(' ', "_")
}

/// Dimension row for a raw label, keyed by its normalized id
pub fn payment_method_row(label: &str) -> PaymentMethodRow {
    PaymentMethodRow {
        payment_method_sk: None,
        payment_method_id: normalize_payment_method(label),
        payment_method_name: label.to_string(),
        category: PaymentCategory::classify(label),
        is_active: true,
    }
}

/// One row per normalized id. Labels are visited in sorted order so the
/// lexicographically first label of a colliding group is kept.
pub fn payment_method_rows<I, S>(labels: I) -> Vec<PaymentMethodRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<S> = labels.into_iter().collect();
    sorted.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

    let mut by_id: BTreeMap<String, PaymentMethodRow> = BTreeMap::new();
    for label in sorted {
        let row = payment_method_row(label.as_ref());
        by_id.entry(row.payment_method_id.clone()).or_insert(row);
    }
    by_id.into_values().collect()
}

/// Insert a row for every normalized id not yet in the dimension.
/// Existing rows keep their name and category.
pub async fn build_payment_method_dimension(
    conn: &mut SqliteConnection,
) -> Result<u64, WarehouseError> {
    let labels = distinct_payment_methods(conn).await?;

    let mut inserted = 0u64;
    for row in payment_method_rows(labels) {
        if payment_method_exists(conn, &row.payment_method_id).await? {
            continue;
        }
        let sk = insert_payment_method(conn, &row).await?;
        tracing::debug!(
            payment_method_id = %row.payment_method_id,
            category = %row.category,
            sk,
            "Payment method added"
        );
        inserted += 1;
    }

    Ok(inserted)
}
