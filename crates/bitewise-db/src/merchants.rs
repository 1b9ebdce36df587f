//! Database operations for the `merchants` table.

use bitewise_core::Merchant;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Public columns of a `merchants` row. The access token is never selected here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MerchantRow {
    pub id: i64,
    pub clover_merchant_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<MerchantRow> for Merchant {
    fn from(row: MerchantRow) -> Self {
        Self {
            db_id: row.id,
            external_merchant_id: row.clover_merchant_id,
            name: row.name,
        }
    }
}

/// A merchant's upstream credential.
#[derive(Clone, sqlx::FromRow)]
pub struct MerchantCredentialRow {
    pub id: i64,
    pub clover_merchant_id: String,
    pub access_token: Option<String>,
}

impl MerchantCredentialRow {
    /// The stored token, or `None` when it is absent or blank.
    #[must_use]
    pub fn usable_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

impl std::fmt::Debug for MerchantCredentialRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantCredentialRow")
            .field("id", &self.id)
            .field("clover_merchant_id", &self.clover_merchant_id)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every merchant in primary-key order. No filtering, no pagination.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_merchants(pool: &PgPool) -> Result<Vec<MerchantRow>, DbError> {
    let rows = sqlx::query_as::<_, MerchantRow>(
        "SELECT id, clover_merchant_id, name, created_at \
         FROM merchants \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Looks up the stored credential for a Clover merchant id, or `None` if the
/// merchant is unknown.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_merchant_credential(
    pool: &PgPool,
    clover_merchant_id: &str,
) -> Result<Option<MerchantCredentialRow>, DbError> {
    let row = sqlx::query_as::<_, MerchantCredentialRow>(
        "SELECT id, clover_merchant_id, access_token \
         FROM merchants \
         WHERE clover_merchant_id = $1",
    )
    .bind(clover_merchant_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a merchant and returns its public row.
///
/// Onboarding owns merchant creation; this exists for seeding local and test
/// databases.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including unique violations
/// on `clover_merchant_id`).
pub async fn insert_merchant(
    pool: &PgPool,
    clover_merchant_id: &str,
    name: &str,
    access_token: Option<&str>,
) -> Result<MerchantRow, DbError> {
    let row = sqlx::query_as::<_, MerchantRow>(
        "INSERT INTO merchants (clover_merchant_id, name, access_token) \
         VALUES ($1, $2, $3) \
         RETURNING id, clover_merchant_id, name, created_at",
    )
    .bind(clover_merchant_id)
    .bind(name)
    .bind(access_token)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_row_converts_to_domain_merchant() {
        let row = MerchantRow {
            id: 3,
            clover_merchant_id: "QWERTY123".to_string(),
            name: "Bean There".to_string(),
            created_at: Utc::now(),
        };

        let merchant = Merchant::from(row);
        assert_eq!(merchant.db_id, 3);
        assert_eq!(merchant.external_merchant_id, "QWERTY123");
        assert_eq!(merchant.name, "Bean There");
    }

    #[test]
    fn credential_debug_redacts_token() {
        let row = MerchantCredentialRow {
            id: 1,
            clover_merchant_id: "M1".to_string(),
            access_token: Some("secret-token".to_string()),
        };
        let rendered = format!("{row:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn blank_or_missing_token_is_not_usable() {
        let mut row = MerchantCredentialRow {
            id: 1,
            clover_merchant_id: "M1".to_string(),
            access_token: Some(" \t".to_string()),
        };
        assert_eq!(row.usable_token(), None);

        row.access_token = None;
        assert_eq!(row.usable_token(), None);

        row.access_token = Some("tok".to_string());
        assert_eq!(row.usable_token(), Some("tok"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_merchants_returns_rows_in_insertion_order(pool: PgPool) {
        insert_merchant(&pool, "M-B", "Second Name First", Some("tok-b"))
            .await
            .expect("insert first");
        insert_merchant(&pool, "M-A", "Alpha", None)
            .await
            .expect("insert second");

        let rows = list_merchants(&pool).await.expect("list merchants");
        let ids: Vec<&str> = rows.iter().map(|r| r.clover_merchant_id.as_str()).collect();
        assert_eq!(ids, vec!["M-B", "M-A"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn get_merchant_credential_returns_none_for_unknown_merchant(pool: PgPool) {
        let row = get_merchant_credential(&pool, "missing")
            .await
            .expect("query should succeed");
        assert!(row.is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn get_merchant_credential_returns_stored_token(pool: PgPool) {
        insert_merchant(&pool, "M-TOK", "Token Cafe", Some("tok-123"))
            .await
            .expect("insert merchant");

        let row = get_merchant_credential(&pool, "M-TOK")
            .await
            .expect("query should succeed")
            .expect("merchant exists");
        assert_eq!(row.access_token.as_deref(), Some("tok-123"));
    }
}
