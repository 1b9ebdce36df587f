//! Resolves the Clover bearer token stored for a merchant.

use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("merchant {0} is not registered")]
    UnknownMerchant(String),
    #[error("merchant {0} has no Clover access token")]
    MissingToken(String),
    #[error(transparent)]
    Db(#[from] bitewise_db::DbError),
}

/// Returns the access token for `merchant_id` (the Clover merchant id).
///
/// # Errors
///
/// - [`CredentialError::UnknownMerchant`] if no merchant row matches.
/// - [`CredentialError::MissingToken`] if the row has no usable token.
/// - [`CredentialError::Db`] if the lookup query fails.
pub async fn resolve_access_token(
    pool: &PgPool,
    merchant_id: &str,
) -> Result<String, CredentialError> {
    let row = bitewise_db::get_merchant_credential(pool, merchant_id)
        .await?
        .ok_or_else(|| CredentialError::UnknownMerchant(merchant_id.to_owned()))?;

    row.usable_token()
        .map(str::to_owned)
        .ok_or_else(|| CredentialError::MissingToken(merchant_id.to_owned()))
}
