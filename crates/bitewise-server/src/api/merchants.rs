use axum::{
    extract::{Path, State},
    Extension, Json,
};
use bitewise_core::{Category, Merchant};

use crate::credentials::resolve_access_token;
use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

pub(super) async fn list_merchants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Merchant>>, ApiError> {
    let rows = bitewise_db::list_merchants(&state.pool)
        .await
        .map_err(|e| map_db_error(&e))?;

    Ok(Json(rows.into_iter().map(Merchant::from).collect()))
}

pub(super) async fn get_merchant_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(merchant_id): Path<String>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let token = resolve_access_token(&state.pool, &merchant_id).await?;

    let categories = state
        .clover
        .fetch_category_catalog(&merchant_id, &token)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                request_id = %req_id.0,
                merchant_id = %merchant_id,
                error = %e,
                "clover catalog fetch failed"
            );
        })?;

    Ok(Json(categories))
}
