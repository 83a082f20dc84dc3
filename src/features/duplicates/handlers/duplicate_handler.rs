use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::duplicates::dtos::{
    DuplicateScanDto, ResolveDuplicatesDto, ResolveDuplicatesResultDto,
};
use crate::features::duplicates::services::DuplicateService;
use crate::shared::types::ApiResponse;

/// Scan professionals for duplicates
#[utoipa::path(
    get,
    path = "/api/admin/duplicates",
    responses(
        (status = 200, description = "Duplicate groups from a fresh scan", body = ApiResponse<DuplicateScanDto>),
    ),
    tag = "admin-duplicates"
)]
pub async fn scan_duplicates(
    State(service): State<Arc<DuplicateService>>,
) -> Result<Json<ApiResponse<DuplicateScanDto>>> {
    let scan = service.scan().await?;
    Ok(Json(ApiResponse::success(Some(scan), None, None)))
}

/// Delete duplicates, keeping one professional per group
#[utoipa::path(
    post,
    path = "/api/admin/duplicates/resolve",
    request_body = ResolveDuplicatesDto,
    responses(
        (status = 200, description = "Duplicates removed", body = ApiResponse<ResolveDuplicatesResultDto>),
    ),
    tag = "admin-duplicates"
)]
pub async fn resolve_duplicates(
    State(service): State<Arc<DuplicateService>>,
    AppJson(dto): AppJson<ResolveDuplicatesDto>,
) -> Result<Json<ApiResponse<ResolveDuplicatesResultDto>>> {
    let result = service.resolve(dto.keep_oldest).await?;
    let message = if result.removed == 0 {
        "No duplicates found".to_string()
    } else {
        format!("Removed {} duplicate professional(s)", result.removed)
    };
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
