use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::professionals::dtos::{
    BulkAvailabilityDto, CreateProfessionalDto, ProfessionalQueryParams, ProfessionalResponseDto,
    UpdateProfessionalDto,
};
use crate::features::professionals::services::ProfessionalService;
use crate::shared::bulk::{BulkIdsDto, BulkOutcome};
use crate::shared::types::{ApiResponse, Meta};

/// List professionals in the public directory
#[utoipa::path(
    get,
    path = "/api/professionals",
    params(ProfessionalQueryParams),
    responses(
        (status = 200, description = "Professionals retrieved successfully", body = ApiResponse<Vec<ProfessionalResponseDto>>),
    ),
    tag = "professionals"
)]
pub async fn list_professionals(
    State(service): State<Arc<ProfessionalService>>,
    Query(params): Query<ProfessionalQueryParams>,
) -> Result<Json<ApiResponse<Vec<ProfessionalResponseDto>>>> {
    let (professionals, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(professionals),
        None,
        Some(Meta { total }),
    )))
}

/// Get a professional profile
#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    responses(
        (status = 200, description = "Professional found", body = ApiResponse<ProfessionalResponseDto>),
        (status = 404, description = "Professional not found")
    ),
    tag = "professionals"
)]
pub async fn get_professional(
    State(service): State<Arc<ProfessionalService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfessionalResponseDto>>> {
    let professional = service.view(id).await?;
    Ok(Json(ApiResponse::success(Some(professional), None, None)))
}

/// Get a professional without counting a view
#[utoipa::path(
    get,
    path = "/api/admin/professionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    responses(
        (status = 200, description = "Professional found", body = ApiResponse<ProfessionalResponseDto>),
        (status = 404, description = "Professional not found")
    ),
    tag = "admin-professionals"
)]
pub async fn admin_get_professional(
    State(service): State<Arc<ProfessionalService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfessionalResponseDto>>> {
    let professional = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(professional), None, None)))
}

/// Create a professional
#[utoipa::path(
    post,
    path = "/api/admin/professionals",
    request_body = CreateProfessionalDto,
    responses(
        (status = 201, description = "Professional created successfully", body = ApiResponse<ProfessionalResponseDto>),
        (status = 400, description = "Validation error or unknown category")
    ),
    tag = "admin-professionals"
)]
pub async fn create_professional(
    State(service): State<Arc<ProfessionalService>>,
    ValidatedJson(dto): ValidatedJson<CreateProfessionalDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProfessionalResponseDto>>)> {
    let professional = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(professional), None, None)),
    ))
}

/// Update a professional
#[utoipa::path(
    put,
    path = "/api/admin/professionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    request_body = UpdateProfessionalDto,
    responses(
        (status = 200, description = "Professional updated successfully", body = ApiResponse<ProfessionalResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Professional not found")
    ),
    tag = "admin-professionals"
)]
pub async fn update_professional(
    State(service): State<Arc<ProfessionalService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfessionalDto>,
) -> Result<Json<ApiResponse<ProfessionalResponseDto>>> {
    let professional = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(professional), None, None)))
}

/// Delete a professional
#[utoipa::path(
    delete,
    path = "/api/admin/professionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    responses(
        (status = 200, description = "Professional deleted successfully"),
        (status = 404, description = "Professional not found")
    ),
    tag = "admin-professionals"
)]
pub async fn delete_professional(
    State(service): State<Arc<ProfessionalService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Professional deleted successfully".to_string()),
        None,
    )))
}

/// Set availability on several professionals
#[utoipa::path(
    post,
    path = "/api/admin/professionals/bulk/availability",
    request_body = BulkAvailabilityDto,
    responses(
        (status = 200, description = "Per-item outcome of the bulk update", body = ApiResponse<BulkOutcome>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-professionals"
)]
pub async fn bulk_set_availability(
    State(service): State<Arc<ProfessionalService>>,
    ValidatedJson(dto): ValidatedJson<BulkAvailabilityDto>,
) -> Result<Json<ApiResponse<BulkOutcome>>> {
    let outcome = service.bulk_set_availability(&dto.ids, dto.available).await;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}

/// Delete several professionals
#[utoipa::path(
    post,
    path = "/api/admin/professionals/bulk/delete",
    request_body = BulkIdsDto,
    responses(
        (status = 200, description = "Per-item outcome of the bulk delete", body = ApiResponse<BulkOutcome>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-professionals"
)]
pub async fn bulk_delete_professionals(
    State(service): State<Arc<ProfessionalService>>,
    ValidatedJson(dto): ValidatedJson<BulkIdsDto>,
) -> Result<Json<ApiResponse<BulkOutcome>>> {
    let outcome = service.bulk_delete(&dto.ids).await;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}
