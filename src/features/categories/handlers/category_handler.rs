use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::categories::dtos::{
    BulkCategoryStatusDto, CategoryQueryParams, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::bulk::{BulkIdsDto, BulkOutcome};
use crate::shared::types::{ApiResponse, Meta};

// ============================================================================
// Public
// ============================================================================

/// List all active categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of active categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_active().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Get an active category by ID
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.view_active(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

// ============================================================================
// Admin
// ============================================================================

/// List categories with pagination and filters
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    params(CategoryQueryParams),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "admin-categories"
)]
pub async fn admin_list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<CategoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (categories, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Get any category by ID
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "admin-categories"
)]
pub async fn admin_get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "admin-categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "admin-categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category that has no professionals
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted successfully"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has professionals")
    ),
    tag = "admin-categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

/// Set the status of several categories
#[utoipa::path(
    post,
    path = "/api/admin/categories/bulk/status",
    request_body = BulkCategoryStatusDto,
    responses(
        (status = 200, description = "Per-item outcome of the bulk update", body = ApiResponse<BulkOutcome>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-categories"
)]
pub async fn bulk_set_category_status(
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<BulkCategoryStatusDto>,
) -> Result<Json<ApiResponse<BulkOutcome>>> {
    let outcome = service.bulk_set_status(&dto.ids, dto.status).await;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}

/// Delete several categories
#[utoipa::path(
    post,
    path = "/api/admin/categories/bulk/delete",
    request_body = BulkIdsDto,
    responses(
        (status = 200, description = "Per-item outcome of the bulk delete", body = ApiResponse<BulkOutcome>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-categories"
)]
pub async fn bulk_delete_categories(
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<BulkIdsDto>,
) -> Result<Json<ApiResponse<BulkOutcome>>> {
    let outcome = service.bulk_delete(&dto.ids).await;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::features::categories::models::CategoryStatus;
    use crate::features::categories::routes::{admin_routes, routes};
    use crate::features::categories::services::CategoryService;
    use crate::shared::test_helpers::{memory_store, test_server};

    #[tokio::test]
    async fn test_create_then_conflict() {
        let service = Arc::new(CategoryService::new(memory_store()));
        let server = test_server(admin_routes(service));

        let response = server
            .post("/categories")
            .json(&json!({ "name": "Plumbing", "icon": "🔧" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "active");
        assert_eq!(body["data"]["professional_count"], 0);

        let response = server
            .post("/categories")
            .json(&json!({ "name": "plumbing" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_validates_body() {
        let service = Arc::new(CategoryService::new(memory_store()));
        let server = test_server(admin_routes(service));

        let response = server.post("/categories").json(&json!({ "name": "" })).await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_public_listing_hides_inactive() {
        let store = memory_store();
        store.seed_category("Plumbing", CategoryStatus::Active).await;
        let roofing = store.seed_category("Roofing", CategoryStatus::Inactive).await;
        let server = test_server(routes(Arc::new(CategoryService::new(store))));

        let response = server.get("/api/categories").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Plumbing");

        server
            .get(&format!("/api/categories/{}", roofing.id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_bulk_status_tallies_failures() {
        let store = memory_store();
        let plumbing = store.seed_category("Plumbing", CategoryStatus::Active).await;
        let missing = uuid::Uuid::new_v4();
        let server = test_server(admin_routes(Arc::new(CategoryService::new(store))));

        let response = server
            .post("/categories/bulk/status")
            .json(&json!({ "ids": [plumbing.id, missing], "status": "inactive" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Successfully updated 1; 1 failed");
        assert_eq!(body["data"]["failed"][0]["id"], missing.to_string());
    }
}
