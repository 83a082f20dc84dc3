use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::imports::dtos::{
    CreatedDomainsDto, ImportCommitDto, ImportPreviewDto, ImportRowsDto, ImportUploadDto,
    TemplateQuery,
};
use crate::features::imports::parser::ImportTarget;
use crate::features::imports::services::{CommitOutcome, ImportService};
use crate::shared::types::ApiResponse;

/// Parse and validate an import file
///
/// Accepts multipart/form-data with a `file` field holding a `.csv` or
/// `.json` document. Nothing is written to the store.
#[utoipa::path(
    post,
    path = "/api/admin/imports/{target}/validate",
    params(
        ("target" = ImportTarget, Path, description = "`categories` or `professionals`")
    ),
    request_body(
        content = ImportUploadDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Rows parsed and validated", body = ApiResponse<ImportPreviewDto>),
        (status = 400, description = "Unreadable file, unsupported type or missing columns"),
        (status = 413, description = "File too large")
    ),
    tag = "admin-imports"
)]
pub async fn validate_upload(
    State(service): State<Arc<ImportService>>,
    Path(target): Path<ImportTarget>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportPreviewDto>>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some("file") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or("unnamed").to_string();
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;
        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let preview = service.validate_upload(target, &file_name, &data).await?;

    Ok(Json(ApiResponse::success(Some(preview), None, None)))
}

/// Re-validate reviewed rows
#[utoipa::path(
    post,
    path = "/api/admin/imports/{target}/revalidate",
    params(
        ("target" = ImportTarget, Path, description = "`categories` or `professionals`")
    ),
    request_body = ImportRowsDto,
    responses(
        (status = 200, description = "Rows validated", body = ApiResponse<ImportPreviewDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-imports"
)]
pub async fn revalidate_rows(
    State(service): State<Arc<ImportService>>,
    Path(target): Path<ImportTarget>,
    ValidatedJson(dto): ValidatedJson<ImportRowsDto>,
) -> Result<Json<ApiResponse<ImportPreviewDto>>> {
    let preview = service.revalidate(target, dto.rows).await?;
    Ok(Json(ApiResponse::success(Some(preview), None, None)))
}

/// Create the missing categories referenced by professional rows
#[utoipa::path(
    post,
    path = "/api/admin/imports/professionals/domains",
    request_body = ImportRowsDto,
    responses(
        (status = 200, description = "Categories created and rows re-validated", body = ApiResponse<CreatedDomainsDto>),
        (status = 400, description = "No missing domains to create")
    ),
    tag = "admin-imports"
)]
pub async fn create_missing_domains(
    State(service): State<Arc<ImportService>>,
    ValidatedJson(dto): ValidatedJson<ImportRowsDto>,
) -> Result<Json<ApiResponse<CreatedDomainsDto>>> {
    let result = service.create_missing_domains(dto.rows).await?;
    let message = format!("Created {} categories", result.created);
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}

/// Validate and insert rows
///
/// Rows are inserted only when validation reports no errors; otherwise the
/// report is returned with status 422 and nothing is written.
#[utoipa::path(
    post,
    path = "/api/admin/imports/{target}/commit",
    params(
        ("target" = ImportTarget, Path, description = "`categories` or `professionals`")
    ),
    request_body = ImportRowsDto,
    responses(
        (status = 201, description = "Rows inserted", body = ApiResponse<ImportCommitDto>),
        (status = 422, description = "Rows have validation errors", body = ApiResponse<ImportPreviewDto>),
        (status = 400, description = "Validation error or unknown domain")
    ),
    tag = "admin-imports"
)]
pub async fn commit_rows(
    State(service): State<Arc<ImportService>>,
    Path(target): Path<ImportTarget>,
    ValidatedJson(dto): ValidatedJson<ImportRowsDto>,
) -> Result<Response> {
    let response = match service.commit(target, dto.rows).await? {
        CommitOutcome::Inserted(result) => {
            let message = format!("Successfully imported {} {}", result.inserted, target.as_str());
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(Some(result), Some(message), None)),
            )
                .into_response()
        }
        CommitOutcome::Rejected(preview) => {
            let message = format!(
                "Import has {} validation error(s)",
                preview.report.errors.len()
            );
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::failure(preview, Some(message))),
            )
                .into_response()
        }
    };
    Ok(response)
}

/// Download an example import file
#[utoipa::path(
    get,
    path = "/api/admin/imports/{target}/template",
    params(
        ("target" = ImportTarget, Path, description = "`categories` or `professionals`"),
        TemplateQuery
    ),
    responses(
        (status = 200, description = "Template file", content_type = "text/csv")
    ),
    tag = "admin-imports"
)]
pub async fn download_template(
    State(service): State<Arc<ImportService>>,
    Path(target): Path<ImportTarget>,
    Query(query): Query<TemplateQuery>,
) -> Response {
    let template = service.template(target, query.format);
    (
        [
            (header::CONTENT_TYPE, template.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", template.file_name),
            ),
        ],
        template.body,
    )
        .into_response()
}
