use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::duplicates::{
    detector as duplicates_detector, dtos as duplicates_dtos, handlers as duplicates_handlers,
};
use crate::features::imports::{
    dtos as imports_dtos, handlers as imports_handlers, parser as imports_parser,
    validation as imports_validation, workflow as imports_workflow,
};
use crate::features::professionals::{
    dtos as professionals_dtos, handlers as professionals_handlers,
    models as professionals_models,
};
use crate::shared::bulk::{BulkFailure, BulkIdsDto, BulkOutcome};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        // Categories (admin)
        categories_handlers::admin_list_categories,
        categories_handlers::admin_get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::bulk_set_category_status,
        categories_handlers::bulk_delete_categories,
        // Professionals (public)
        professionals_handlers::list_professionals,
        professionals_handlers::get_professional,
        // Professionals (admin)
        professionals_handlers::admin_get_professional,
        professionals_handlers::create_professional,
        professionals_handlers::update_professional,
        professionals_handlers::delete_professional,
        professionals_handlers::bulk_set_availability,
        professionals_handlers::bulk_delete_professionals,
        // Imports
        imports_handlers::validate_upload,
        imports_handlers::revalidate_rows,
        imports_handlers::create_missing_domains,
        imports_handlers::commit_rows,
        imports_handlers::download_template,
        // Duplicates
        duplicates_handlers::scan_duplicates,
        duplicates_handlers::resolve_duplicates,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            Meta,
            BulkIdsDto,
            BulkFailure,
            BulkOutcome,
            ApiResponse<BulkOutcome>,
            // Categories
            categories_models::CategoryStatus,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::BulkCategoryStatusDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Professionals
            professionals_models::ProfessionalSummary,
            professionals_dtos::ProfessionalResponseDto,
            professionals_dtos::CreateProfessionalDto,
            professionals_dtos::UpdateProfessionalDto,
            professionals_dtos::BulkAvailabilityDto,
            ApiResponse<professionals_dtos::ProfessionalResponseDto>,
            ApiResponse<Vec<professionals_dtos::ProfessionalResponseDto>>,
            // Imports
            imports_parser::ImportTarget,
            imports_parser::ImportFormat,
            imports_parser::ParsedRow,
            imports_validation::SimilarityConfidence,
            imports_validation::ValidationErrorKind,
            imports_validation::ValidationError,
            imports_validation::ValidationReport,
            imports_workflow::ImportState,
            imports_dtos::ImportUploadDto,
            imports_dtos::ImportRowsDto,
            imports_dtos::ImportPreviewDto,
            imports_dtos::CreatedDomainsDto,
            imports_dtos::ImportCommitDto,
            ApiResponse<imports_dtos::ImportPreviewDto>,
            ApiResponse<imports_dtos::CreatedDomainsDto>,
            ApiResponse<imports_dtos::ImportCommitDto>,
            // Duplicates
            duplicates_detector::MatchType,
            duplicates_detector::DuplicateGroup,
            duplicates_dtos::DuplicateScanDto,
            duplicates_dtos::ResolveDuplicatesDto,
            duplicates_dtos::ResolveDuplicatesResultDto,
            ApiResponse<duplicates_dtos::DuplicateScanDto>,
            ApiResponse<duplicates_dtos::ResolveDuplicatesResultDto>,
            // Dashboard
            dashboard_dtos::CategoryStatsDto,
            dashboard_dtos::ProfessionalStatsDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "categories", description = "Service categories (public)"),
        (name = "professionals", description = "Professional directory (public)"),
        (name = "admin-categories", description = "Category management"),
        (name = "admin-professionals", description = "Professional management"),
        (name = "admin-imports", description = "CSV/JSON bulk import with validation"),
        (name = "admin-duplicates", description = "Duplicate professional detection and cleanup"),
        (name = "admin-dashboard", description = "Directory statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Professionals Directory API",
        version = "0.1.0",
        description = "API documentation for the professionals directory",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP basic security scheme guarding admin routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
