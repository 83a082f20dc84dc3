use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryStatus};
use crate::shared::constants::{
    CATEGORY_DESCRIPTION_MAX_LENGTH, CATEGORY_ICON_MAX_LENGTH, CATEGORY_NAME_MAX_LENGTH,
};
use crate::shared::types::{default_page, default_page_size, PageRequest};

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub icon: Option<String>,
    pub views: i64,
    pub professional_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            status: c.status,
            icon: c.icon,
            views: c.views,
            professional_count: c.professional_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query params for the admin category listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CategoryQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in name or description
    pub search: Option<String>,
    /// Filter by status
    pub status: Option<CategoryStatus>,
}

impl CategoryQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = (CATEGORY_NAME_MAX_LENGTH as u64)))]
    pub name: String,

    #[validate(length(max = (CATEGORY_DESCRIPTION_MAX_LENGTH as u64)))]
    pub description: Option<String>,

    /// Defaults to active
    pub status: Option<CategoryStatus>,

    #[validate(length(max = (CATEGORY_ICON_MAX_LENGTH as u64)))]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = (CATEGORY_NAME_MAX_LENGTH as u64)))]
    pub name: Option<String>,

    #[validate(length(max = (CATEGORY_DESCRIPTION_MAX_LENGTH as u64)))]
    pub description: Option<String>,

    pub status: Option<CategoryStatus>,

    #[validate(length(max = (CATEGORY_ICON_MAX_LENGTH as u64)))]
    pub icon: Option<String>,
}

/// Set the same status on several categories
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkCategoryStatusDto {
    #[validate(length(min = 1, max = 500, message = "Select between 1 and 500 records"))]
    pub ids: Vec<Uuid>,
    pub status: CategoryStatus,
}
