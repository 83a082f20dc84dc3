use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::professionals::models::Professional;
use crate::shared::constants::{
    ADDRESS_MAX_LENGTH, CITY_MAX_LENGTH, EMAIL_MAX_LENGTH, PHONE_MAX_LENGTH,
    PROFESSIONAL_BIO_MAX_LENGTH, PROFESSIONAL_HEADLINE_MAX_LENGTH, PROFESSIONAL_NAME_MAX_LENGTH,
};
use crate::shared::types::{default_page, default_page_size, PageRequest, SortDirection};

/// Response DTO for professional
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalResponseDto {
    pub id: Uuid,
    pub full_name: String,
    pub headline: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub available: bool,
    pub views: i64,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Professional> for ProfessionalResponseDto {
    fn from(p: Professional) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            headline: p.headline,
            bio: p.bio,
            email: p.email,
            phone: p.phone,
            website: p.website,
            linkedin_url: p.linkedin_url,
            instagram_url: p.instagram_url,
            city: p.city,
            address: p.address,
            image_url: p.image_url,
            available: p.available,
            views: p.views,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Query params for listing professionals
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProfessionalQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in full name, headline or city
    pub search: Option<String>,
    /// Filter by category
    pub category_id: Option<Uuid>,
    /// Filter by city (case-insensitive exact match)
    pub city: Option<String>,
    /// Filter by availability
    pub available: Option<bool>,
    /// Sort direction by creation date (default: desc)
    #[serde(default)]
    pub sort: SortDirection,
}

impl ProfessionalQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfessionalDto {
    #[validate(length(min = 1, max = (PROFESSIONAL_NAME_MAX_LENGTH as u64)))]
    pub full_name: String,

    #[validate(length(min = 1, max = (PROFESSIONAL_HEADLINE_MAX_LENGTH as u64)))]
    pub headline: String,

    #[validate(length(max = (PROFESSIONAL_BIO_MAX_LENGTH as u64)))]
    pub bio: Option<String>,

    #[validate(email, length(max = (EMAIL_MAX_LENGTH as u64)))]
    pub email: Option<String>,

    #[validate(length(max = (PHONE_MAX_LENGTH as u64)))]
    pub phone: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(url)]
    pub linkedin_url: Option<String>,

    #[validate(url)]
    pub instagram_url: Option<String>,

    #[validate(length(max = (CITY_MAX_LENGTH as u64)))]
    pub city: Option<String>,

    #[validate(length(max = (ADDRESS_MAX_LENGTH as u64)))]
    pub address: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    /// Defaults to true
    pub available: Option<bool>,

    pub category_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfessionalDto {
    #[validate(length(min = 1, max = (PROFESSIONAL_NAME_MAX_LENGTH as u64)))]
    pub full_name: Option<String>,

    #[validate(length(min = 1, max = (PROFESSIONAL_HEADLINE_MAX_LENGTH as u64)))]
    pub headline: Option<String>,

    #[validate(length(max = (PROFESSIONAL_BIO_MAX_LENGTH as u64)))]
    pub bio: Option<String>,

    #[validate(email, length(max = (EMAIL_MAX_LENGTH as u64)))]
    pub email: Option<String>,

    #[validate(length(max = (PHONE_MAX_LENGTH as u64)))]
    pub phone: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(url)]
    pub linkedin_url: Option<String>,

    #[validate(url)]
    pub instagram_url: Option<String>,

    #[validate(length(max = (CITY_MAX_LENGTH as u64)))]
    pub city: Option<String>,

    #[validate(length(max = (ADDRESS_MAX_LENGTH as u64)))]
    pub address: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    pub available: Option<bool>,

    pub category_id: Option<Uuid>,
}

/// Set the same availability on several professionals
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkAvailabilityDto {
    #[validate(length(min = 1, max = 500, message = "Select between 1 and 500 records"))]
    pub ids: Vec<Uuid>,
    pub available: bool,
}
