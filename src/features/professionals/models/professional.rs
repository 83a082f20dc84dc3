use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Database model for professional
#[derive(Debug, Clone, FromRow)]
pub struct Professional {
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

/// Projection used by import validation and duplicate detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProfessionalSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub headline: String,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Professional> for ProfessionalSummary {
    fn from(p: &Professional) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            headline: p.headline.clone(),
            city: p.city.clone(),
            created_at: p.created_at,
        }
    }
}

/// Data for creating a new professional
#[derive(Debug, Clone, Default)]
pub struct NewProfessional {
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
    pub category_id: Uuid,
}

/// Partial update; `None` leaves the column untouched
/// Partial update; `None` keeps a field, an empty optional value clears it
#[derive(Debug, Clone, Default)]
pub struct ProfessionalPatch {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
    pub category_id: Option<Uuid>,
}

/// Filters for listing/counting professionals
#[derive(Debug, Clone, Default)]
pub struct ProfessionalFilter {
    /// Case-insensitive substring match on name, headline or city
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub city: Option<String>,
    pub available: Option<bool>,
}
