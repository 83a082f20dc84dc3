use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Category status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "category_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryStatus::Active => write!(f, "active"),
            CategoryStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Case-insensitive, whitespace-tolerant parse used at the import boundary
impl FromStr for CategoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(CategoryStatus::Active),
            "inactive" => Ok(CategoryStatus::Inactive),
            other => Err(format!("Unknown category status '{}'", other)),
        }
    }
}

/// Database model for category, including the derived professional count
#[derive(Debug, Clone, FromRow)]
pub struct Category {
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

/// Minimal id/name pair used for name lookups during import
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Data for creating a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub icon: Option<String>,
}

/// Partial update; `None` leaves the column untouched
/// Partial update; `None` keeps a field, an empty description or icon clears it
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<CategoryStatus>,
    pub icon: Option<String>,
}

/// Filters for listing/counting categories
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    /// Case-insensitive substring match on name or description
    pub search: Option<String>,
    pub status: Option<CategoryStatus>,
}
