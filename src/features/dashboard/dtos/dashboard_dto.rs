use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryStatsDto {
    pub total: i64,
    pub active: i64,
    pub views: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalStatsDto {
    pub total: i64,
    pub available: i64,
    pub views: i64,
}

/// Admin dashboard counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub categories: CategoryStatsDto,
    pub professionals: ProfessionalStatsDto,
}
