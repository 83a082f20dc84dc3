use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::duplicates::detector::DuplicateGroup;

fn default_keep_oldest() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveDuplicatesDto {
    /// Keep the oldest member of each group (default) or the newest
    #[serde(default = "default_keep_oldest")]
    pub keep_oldest: bool,
}

/// Result of a duplicate scan
#[derive(Debug, Serialize, ToSchema)]
pub struct DuplicateScanDto {
    pub groups: Vec<DuplicateGroup>,
    /// Distinct professionals appearing in at least one group
    pub affected_professionals: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolveDuplicatesResultDto {
    pub removed: u64,
    pub groups_resolved: usize,
}
