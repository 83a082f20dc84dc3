use std::collections::HashSet;

use crate::core::error::Result;
use crate::features::duplicates::detector::detect_duplicates;
use crate::features::duplicates::dtos::{DuplicateScanDto, ResolveDuplicatesResultDto};
use crate::features::duplicates::resolver::resolve_duplicates;
use crate::modules::store::SharedStore;

/// Service for duplicate detection and cleanup
pub struct DuplicateService {
    store: SharedStore,
}

impl DuplicateService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Scan stored professionals for duplicate groups
    pub async fn scan(&self) -> Result<DuplicateScanDto> {
        let professionals = self.store.professional_summaries().await?;
        let groups = detect_duplicates(&professionals);
        let affected_professionals = groups
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.id))
            .collect::<HashSet<_>>()
            .len();

        Ok(DuplicateScanDto {
            groups,
            affected_professionals,
        })
    }

    /// Rescan and delete every duplicate except one survivor per group
    pub async fn resolve(&self, keep_oldest: bool) -> Result<ResolveDuplicatesResultDto> {
        let professionals = self.store.professional_summaries().await?;
        let groups = detect_duplicates(&professionals);
        let removed = resolve_duplicates(self.store.as_ref(), &groups, keep_oldest).await?;

        Ok(ResolveDuplicatesResultDto {
            removed,
            groups_resolved: groups.len(),
        })
    }
}
