//! Duplicate resolution: keep one survivor per group, delete the rest.

use std::collections::HashSet;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::duplicates::detector::DuplicateGroup;
use crate::modules::store::RecordStore;

/// Ids to delete so that every group keeps exactly one member.
///
/// The survivor of a group is its oldest member with `keep_oldest`, the newest
/// otherwise. Ids are unique even when a professional sits in several groups.
pub fn removal_set(groups: &[DuplicateGroup], keep_oldest: bool) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut removals = Vec::new();

    for group in groups {
        let mut members: Vec<_> = group.members.iter().collect();
        if keep_oldest {
            members.sort_by_key(|m| m.created_at);
        } else {
            members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        for member in members.into_iter().skip(1) {
            if seen.insert(member.id) {
                removals.push(member.id);
            }
        }
    }

    removals
}

/// Delete every non-survivor in one batch call. Returns the number removed;
/// with nothing to remove the store is not called.
pub async fn resolve_duplicates(
    store: &dyn RecordStore,
    groups: &[DuplicateGroup],
    keep_oldest: bool,
) -> Result<u64> {
    let ids = removal_set(groups, keep_oldest);
    if ids.is_empty() {
        tracing::debug!("No duplicate professionals to remove");
        return Ok(0);
    }

    let removed = store.delete_professionals(&ids).await?;
    tracing::info!(
        groups = groups.len(),
        requested = ids.len(),
        removed,
        keep_oldest,
        "Resolved duplicate professionals"
    );
    Ok(removed)
}
