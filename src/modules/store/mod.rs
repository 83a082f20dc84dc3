//! Record store for categories and professionals
//!
//! Services receive an `Arc<dyn RecordStore>` instead of reaching for a
//! global pool, so the PostgreSQL adapter can be swapped for the in-memory
//! store in tests.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::{
    Category, CategoryFilter, CategoryPatch, CategoryRef, NewCategory,
};
use crate::features::professionals::models::{
    NewProfessional, Professional, ProfessionalFilter, ProfessionalPatch, ProfessionalSummary,
};
use crate::shared::types::{PageRequest, SortDirection};

/// Entity kinds carrying a view counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    Category,
    Professional,
}

pub type SharedStore = Arc<dyn RecordStore>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    // Categories, ordered by name
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>>;
    async fn count_categories(&self, filter: &CategoryFilter) -> Result<i64>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>>;
    async fn category_refs(&self) -> Result<Vec<CategoryRef>>;
    async fn create_category(&self, row: &NewCategory) -> Result<Category>;
    /// Batch create; with `skip_duplicates` rows whose name collides are dropped
    /// silently. Returns the number of rows actually inserted.
    async fn create_categories(&self, rows: &[NewCategory], skip_duplicates: bool) -> Result<u64>;
    async fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Option<Category>>;
    async fn delete_category(&self, id: Uuid) -> Result<bool>;

    // Professionals, ordered by created_at
    async fn list_professionals(
        &self,
        filter: &ProfessionalFilter,
        sort: SortDirection,
        page: Option<PageRequest>,
    ) -> Result<Vec<Professional>>;
    async fn count_professionals(&self, filter: &ProfessionalFilter) -> Result<i64>;
    async fn find_professional(&self, id: Uuid) -> Result<Option<Professional>>;
    /// Every professional, oldest first
    async fn professional_summaries(&self) -> Result<Vec<ProfessionalSummary>>;
    async fn create_professional(&self, row: &NewProfessional) -> Result<Professional>;
    async fn create_professionals(
        &self,
        rows: &[NewProfessional],
        skip_duplicates: bool,
    ) -> Result<u64>;
    async fn update_professional(
        &self,
        id: Uuid,
        patch: &ProfessionalPatch,
    ) -> Result<Option<Professional>>;
    async fn delete_professional(&self, id: Uuid) -> Result<bool>;
    /// Single batch delete; returns how many rows were removed
    async fn delete_professionals(&self, ids: &[Uuid]) -> Result<u64>;

    // Aggregates
    async fn sum_views(&self, target: ViewTarget) -> Result<i64>;
    async fn increment_views(&self, target: ViewTarget, id: Uuid) -> Result<bool>;
}
