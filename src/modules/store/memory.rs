use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecordStore, ViewTarget};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{
    Category, CategoryFilter, CategoryPatch, CategoryRef, CategoryStatus, NewCategory,
};
use crate::features::professionals::models::{
    NewProfessional, Professional, ProfessionalFilter, ProfessionalPatch, ProfessionalSummary,
};
use crate::shared::types::{PageRequest, SortDirection};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    professionals: Vec<Professional>,
}

/// In-memory record store for tests.
///
/// Mirrors the PostgreSQL adapter's semantics: case-insensitive unique
/// category names, professionals referencing existing categories, and
/// restricted deletion of categories still in use.
#[derive(Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
    batch_deletes: AtomicUsize,
    failing_ids: RwLock<HashSet<Uuid>>,
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

fn page_slice<T>(items: Vec<T>, page: Option<PageRequest>) -> Vec<T> {
    match page {
        Some(page) => items
            .into_iter()
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .collect(),
        None => items,
    }
}

fn category_matches(c: &Category, filter: &CategoryFilter) -> bool {
    if let Some(status) = filter.status {
        if c.status != status {
            return false;
        }
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if !contains_ci(Some(&c.name), search) && !contains_ci(c.description.as_deref(), search) {
            return false;
        }
    }
    true
}

fn professional_matches(p: &Professional, filter: &ProfessionalFilter) -> bool {
    if filter.category_id.is_some_and(|id| p.category_id != id) {
        return false;
    }
    if filter.available.is_some_and(|a| p.available != a) {
        return false;
    }
    if let Some(city) = filter.city.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let same_city = p
            .city
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(city));
        if !same_city {
            return false;
        }
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if !contains_ci(Some(&p.full_name), search)
            && !contains_ci(Some(&p.headline), search)
            && !contains_ci(p.city.as_deref(), search)
        {
            return false;
        }
    }
    true
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        let name = name.trim().to_lowercase();
        self.categories
            .iter()
            .any(|c| Some(c.id) != except && c.name.trim().to_lowercase() == name)
    }

    fn with_count(&self, category: &Category) -> Category {
        let mut category = category.clone();
        category.professional_count = self
            .professionals
            .iter()
            .filter(|p| p.category_id == category.id)
            .count() as i64;
        category
    }

    fn insert_category(&mut self, row: &NewCategory) -> Category {
        let now = Utc::now();
        let category = Category {
            id: Uuid::now_v7(),
            name: row.name.clone(),
            description: row.description.clone(),
            status: row.status,
            icon: row.icon.clone(),
            views: 0,
            professional_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.categories.push(category.clone());
        category
    }

    fn insert_professional(&mut self, row: &NewProfessional, created_at: DateTime<Utc>) -> Result<Professional> {
        if !self.categories.iter().any(|c| c.id == row.category_id) {
            return Err(AppError::Conflict(format!(
                "Category {} does not exist",
                row.category_id
            )));
        }
        let professional = Professional {
            id: Uuid::now_v7(),
            full_name: row.full_name.clone(),
            headline: row.headline.clone(),
            bio: row.bio.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            website: row.website.clone(),
            linkedin_url: row.linkedin_url.clone(),
            instagram_url: row.instagram_url.clone(),
            city: row.city.clone(),
            address: row.address.clone(),
            image_url: row.image_url.clone(),
            available: row.available,
            views: 0,
            category_id: row.category_id,
            created_at,
            updated_at: created_at,
        };
        self.professionals.push(professional.clone());
        Ok(professional)
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a category directly, bypassing uniqueness checks
    pub async fn seed_category(&self, name: &str, status: CategoryStatus) -> Category {
        let mut tables = self.tables.write().await;
        tables.insert_category(&NewCategory {
            name: name.to_string(),
            description: None,
            status,
            icon: None,
        })
    }

    /// Seed a professional with an explicit creation timestamp
    pub async fn seed_professional(
        &self,
        row: NewProfessional,
        created_at: DateTime<Utc>,
    ) -> Professional {
        let mut tables = self.tables.write().await;
        tables
            .insert_professional(&row, created_at)
            .expect("seeded professional must reference a seeded category")
    }

    /// Number of `delete_professionals` batch calls issued so far
    pub fn batch_delete_calls(&self) -> usize {
        self.batch_deletes.load(Ordering::SeqCst)
    }

    /// Make every subsequent delete/update of `id` fail with a store error
    pub async fn fail_writes_for(&self, id: Uuid) {
        self.failing_ids.write().await.insert(id);
    }

    async fn check_writable(&self, id: Uuid) -> Result<()> {
        if self.failing_ids.read().await.contains(&id) {
            return Err(AppError::Internal(format!("Simulated store failure for {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut items: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| category_matches(c, filter))
            .map(|c| tables.with_count(c))
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page_slice(items, page))
    }

    async fn count_categories(&self, filter: &CategoryFilter) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .filter(|c| category_matches(c, filter))
            .count() as i64)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| tables.with_count(c)))
    }

    async fn category_refs(&self) -> Result<Vec<CategoryRef>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .map(|c| CategoryRef {
                id: c.id,
                name: c.name.clone(),
            })
            .collect())
    }

    async fn create_category(&self, row: &NewCategory) -> Result<Category> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&row.name, None) {
            return Err(AppError::Conflict(
                "A category with this name already exists.".to_string(),
            ));
        }
        Ok(tables.insert_category(row))
    }

    async fn create_categories(&self, rows: &[NewCategory], skip_duplicates: bool) -> Result<u64> {
        let mut tables = self.tables.write().await;
        if !skip_duplicates {
            let mut seen = HashSet::new();
            for row in rows {
                let key = row.name.trim().to_lowercase();
                if tables.name_taken(&row.name, None) || !seen.insert(key) {
                    return Err(AppError::Conflict(
                        "A category with this name already exists.".to_string(),
                    ));
                }
            }
        }

        let mut inserted = 0;
        for row in rows {
            if tables.name_taken(&row.name, None) {
                continue;
            }
            tables.insert_category(row);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Option<Category>> {
        self.check_writable(id).await?;
        let mut tables = self.tables.write().await;
        if let Some(name) = patch.name.as_deref() {
            if tables.name_taken(name, Some(id)) {
                return Err(AppError::Conflict(
                    "A category with this name already exists.".to_string(),
                ));
            }
        }

        let Some(category) = tables.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            category.name = name.clone();
        }
        if let Some(description) = &patch.description {
            category.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(status) = patch.status {
            category.status = status;
        }
        if let Some(icon) = &patch.icon {
            category.icon = Some(icon.clone()).filter(|i| !i.is_empty());
        }
        category.updated_at = Utc::now();
        let category = category.clone();
        Ok(Some(tables.with_count(&category)))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        self.check_writable(id).await?;
        let mut tables = self.tables.write().await;
        if tables.professionals.iter().any(|p| p.category_id == id) {
            return Err(AppError::Conflict(
                "Record is still referenced by other records or references a missing record."
                    .to_string(),
            ));
        }
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        Ok(tables.categories.len() < before)
    }

    async fn list_professionals(
        &self,
        filter: &ProfessionalFilter,
        sort: SortDirection,
        page: Option<PageRequest>,
    ) -> Result<Vec<Professional>> {
        let tables = self.tables.read().await;
        let mut items: Vec<Professional> = tables
            .professionals
            .iter()
            .filter(|p| professional_matches(p, filter))
            .cloned()
            .collect();
        items.sort_by_key(|p| p.created_at);
        if sort == SortDirection::Desc {
            items.reverse();
        }
        Ok(page_slice(items, page))
    }

    async fn count_professionals(&self, filter: &ProfessionalFilter) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .professionals
            .iter()
            .filter(|p| professional_matches(p, filter))
            .count() as i64)
    }

    async fn find_professional(&self, id: Uuid) -> Result<Option<Professional>> {
        let tables = self.tables.read().await;
        Ok(tables.professionals.iter().find(|p| p.id == id).cloned())
    }

    async fn professional_summaries(&self) -> Result<Vec<ProfessionalSummary>> {
        let tables = self.tables.read().await;
        let mut items: Vec<ProfessionalSummary> = tables
            .professionals
            .iter()
            .map(ProfessionalSummary::from)
            .collect();
        items.sort_by_key(|p| p.created_at);
        Ok(items)
    }

    async fn create_professional(&self, row: &NewProfessional) -> Result<Professional> {
        let mut tables = self.tables.write().await;
        tables.insert_professional(row, Utc::now())
    }

    async fn create_professionals(
        &self,
        rows: &[NewProfessional],
        _skip_duplicates: bool,
    ) -> Result<u64> {
        let mut tables = self.tables.write().await;
        // Validate all references first so a bad row leaves the batch unapplied
        for row in rows {
            if !tables.categories.iter().any(|c| c.id == row.category_id) {
                return Err(AppError::Conflict(format!(
                    "Category {} does not exist",
                    row.category_id
                )));
            }
        }
        for row in rows {
            tables.insert_professional(row, Utc::now())?;
        }
        Ok(rows.len() as u64)
    }

    async fn update_professional(
        &self,
        id: Uuid,
        patch: &ProfessionalPatch,
    ) -> Result<Option<Professional>> {
        self.check_writable(id).await?;
        let mut tables = self.tables.write().await;
        if let Some(category_id) = patch.category_id {
            if !tables.categories.iter().any(|c| c.id == category_id) {
                return Err(AppError::Conflict(format!(
                    "Category {} does not exist",
                    category_id
                )));
            }
        }

        let Some(p) = tables.professionals.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(value) = &patch.$field {
                    p.$field = Some(value.clone()).filter(|v| !v.is_empty());
                })*
            };
        }
        if let Some(full_name) = &patch.full_name {
            p.full_name = full_name.clone();
        }
        if let Some(headline) = &patch.headline {
            p.headline = headline.clone();
        }
        apply!(bio, email, phone, website, linkedin_url, instagram_url, city, address, image_url);
        if let Some(available) = patch.available {
            p.available = available;
        }
        if let Some(category_id) = patch.category_id {
            p.category_id = category_id;
        }
        p.updated_at = Utc::now();
        Ok(Some(p.clone()))
    }

    async fn delete_professional(&self, id: Uuid) -> Result<bool> {
        self.check_writable(id).await?;
        let mut tables = self.tables.write().await;
        let before = tables.professionals.len();
        tables.professionals.retain(|p| p.id != id);
        Ok(tables.professionals.len() < before)
    }

    async fn delete_professionals(&self, ids: &[Uuid]) -> Result<u64> {
        self.batch_deletes.fetch_add(1, Ordering::SeqCst);
        let ids: HashSet<&Uuid> = ids.iter().collect();
        let mut tables = self.tables.write().await;
        let before = tables.professionals.len();
        tables.professionals.retain(|p| !ids.contains(&p.id));
        Ok((before - tables.professionals.len()) as u64)
    }

    async fn sum_views(&self, target: ViewTarget) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(match target {
            ViewTarget::Category => tables.categories.iter().map(|c| c.views).sum(),
            ViewTarget::Professional => tables.professionals.iter().map(|p| p.views).sum(),
        })
    }

    async fn increment_views(&self, target: ViewTarget, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let views = match target {
            ViewTarget::Category => tables
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .map(|c| &mut c.views),
            ViewTarget::Professional => tables
                .professionals
                .iter_mut()
                .find(|p| p.id == id)
                .map(|p| &mut p.views),
        };
        match views {
            Some(views) => {
                *views += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
