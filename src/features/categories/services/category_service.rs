use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryQueryParams, CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{
    CategoryFilter, CategoryPatch, CategoryStatus, NewCategory,
};
use crate::modules::store::{SharedStore, ViewTarget};
use crate::shared::bulk::{fan_out, BulkOutcome};

/// Trim and drop empty optional text
fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim a patch value, keeping an empty result so the store clears the field
fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Service for category operations
pub struct CategoryService {
    store: SharedStore,
}

impl CategoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// List all active categories (public directory)
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let filter = CategoryFilter {
            status: Some(CategoryStatus::Active),
            ..Default::default()
        };
        let categories = self.store.list_categories(&filter, None).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get an active category for the public directory and count the view
    pub async fn view_active(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = self
            .store
            .find_category(id)
            .await?
            .filter(|c| c.status == CategoryStatus::Active)
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        if let Err(e) = self.store.increment_views(ViewTarget::Category, id).await {
            tracing::warn!(%id, "Failed to record category view: {}", e);
        }

        Ok(category.into())
    }

    /// List categories with pagination and filters (admin)
    pub async fn list(&self, params: &CategoryQueryParams) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let filter = CategoryFilter {
            search: params.search.clone(),
            status: params.status,
        };
        let page = params.page_request();

        let total = self.store.count_categories(&filter).await?;
        let categories = self.store.list_categories(&filter, Some(page)).await?;

        Ok((categories.into_iter().map(Into::into).collect(), total))
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.store
            .find_category(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Create a single category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        self.ensure_name_available(&name, None).await?;

        let category = self
            .store
            .create_category(&NewCategory {
                name,
                description: clean_optional(dto.description),
                status: dto.status.unwrap_or(CategoryStatus::Active),
                icon: clean_optional(dto.icon),
            })
            .await?;

        tracing::info!(id = %category.id, name = %category.name, "Category created");
        Ok(category.into())
    }

    /// Update name/description/status/icon
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let name = dto.name.map(|n| n.trim().to_string());
        if let Some(name) = name.as_deref() {
            if name.is_empty() {
                return Err(AppError::Validation("Name is required".to_string()));
            }
            self.ensure_name_available(name, Some(id)).await?;
        }

        let patch = CategoryPatch {
            name,
            description: trimmed(dto.description),
            status: dto.status,
            icon: trimmed(dto.icon),
        };

        self.store
            .update_category(id, &patch)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Delete a category; refused while any professional still references it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let category = self
            .store
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        if category.professional_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete category '{}': it still has {} professional(s)",
                category.name, category.professional_count
            )));
        }

        if !self.store.delete_category(id).await? {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        tracing::info!(%id, name = %category.name, "Category deleted");
        Ok(())
    }

    /// Set one status on many categories, one store call per id
    pub async fn bulk_set_status(&self, ids: &[Uuid], status: CategoryStatus) -> BulkOutcome {
        fan_out(ids, "updated", |id| async move {
            let patch = CategoryPatch {
                status: Some(status),
                ..Default::default()
            };
            self.store
                .update_category(id, &patch)
                .await?
                .map(|_| ())
                .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
        })
        .await
    }

    /// Delete many categories, one store call per id
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> BulkOutcome {
        fan_out(ids, "deleted", |id| self.delete(id)).await
    }

    async fn ensure_name_available(&self, name: &str, except: Option<Uuid>) -> Result<()> {
        let lowered = name.to_lowercase();
        let taken = self
            .store
            .category_refs()
            .await?
            .into_iter()
            .any(|c| Some(c.id) != except && c.name.trim().to_lowercase() == lowered);

        if taken {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::RecordStore;
    use crate::shared::test_helpers::{date, memory_store, new_professional};

    fn create_dto(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: Some("  Pipes and drains  ".to_string()),
            status: None,
            icon: Some("🔧".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_defaults_to_active() {
        let store = memory_store();
        let service = CategoryService::new(store);

        let created = service.create(create_dto("  Plumbing ")).await.unwrap();

        assert_eq!(created.name, "Plumbing");
        assert_eq!(created.description.as_deref(), Some("Pipes and drains"));
        assert_eq!(created.status, CategoryStatus::Active);
    }

    #[tokio::test]
    async fn test_create_rejects_case_insensitive_duplicate() {
        let store = memory_store();
        store.seed_category("Plumbing", CategoryStatus::Active).await;
        let service = CategoryService::new(store);

        let err = service.create(create_dto("PLUMBING")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_refused_while_professionals_reference_category() {
        let store = memory_store();
        let category = store.seed_category("Plumbing", CategoryStatus::Active).await;
        store
            .seed_professional(new_professional(category.id, "Jane Doe"), date(2024, 1, 1))
            .await;
        let service = CategoryService::new(store.clone());

        let err = service.delete(category.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.find_category(category.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_empty_category() {
        let store = memory_store();
        let category = store.seed_category("Plumbing", CategoryStatus::Active).await;
        let service = CategoryService::new(store.clone());

        service.delete(category.id).await.unwrap();
        assert!(store.find_category(category.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bulk_set_status_reports_partial_failure() {
        let store = memory_store();
        let a = store.seed_category("Plumbing", CategoryStatus::Active).await;
        let b = store.seed_category("Electrical", CategoryStatus::Active).await;
        let missing = Uuid::new_v4();
        let service = CategoryService::new(store.clone());

        let outcome = service
            .bulk_set_status(&[a.id, missing, b.id], CategoryStatus::Inactive)
            .await;

        assert_eq!(outcome.success_count(), 2);
        assert_eq!(outcome.failure_count(), 1);
        assert_eq!(outcome.message, "Successfully updated 2; 1 failed");
        let a = store.find_category(a.id).await.unwrap().unwrap();
        assert_eq!(a.status, CategoryStatus::Inactive);
    }

    #[tokio::test]
    async fn test_bulk_delete_keeps_going_after_refusal() {
        let store = memory_store();
        let busy = store.seed_category("Plumbing", CategoryStatus::Active).await;
        let empty = store.seed_category("Electrical", CategoryStatus::Active).await;
        store
            .seed_professional(new_professional(busy.id, "Jane Doe"), date(2024, 1, 1))
            .await;
        let service = CategoryService::new(store.clone());

        let outcome = service.bulk_delete(&[busy.id, empty.id]).await;

        assert_eq!(outcome.succeeded, vec![empty.id]);
        assert_eq!(outcome.failed[0].id, busy.id);
    }

    #[tokio::test]
    async fn test_view_active_counts_views_and_hides_inactive() {
        let store = memory_store();
        let active = store.seed_category("Plumbing", CategoryStatus::Active).await;
        let hidden = store.seed_category("Legacy", CategoryStatus::Inactive).await;
        let service = CategoryService::new(store.clone());

        service.view_active(active.id).await.unwrap();
        service.view_active(active.id).await.unwrap();
        assert!(matches!(
            service.view_active(hidden.id).await,
            Err(AppError::NotFound(_))
        ));

        let active = store.find_category(active.id).await.unwrap().unwrap();
        assert_eq!(active.views, 2);
    }

    #[tokio::test]
    async fn test_update_blank_description_and_icon_clear_them() {
        let store = memory_store();
        let service = CategoryService::new(store);
        let created = service.create(create_dto("Plumbing")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateCategoryDto {
                    name: None,
                    description: Some("   ".to_string()),
                    status: None,
                    icon: Some(String::new()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Plumbing");
        assert_eq!(updated.description, None);
        assert_eq!(updated.icon, None);
    }
}
