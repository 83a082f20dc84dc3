use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::professionals::dtos::{
    CreateProfessionalDto, ProfessionalQueryParams, ProfessionalResponseDto,
    UpdateProfessionalDto,
};
use crate::features::professionals::models::{
    NewProfessional, ProfessionalFilter, ProfessionalPatch,
};
use crate::modules::store::{SharedStore, ViewTarget};
use crate::shared::bulk::{fan_out, BulkOutcome};

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reject a present but blank required field
fn required(value: Option<String>, label: &str) -> Result<Option<String>> {
    match value {
        Some(v) if v.is_empty() => Err(AppError::Validation(format!("{} is required", label))),
        other => Ok(other),
    }
}

/// Service for professional operations
pub struct ProfessionalService {
    store: SharedStore,
}

impl ProfessionalService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// List professionals with pagination and filters
    pub async fn list(
        &self,
        params: &ProfessionalQueryParams,
    ) -> Result<(Vec<ProfessionalResponseDto>, i64)> {
        let filter = ProfessionalFilter {
            search: params.search.clone(),
            category_id: params.category_id,
            city: params.city.clone(),
            available: params.available,
        };
        let page = params.page_request();

        let total = self.store.count_professionals(&filter).await?;
        let professionals = self
            .store
            .list_professionals(&filter, params.sort, Some(page))
            .await?;

        Ok((professionals.into_iter().map(Into::into).collect(), total))
    }

    /// Get professional by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProfessionalResponseDto> {
        self.store
            .find_professional(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Professional with id {} not found", id)))
    }

    /// Public profile view; bumps the view counter
    pub async fn view(&self, id: Uuid) -> Result<ProfessionalResponseDto> {
        let professional = self.get_by_id(id).await?;
        if let Err(e) = self.store.increment_views(ViewTarget::Professional, id).await {
            tracing::warn!(%id, "Failed to record professional view: {}", e);
        }
        Ok(professional)
    }

    pub async fn create(&self, dto: CreateProfessionalDto) -> Result<ProfessionalResponseDto> {
        self.ensure_category_exists(dto.category_id).await?;

        let row = NewProfessional {
            full_name: dto.full_name.trim().to_string(),
            headline: dto.headline.trim().to_string(),
            bio: clean_optional(dto.bio),
            email: clean_optional(dto.email),
            phone: clean_optional(dto.phone),
            website: clean_optional(dto.website),
            linkedin_url: clean_optional(dto.linkedin_url),
            instagram_url: clean_optional(dto.instagram_url),
            city: clean_optional(dto.city),
            address: clean_optional(dto.address),
            image_url: clean_optional(dto.image_url),
            available: dto.available.unwrap_or(true),
            category_id: dto.category_id,
        };

        let professional = self.store.create_professional(&row).await?;
        tracing::info!(id = %professional.id, "Professional created");
        Ok(professional.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateProfessionalDto,
    ) -> Result<ProfessionalResponseDto> {
        if let Some(category_id) = dto.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        let full_name = required(trim(dto.full_name), "Full name")?;
        let headline = required(trim(dto.headline), "Headline")?;
        let patch = ProfessionalPatch {
            full_name,
            headline,
            bio: trim(dto.bio),
            email: trim(dto.email),
            phone: trim(dto.phone),
            website: trim(dto.website),
            linkedin_url: trim(dto.linkedin_url),
            instagram_url: trim(dto.instagram_url),
            city: trim(dto.city),
            address: trim(dto.address),
            image_url: trim(dto.image_url),
            available: dto.available,
            category_id: dto.category_id,
        };

        self.store
            .update_professional(id, &patch)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Professional with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_professional(id).await? {
            return Err(AppError::NotFound(format!(
                "Professional with id {} not found",
                id
            )));
        }
        tracing::info!(%id, "Professional deleted");
        Ok(())
    }

    /// Set availability on many professionals, one store call per id
    pub async fn bulk_set_availability(&self, ids: &[Uuid], available: bool) -> BulkOutcome {
        fan_out(ids, "updated", |id| async move {
            let patch = ProfessionalPatch {
                available: Some(available),
                ..Default::default()
            };
            self.store
                .update_professional(id, &patch)
                .await?
                .map(|_| ())
                .ok_or_else(|| {
                    AppError::NotFound(format!("Professional with id {} not found", id))
                })
        })
        .await
    }

    /// Delete many professionals, one store call per id
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> BulkOutcome {
        fan_out(ids, "deleted", |id| self.delete(id)).await
    }

    async fn ensure_category_exists(&self, category_id: Uuid) -> Result<()> {
        if self.store.find_category(category_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Category with id {} does not exist",
                category_id
            )));
        }
        Ok(())
    }
}
