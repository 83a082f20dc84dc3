use crate::core::error::Result;
use crate::features::categories::models::{CategoryFilter, CategoryStatus};
use crate::features::dashboard::dtos::{
    CategoryStatsDto, DashboardSummaryDto, ProfessionalStatsDto,
};
use crate::features::professionals::models::ProfessionalFilter;
use crate::modules::store::{SharedStore, ViewTarget};

/// Service for dashboard statistics
pub struct DashboardService {
    store: SharedStore,
}

impl DashboardService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    // ========================================================================
    // Summary
    // ========================================================================

    /// Category and professional counters plus total views
    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let store = &self.store;
        let all_categories = CategoryFilter::default();
        let all_professionals = ProfessionalFilter::default();
        let active = CategoryFilter {
            status: Some(CategoryStatus::Active),
            ..Default::default()
        };
        let available = ProfessionalFilter {
            available: Some(true),
            ..Default::default()
        };

        let (
            category_total,
            category_active,
            category_views,
            professional_total,
            professional_available,
            professional_views,
        ) = tokio::try_join!(
            store.count_categories(&all_categories),
            store.count_categories(&active),
            store.sum_views(ViewTarget::Category),
            store.count_professionals(&all_professionals),
            store.count_professionals(&available),
            store.sum_views(ViewTarget::Professional),
        )?;

        Ok(DashboardSummaryDto {
            categories: CategoryStatsDto {
                total: category_total,
                active: category_active,
                views: category_views,
            },
            professionals: ProfessionalStatsDto {
                total: professional_total,
                available: professional_available,
                views: professional_views,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::professionals::models::NewProfessional;
    use crate::modules::store::RecordStore;
    use crate::shared::test_helpers::{date, memory_store, new_professional};

    #[tokio::test]
    async fn test_summary_counts() {
        let store = memory_store();
        let plumbing = store.seed_category("Plumbing", CategoryStatus::Active).await;
        store.seed_category("Roofing", CategoryStatus::Inactive).await;
        let jane = store
            .seed_professional(new_professional(plumbing.id, "Jane"), date(2020, 1, 1))
            .await;
        store
            .seed_professional(
                NewProfessional {
                    available: false,
                    ..new_professional(plumbing.id, "John")
                },
                date(2020, 2, 1),
            )
            .await;
        store
            .increment_views(ViewTarget::Professional, jane.id)
            .await
            .unwrap();
        store
            .increment_views(ViewTarget::Category, plumbing.id)
            .await
            .unwrap();
        store
            .increment_views(ViewTarget::Category, plumbing.id)
            .await
            .unwrap();

        let summary = DashboardService::new(store).get_summary().await.unwrap();

        assert_eq!(summary.categories.total, 2);
        assert_eq!(summary.categories.active, 1);
        assert_eq!(summary.categories.views, 2);
        assert_eq!(summary.professionals.total, 2);
        assert_eq!(summary.professionals.available, 1);
        assert_eq!(summary.professionals.views, 1);
    }
}
