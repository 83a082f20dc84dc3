//! Import session state machine.
//!
//! ```text
//! Unvalidated --validate--> ValidatedClean | ValidatedWithErrors | AwaitingDomainCreation
//! AwaitingDomainCreation --create_missing_domains--> (re-validated state)
//! ValidatedClean --commit--> inserted count
//! ```

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{CategoryStatus, NewCategory};
use crate::features::imports::insert::{insert_categories, insert_professionals};
use crate::features::imports::parser::{ImportTarget, ParsedRow};
use crate::features::imports::validation::{
    validate_category_rows, validate_professional_rows, ValidationReport,
};
use crate::modules::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImportState {
    Unvalidated,
    ValidatedClean,
    ValidatedWithErrors,
    /// Errors include categories that can be created automatically
    AwaitingDomainCreation,
}

impl ImportState {
    fn from_report(report: &ValidationReport) -> Self {
        if report.valid {
            ImportState::ValidatedClean
        } else if report.has_missing_domains() {
            ImportState::AwaitingDomainCreation
        } else {
            ImportState::ValidatedWithErrors
        }
    }
}

/// Rows of one import attempt and how far they have progressed
#[derive(Debug)]
pub struct ImportSession {
    target: ImportTarget,
    rows: Vec<ParsedRow>,
    state: ImportState,
    report: Option<ValidationReport>,
}

impl ImportSession {
    pub fn new(target: ImportTarget, rows: Vec<ParsedRow>) -> Self {
        Self {
            target,
            rows,
            state: ImportState::Unvalidated,
            report: None,
        }
    }

    pub fn target(&self) -> ImportTarget {
        self.target
    }

    pub fn state(&self) -> ImportState {
        self.state
    }

    pub fn into_parts(self) -> (Vec<ParsedRow>, Option<ValidationReport>, ImportState) {
        (self.rows, self.report, self.state)
    }

    /// Validate the rows against a fresh store snapshot
    pub async fn validate(&mut self, store: &dyn RecordStore) -> Result<&ValidationReport> {
        let report = match self.target {
            ImportTarget::Category => {
                let existing = store.category_refs().await?;
                validate_category_rows(&self.rows, &existing)
            }
            ImportTarget::Professional => {
                let existing = store.professional_summaries().await?;
                let categories = store.category_refs().await?;
                validate_professional_rows(&self.rows, &existing, &categories)
            }
        };

        self.state = ImportState::from_report(&report);
        tracing::debug!(
            import = self.target.as_str(),
            rows = self.rows.len(),
            errors = report.errors.len(),
            state = ?self.state,
            "Validated import rows"
        );
        Ok(&*self.report.insert(report))
    }

    /// Create an active category for every missing domain, then re-validate.
    /// Returns how many categories were created.
    pub async fn create_missing_domains(&mut self, store: &dyn RecordStore) -> Result<u64> {
        if self.state != ImportState::AwaitingDomainCreation {
            return Err(AppError::BadRequest(
                "There are no missing domains to create".to_string(),
            ));
        }

        let domains = self
            .report
            .as_ref()
            .map(ValidationReport::missing_domains)
            .unwrap_or_default();
        let categories: Vec<NewCategory> = domains
            .into_iter()
            .map(|name| NewCategory {
                name,
                description: None,
                status: CategoryStatus::Active,
                icon: None,
            })
            .collect();

        let created = store.create_categories(&categories, true).await?;
        tracing::info!(created, "Created missing domains for import");

        self.validate(store).await?;
        Ok(created)
    }

    /// Insert the rows. Only a cleanly validated session can be committed.
    pub async fn commit(self, store: &dyn RecordStore) -> Result<u64> {
        if self.state != ImportState::ValidatedClean {
            return Err(AppError::BadRequest(
                "Import must validate without errors before it can be committed".to_string(),
            ));
        }

        match self.target {
            ImportTarget::Category => insert_categories(store, &self.rows).await,
            ImportTarget::Professional => insert_professionals(store, &self.rows).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::CategoryFilter;
    use crate::features::imports::parser::{parse_file, ImportFormat};
    use crate::features::professionals::models::ProfessionalFilter;
    use crate::shared::test_helpers::memory_store;

    fn professional_rows(body: &str) -> Vec<ParsedRow> {
        parse_file(
            &format!("full_name,headline,domain_name,address,available\n{}", body),
            ImportFormat::Csv,
            ImportTarget::Professional,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_domain_flow() {
        let store = memory_store();
        store.seed_category("Plumbing", CategoryStatus::Active).await;
        let mut session = ImportSession::new(
            ImportTarget::Professional,
            professional_rows("Jane,Plumber,Plumbing,1 Main,yes\nJohn,Roofer,Roofing,2 Main,no"),
        );
        assert_eq!(session.state(), ImportState::Unvalidated);

        session.validate(store.as_ref()).await.unwrap();
        assert_eq!(session.state(), ImportState::AwaitingDomainCreation);

        let created = session.create_missing_domains(store.as_ref()).await.unwrap();
        assert_eq!(created, 1);
        assert_eq!(session.state(), ImportState::ValidatedClean);

        let inserted = session.commit(store.as_ref()).await.unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(
            store
                .count_categories(&CategoryFilter::default())
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_errors_without_missing_domains() {
        let store = memory_store();
        store.seed_category("Plumbing", CategoryStatus::Active).await;
        let mut session = ImportSession::new(
            ImportTarget::Professional,
            professional_rows("Jane,Plumber,Plumbing,1 Main,maybe"),
        );

        let report = session.validate(store.as_ref()).await.unwrap();
        assert_eq!(report.errors[0].field, "available");
        assert_eq!(session.state(), ImportState::ValidatedWithErrors);

        let err = session
            .create_missing_domains(store.as_ref())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_commit_requires_clean_validation() {
        let store = memory_store();
        store.seed_category("Plumbing", CategoryStatus::Active).await;

        let session = ImportSession::new(
            ImportTarget::Professional,
            professional_rows("Jane,Plumber,Plumbing,1 Main,yes"),
        );
        assert!(matches!(
            session.commit(store.as_ref()).await,
            Err(AppError::BadRequest(_))
        ));

        let mut session = ImportSession::new(
            ImportTarget::Professional,
            professional_rows("Jane,Plumber,Plumbing,1 Main,maybe"),
        );
        session.validate(store.as_ref()).await.unwrap();
        assert!(session.commit(store.as_ref()).await.is_err());

        let count = store
            .count_professionals(&ProfessionalFilter::default())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
