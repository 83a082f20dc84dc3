use crate::core::config::ImportConfig;
use crate::core::error::{AppError, Result};
use crate::features::imports::dtos::{CreatedDomainsDto, ImportCommitDto, ImportPreviewDto};
use crate::features::imports::parser::{parse_bytes, ImportFormat, ImportTarget, ParsedRow};
use crate::features::imports::templates::{template, Template};
use crate::features::imports::workflow::{ImportSession, ImportState};
use crate::modules::store::SharedStore;

/// Result of a commit attempt
#[derive(Debug)]
pub enum CommitOutcome {
    Inserted(ImportCommitDto),
    /// Rows still have validation errors; nothing was written
    Rejected(ImportPreviewDto),
}

/// Service driving import sessions against the record store.
///
/// Sessions are rebuilt from the rows on every request; nothing is kept
/// between calls, so each step re-validates against the current store.
pub struct ImportService {
    store: SharedStore,
    config: ImportConfig,
}

impl ImportService {
    pub fn new(store: SharedStore, config: ImportConfig) -> Self {
        Self { store, config }
    }

    pub fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    /// Parse an uploaded file and validate its rows
    pub async fn validate_upload(
        &self,
        target: ImportTarget,
        file_name: &str,
        data: &[u8],
    ) -> Result<ImportPreviewDto> {
        if data.len() > self.config.max_file_size {
            return Err(AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {} bytes",
                self.config.max_file_size
            )));
        }

        let format = ImportFormat::from_file_name(file_name)?;
        let rows = parse_bytes(data, format, target)?;
        tracing::info!(
            import = target.as_str(),
            file_name,
            rows = rows.len(),
            "Parsed import file"
        );

        self.revalidate(target, rows).await
    }

    /// Validate rows the client already holds
    pub async fn revalidate(
        &self,
        target: ImportTarget,
        rows: Vec<ParsedRow>,
    ) -> Result<ImportPreviewDto> {
        let mut session = ImportSession::new(target, rows);
        session.validate(self.store.as_ref()).await?;
        Ok(session.into())
    }

    /// Create the categories professional rows refer to but the store lacks
    pub async fn create_missing_domains(&self, rows: Vec<ParsedRow>) -> Result<CreatedDomainsDto> {
        let store = self.store.as_ref();
        let mut session = ImportSession::new(ImportTarget::Professional, rows);
        session.validate(store).await?;
        let created = session.create_missing_domains(store).await?;

        Ok(CreatedDomainsDto {
            created,
            preview: session.into(),
        })
    }

    /// Validate and, when clean, insert the rows
    pub async fn commit(&self, target: ImportTarget, rows: Vec<ParsedRow>) -> Result<CommitOutcome> {
        let store = self.store.as_ref();
        let submitted = rows.len();
        let mut session = ImportSession::new(target, rows);
        session.validate(store).await?;

        if session.state() != ImportState::ValidatedClean {
            tracing::info!(
                import = target.as_str(),
                state = ?session.state(),
                "Import rejected with validation errors"
            );
            return Ok(CommitOutcome::Rejected(session.into()));
        }

        let inserted = session.commit(store).await?;
        Ok(CommitOutcome::Inserted(ImportCommitDto {
            inserted,
            submitted,
        }))
    }

    pub fn template(&self, target: ImportTarget, format: ImportFormat) -> Template {
        template(target, format)
    }
}
