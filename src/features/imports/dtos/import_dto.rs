use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::imports::parser::{ImportFormat, ImportTarget, ParsedRow};
use crate::features::imports::validation::ValidationReport;
use crate::features::imports::workflow::{ImportSession, ImportState};

/// Upload form for Swagger UI; the handler reads the multipart body directly
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImportUploadDto {
    /// A `.csv` or `.json` file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Rows sent back by the client after review/fixes
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImportRowsDto {
    #[validate(length(min = 1, max = 10000, message = "Provide between 1 and 10000 rows"))]
    pub rows: Vec<ParsedRow>,
}

/// Parsed rows together with their validation outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportPreviewDto {
    pub target: ImportTarget,
    pub state: ImportState,
    pub rows: Vec<ParsedRow>,
    pub report: ValidationReport,
    /// Categories that can be created to resolve `missing_domain` errors
    pub missing_domains: Vec<String>,
}

impl From<ImportSession> for ImportPreviewDto {
    fn from(session: ImportSession) -> Self {
        let target = session.target();
        let (rows, report, state) = session.into_parts();
        let report = report.unwrap_or_else(|| ValidationReport::from_errors(Vec::new()));
        Self {
            target,
            state,
            missing_domains: report.missing_domains(),
            rows,
            report,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedDomainsDto {
    /// Number of categories created
    pub created: u64,
    /// Re-validation result after the categories were created
    pub preview: ImportPreviewDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportCommitDto {
    /// Rows actually inserted; existing duplicates are skipped
    pub inserted: u64,
    pub submitted: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TemplateQuery {
    /// `csv` (default) or `json`
    #[serde(default)]
    pub format: ImportFormat,
}
