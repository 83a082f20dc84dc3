//! Bulk insert of validated import rows.
//!
//! Rows are expected to have passed validation already; nothing here re-runs
//! those checks. Anything that still cannot be mapped fails the whole batch.

use std::collections::HashMap;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{CategoryStatus, NewCategory};
use crate::features::imports::parser::ParsedRow;
use crate::features::professionals::models::NewProfessional;
use crate::modules::store::RecordStore;
use crate::shared::validation::{normalize_text, parse_availability};

fn optional(row: &ParsedRow, field: &str) -> Option<String> {
    row.value(field).map(str::to_string)
}

/// Insert category rows, skipping names that already exist. Returns the
/// number of rows actually inserted.
pub async fn insert_categories(store: &dyn RecordStore, rows: &[ParsedRow]) -> Result<u64> {
    let records = rows
        .iter()
        .map(|row| {
            let status = row
                .get("status")
                .parse::<CategoryStatus>()
                .map_err(|e| AppError::BadRequest(format!("Row {}: {}", row.row, e)))?;
            Ok(NewCategory {
                name: row.get("name").trim().to_string(),
                description: optional(row, "description"),
                status,
                icon: optional(row, "icon"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let inserted = store.create_categories(&records, true).await?;
    tracing::info!(
        submitted = records.len(),
        inserted,
        "Imported categories"
    );
    Ok(inserted)
}

/// Insert professional rows. Every `domain_name` is resolved before the first
/// write; an unknown domain aborts the batch with nothing inserted.
pub async fn insert_professionals(store: &dyn RecordStore, rows: &[ParsedRow]) -> Result<u64> {
    let categories: HashMap<String, _> = store
        .category_refs()
        .await?
        .into_iter()
        .map(|c| (normalize_text(&c.name), c.id))
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            let domain = row.get("domain_name").trim();
            let category_id = categories
                .get(&normalize_text(domain))
                .copied()
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Domain '{}' does not exist. Please create it first.",
                        domain
                    ))
                })?;
            Ok(NewProfessional {
                full_name: row.get("full_name").trim().to_string(),
                headline: row.get("headline").trim().to_string(),
                bio: optional(row, "bio"),
                email: optional(row, "email"),
                phone: optional(row, "phone"),
                website: optional(row, "website"),
                linkedin_url: optional(row, "linkedin_url"),
                instagram_url: optional(row, "instagram_url"),
                city: optional(row, "city"),
                address: optional(row, "address"),
                image_url: optional(row, "image_url"),
                available: parse_availability(row.get("available")) == Some(true),
                category_id,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let inserted = store.create_professionals(&records, true).await?;
    tracing::info!(
        submitted = records.len(),
        inserted,
        "Imported professionals"
    );
    Ok(inserted)
}
