//! Per-row field validation for import files.
//!
//! Validation never stops early: every row is checked and every problem is
//! reported against its row number and field. Checks run against a snapshot
//! of the store plus the other rows of the same file.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

use crate::features::categories::models::{CategoryRef, CategoryStatus};
use crate::features::imports::parser::ParsedRow;
use crate::features::professionals::models::ProfessionalSummary;
use crate::shared::constants::{
    ADDRESS_MAX_LENGTH, CATEGORY_DESCRIPTION_MAX_LENGTH, CATEGORY_ICON_MAX_LENGTH,
    CATEGORY_NAME_MAX_LENGTH, CITY_MAX_LENGTH, EMAIL_MAX_LENGTH, PHONE_MAX_LENGTH,
    PROFESSIONAL_BIO_MAX_LENGTH, PROFESSIONAL_HEADLINE_MAX_LENGTH, PROFESSIONAL_NAME_MAX_LENGTH,
};
use crate::shared::validation::{
    is_valid_url, normalize_phone, normalize_text, parse_availability, EMAIL_REGEX,
};

/// How closely an existing professional resembles an imported row
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityConfidence {
    /// Same name plus one of headline or city
    Medium,
    /// Same name, headline and city
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Required,
    Invalid,
    ExistsInStore,
    DuplicateInFile { row: usize },
    Similar { confidence: SimilarityConfidence },
    /// The referenced category does not exist yet and can be created
    MissingDomain { domain: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub message: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(row: usize, field: &str, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Unique missing category names, first spelling wins
    pub fn missing_domains(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.errors
            .iter()
            .filter_map(|e| match &e.kind {
                ValidationErrorKind::MissingDomain { domain } => Some(domain),
                _ => None,
            })
            .filter(|domain| seen.insert(normalize_text(domain)))
            .cloned()
            .collect()
    }

    pub fn has_missing_domains(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e.kind, ValidationErrorKind::MissingDomain { .. }))
    }
}

/// Positions and row numbers per normalized key, in file order.
///
/// Rows are told apart by their position in the batch; row numbers only label
/// the match, since reviewed rows can arrive with repeated numbers.
struct InFileIndex(HashMap<String, Vec<(usize, usize)>>);

impl InFileIndex {
    fn build(rows: &[ParsedRow], key: impl Fn(&ParsedRow) -> Option<String>) -> Self {
        let mut index: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
        for (position, row) in rows.iter().enumerate() {
            if let Some(k) = key(row) {
                index.entry(k).or_default().push((position, row.row));
            }
        }
        Self(index)
    }

    /// Row number of the first other row sharing `key`
    fn other_row(&self, key: &str, position: usize) -> Option<usize> {
        self.0.get(key).and_then(|entries| {
            entries
                .iter()
                .find(|(p, _)| *p != position)
                .map(|(_, row)| *row)
        })
    }
}

/// Push an `Invalid` error for every field longer than its column allows
fn check_lengths(row: &ParsedRow, limits: &[(&str, usize, &str)], errors: &mut Vec<ValidationError>) {
    for (field, max, label) in limits {
        if row.value(field).is_some_and(|v| v.chars().count() > *max) {
            errors.push(ValidationError::new(
                row.row,
                field,
                ValidationErrorKind::Invalid,
                format!("{} must be at most {} characters", label, max),
            ));
        }
    }
}

const CATEGORY_LENGTH_LIMITS: &[(&str, usize, &str)] = &[
    ("name", CATEGORY_NAME_MAX_LENGTH, "Name"),
    ("description", CATEGORY_DESCRIPTION_MAX_LENGTH, "Description"),
    ("icon", CATEGORY_ICON_MAX_LENGTH, "Icon"),
];

const PROFESSIONAL_LENGTH_LIMITS: &[(&str, usize, &str)] = &[
    ("full_name", PROFESSIONAL_NAME_MAX_LENGTH, "Full name"),
    ("headline", PROFESSIONAL_HEADLINE_MAX_LENGTH, "Headline"),
    ("bio", PROFESSIONAL_BIO_MAX_LENGTH, "Bio"),
    ("email", EMAIL_MAX_LENGTH, "Email"),
    ("phone", PHONE_MAX_LENGTH, "Phone"),
    ("city", CITY_MAX_LENGTH, "City"),
    ("address", ADDRESS_MAX_LENGTH, "Address"),
];

/// Validate category rows against existing category names
pub fn validate_category_rows(
    rows: &[ParsedRow],
    existing: &[CategoryRef],
) -> ValidationReport {
    let existing: HashSet<String> = existing.iter().map(|c| normalize_text(&c.name)).collect();
    let names = InFileIndex::build(rows, |r| r.value("name").map(normalize_text));

    let mut errors = Vec::new();
    for (position, row) in rows.iter().enumerate() {
        let name = row.value("name");
        if name.is_none() {
            errors.push(ValidationError::new(
                row.row,
                "name",
                ValidationErrorKind::Required,
                "Name is required",
            ));
        }

        if row.get("status").parse::<CategoryStatus>().is_err() {
            errors.push(ValidationError::new(
                row.row,
                "status",
                ValidationErrorKind::Invalid,
                "Status must be 'active' or 'inactive'",
            ));
        }

        if let Some(name) = name {
            let key = normalize_text(name);
            if existing.contains(&key) {
                errors.push(ValidationError::new(
                    row.row,
                    "name",
                    ValidationErrorKind::ExistsInStore,
                    format!("Category '{}' already exists in database", name),
                ));
            }
            if let Some(other) = names.other_row(&key, position) {
                errors.push(ValidationError::new(
                    row.row,
                    "name",
                    ValidationErrorKind::DuplicateInFile { row: other },
                    format!("Duplicate name found in row {}", other),
                ));
            }
        }

        check_lengths(row, CATEGORY_LENGTH_LIMITS, &mut errors);
    }

    ValidationReport::from_errors(errors)
}

/// Lookup tables over the stored professionals and categories
struct StoreSnapshot<'a> {
    professionals: &'a [ProfessionalSummary],
    names: HashSet<String>,
    emails: HashSet<String>,
    phones: HashSet<String>,
    domains: HashSet<String>,
}

impl<'a> StoreSnapshot<'a> {
    fn new(professionals: &'a [ProfessionalSummary], categories: &[CategoryRef]) -> Self {
        Self {
            professionals,
            names: professionals
                .iter()
                .map(|p| normalize_text(&p.full_name))
                .collect(),
            emails: professionals
                .iter()
                .filter_map(|p| p.email.as_deref())
                .map(normalize_text)
                .collect(),
            phones: professionals
                .iter()
                .filter_map(|p| p.phone.as_deref())
                .map(normalize_phone)
                .collect(),
            domains: categories.iter().map(|c| normalize_text(&c.name)).collect(),
        }
    }

    /// Closest stored professional sharing the row's name and its headline or city
    fn most_similar(
        &self,
        name: &str,
        headline: Option<&str>,
        city: Option<&str>,
    ) -> Option<(&'a ProfessionalSummary, SimilarityConfidence, &'static str)> {
        let name = normalize_text(name);
        let headline = headline.map(normalize_text);
        let city = city.map(normalize_text);

        let professionals: &'a [ProfessionalSummary] = self.professionals;
        professionals
            .iter()
            .filter(|p| normalize_text(&p.full_name) == name)
            .filter_map(|p| {
                let same_headline = headline
                    .as_deref()
                    .is_some_and(|h| normalize_text(&p.headline) == h);
                let same_city = city
                    .as_deref()
                    .is_some_and(|c| p.city.as_deref().map(normalize_text).as_deref() == Some(c));
                match (same_headline, same_city) {
                    (true, true) => Some((p, SimilarityConfidence::High, "name, headline and city")),
                    (true, false) => Some((p, SimilarityConfidence::Medium, "name and headline")),
                    (false, true) => Some((p, SimilarityConfidence::Medium, "name and city")),
                    (false, false) => None,
                }
            })
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
    }
}

const URL_FIELDS: &[(&str, &str)] = &[
    ("website", "Invalid website URL"),
    ("linkedin_url", "Invalid LinkedIn URL"),
    ("instagram_url", "Invalid Instagram URL"),
];

/// Validate professional rows against stored professionals and categories
pub fn validate_professional_rows(
    rows: &[ParsedRow],
    existing: &[ProfessionalSummary],
    categories: &[CategoryRef],
) -> ValidationReport {
    let store = StoreSnapshot::new(existing, categories);
    let names = InFileIndex::build(rows, |r| r.value("full_name").map(normalize_text));
    let phones = InFileIndex::build(rows, |r| r.value("phone").map(normalize_phone));
    let emails = InFileIndex::build(rows, |r| {
        r.value("email")
            .filter(|e| EMAIL_REGEX.is_match(e))
            .map(normalize_text)
    });

    let mut errors = Vec::new();
    for (position, row) in rows.iter().enumerate() {
        let n = row.row;

        match row.value("full_name") {
            None => errors.push(ValidationError::new(
                n,
                "full_name",
                ValidationErrorKind::Required,
                "Full name is required",
            )),
            Some(name) => {
                let key = normalize_text(name);
                if store.names.contains(&key) {
                    errors.push(ValidationError::new(
                        n,
                        "full_name",
                        ValidationErrorKind::ExistsInStore,
                        format!("Professional '{}' already exists in database", name),
                    ));
                }
                if let Some(other) = names.other_row(&key, position) {
                    errors.push(ValidationError::new(
                        n,
                        "full_name",
                        ValidationErrorKind::DuplicateInFile { row: other },
                        format!("Duplicate name found in row {}", other),
                    ));
                }
            }
        }

        if row.value("headline").is_none() {
            errors.push(ValidationError::new(
                n,
                "headline",
                ValidationErrorKind::Required,
                "Headline is required",
            ));
        }

        if row.value("address").is_none() {
            errors.push(ValidationError::new(
                n,
                "address",
                ValidationErrorKind::Required,
                "Address is required",
            ));
        }

        if let Some(phone) = row.value("phone") {
            let key = normalize_phone(phone);
            if store.phones.contains(&key) {
                errors.push(ValidationError::new(
                    n,
                    "phone",
                    ValidationErrorKind::ExistsInStore,
                    "Phone number already exists in database",
                ));
            }
            if let Some(other) = phones.other_row(&key, position) {
                errors.push(ValidationError::new(
                    n,
                    "phone",
                    ValidationErrorKind::DuplicateInFile { row: other },
                    format!("Duplicate phone found in row {}", other),
                ));
            }
        }

        if let Some(email) = row.value("email") {
            if !EMAIL_REGEX.is_match(email) {
                errors.push(ValidationError::new(
                    n,
                    "email",
                    ValidationErrorKind::Invalid,
                    "Invalid email format",
                ));
            } else {
                let key = normalize_text(email);
                if store.emails.contains(&key) {
                    errors.push(ValidationError::new(
                        n,
                        "email",
                        ValidationErrorKind::ExistsInStore,
                        "Email already exists in database",
                    ));
                }
                if let Some(other) = emails.other_row(&key, position) {
                    errors.push(ValidationError::new(
                        n,
                        "email",
                        ValidationErrorKind::DuplicateInFile { row: other },
                        format!("Duplicate email found in row {}", other),
                    ));
                }
            }
        }

        if let Some(name) = row.value("full_name") {
            if let Some((similar, confidence, matched)) =
                store.most_similar(name, row.value("headline"), row.value("city"))
            {
                errors.push(ValidationError::new(
                    n,
                    "full_name",
                    ValidationErrorKind::Similar { confidence },
                    format!(
                        "Similar professional '{}' already exists (same {})",
                        similar.full_name, matched
                    ),
                ));
            }
        }

        match row.value("domain_name") {
            None => errors.push(ValidationError::new(
                n,
                "domain_name",
                ValidationErrorKind::Required,
                "Domain name is required",
            )),
            Some(domain) if domain.chars().count() > CATEGORY_NAME_MAX_LENGTH => {
                errors.push(ValidationError::new(
                    n,
                    "domain_name",
                    ValidationErrorKind::Invalid,
                    format!(
                        "Domain name must be at most {} characters",
                        CATEGORY_NAME_MAX_LENGTH
                    ),
                ))
            }
            Some(domain) if !store.domains.contains(&normalize_text(domain)) => {
                errors.push(ValidationError::new(
                    n,
                    "domain_name",
                    ValidationErrorKind::MissingDomain {
                        domain: domain.to_string(),
                    },
                    format!("Domain '{}' does not exist. Please create it first.", domain),
                ))
            }
            Some(_) => {}
        }

        if parse_availability(row.get("available")).is_none() {
            errors.push(ValidationError::new(
                n,
                "available",
                ValidationErrorKind::Invalid,
                "Available must be true, false, yes, or no",
            ));
        }

        for (field, message) in URL_FIELDS {
            if row.value(field).is_some_and(|url| !is_valid_url(url)) {
                errors.push(ValidationError::new(
                    n,
                    field,
                    ValidationErrorKind::Invalid,
                    *message,
                ));
            }
        }

        check_lengths(row, PROFESSIONAL_LENGTH_LIMITS, &mut errors);
    }

    ValidationReport::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::imports::parser::{parse_file, ImportFormat, ImportTarget};
    use crate::shared::test_helpers::date;
    use uuid::Uuid;

    fn category(name: &str) -> CategoryRef {
        CategoryRef {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn summary(name: &str, headline: &str, city: Option<&str>) -> ProfessionalSummary {
        ProfessionalSummary {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: None,
            phone: None,
            headline: headline.to_string(),
            city: city.map(str::to_string),
            created_at: date(2020, 1, 1),
        }
    }

    fn csv(text: &str, target: ImportTarget) -> Vec<ParsedRow> {
        parse_file(text, ImportFormat::Csv, target).unwrap()
    }

    fn fields_for(report: &ValidationReport, row: usize) -> Vec<&str> {
        report
            .errors
            .iter()
            .filter(|e| e.row == row)
            .map(|e| e.field.as_str())
            .collect()
    }

    fn row(number: usize, fields: &[(&str, &str)]) -> ParsedRow {
        ParsedRow {
            row: number,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    const PRO_HEADER: &str = "full_name,headline,domain_name,address,available,email,phone,city,website";

    #[test]
    fn test_category_duplicates_in_file_reference_each_other() {
        let rows = csv("name,status\nPlumbing,active\nPlumbing,inactive", ImportTarget::Category);
        let report = validate_category_rows(&rows, &[]);

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].row, 2);
        assert_eq!(report.errors[0].message, "Duplicate name found in row 3");
        assert_eq!(report.errors[1].row, 3);
        assert_eq!(report.errors[1].message, "Duplicate name found in row 2");
    }

    #[test]
    fn test_category_exists_in_store_case_insensitive() {
        let rows = csv("name,status\n plumbing ,ACTIVE", ImportTarget::Category);
        let report = validate_category_rows(&rows, &[category("Plumbing")]);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "name");
        assert_eq!(report.errors[0].kind, ValidationErrorKind::ExistsInStore);
        assert_eq!(
            report.errors[0].message,
            "Category 'plumbing' already exists in database"
        );
    }

    #[test]
    fn test_category_checks_every_row() {
        let rows = csv("name,status\n,active\nCleaning,pending\nGardening,inactive", ImportTarget::Category);
        let report = validate_category_rows(&rows, &[]);

        assert_eq!(fields_for(&report, 2), vec!["name"]);
        assert_eq!(fields_for(&report, 3), vec!["status"]);
        assert!(fields_for(&report, 4).is_empty());
        assert_eq!(report.errors[0].message, "Name is required");
        assert_eq!(report.errors[1].message, "Status must be 'active' or 'inactive'");
    }

    #[test]
    fn test_professional_clean_row() {
        let rows = csv(
            &format!(
                "{}\nJane Doe,Licensed Plumber,plumbing,1 Main Street,Yes,jane@example.com,+62 812,Springfield,https://jane.example.com",
                PRO_HEADER
            ),
            ImportTarget::Professional,
        );
        let report = validate_professional_rows(&rows, &[], &[category("Plumbing")]);

        assert!(report.valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_professional_required_and_format_errors() {
        let rows = csv(
            &format!("{}\n,,,,maybe,not-an-email,,,example.com", PRO_HEADER),
            ImportTarget::Professional,
        );
        let report = validate_professional_rows(&rows, &[], &[]);

        assert_eq!(
            fields_for(&report, 2),
            vec!["full_name", "headline", "address", "email", "domain_name", "available", "website"]
        );
        let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&"Invalid email format"));
        assert!(messages.contains(&"Domain name is required"));
        assert!(messages.contains(&"Available must be true, false, yes, or no"));
        assert!(messages.contains(&"Invalid website URL"));
    }

    #[test]
    fn test_professional_store_and_file_duplicates() {
        let mut stored = summary("Old Timer", "Electrician", None);
        stored.email = Some("Taken@Example.com".to_string());
        stored.phone = Some("0812 555".to_string());

        let rows = csv(
            &format!(
                "{}\n\
                 A One,Plumber,Plumbing,Addr,true,taken@example.com,0812555,,\n\
                 B Two,Plumber,Plumbing,Addr,true,b@example.com,999,,\n\
                 C Three,Plumber,Plumbing,Addr,true,B@example.com,9 9 9,,",
                PRO_HEADER
            ),
            ImportTarget::Professional,
        );
        let report = validate_professional_rows(&rows, &[stored], &[category("Plumbing")]);

        let row2: Vec<&str> = report
            .errors
            .iter()
            .filter(|e| e.row == 2)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(
            row2,
            vec!["Phone number already exists in database", "Email already exists in database"]
        );

        let row4: Vec<&str> = report
            .errors
            .iter()
            .filter(|e| e.row == 4)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(
            row4,
            vec!["Duplicate phone found in row 3", "Duplicate email found in row 3"]
        );
    }

    #[test]
    fn test_professional_similarity_tiers() {
        let stored = vec![
            summary("Jane Doe", "Licensed Plumber", Some("Springfield")),
            summary("John Roe", "Electrician", Some("Shelbyville")),
        ];
        let rows = csv(
            &format!(
                "{}\n\
                 jane doe,Licensed Plumber,Plumbing,Addr,true,,,Springfield,\n\
                 John Roe,Carpenter,Plumbing,Addr,true,,,Shelbyville,\n\
                 John Roe,Carpenter,Plumbing,Addr,true,,,Ogdenville,",
                PRO_HEADER
            ),
            ImportTarget::Professional,
        );
        let report = validate_professional_rows(&rows, &stored, &[category("Plumbing")]);

        let similar: Vec<(usize, &ValidationErrorKind)> = report
            .errors
            .iter()
            .filter(|e| matches!(e.kind, ValidationErrorKind::Similar { .. }))
            .map(|e| (e.row, &e.kind))
            .collect();
        assert_eq!(
            similar,
            vec![
                (
                    2,
                    &ValidationErrorKind::Similar {
                        confidence: SimilarityConfidence::High
                    }
                ),
                (
                    3,
                    &ValidationErrorKind::Similar {
                        confidence: SimilarityConfidence::Medium
                    }
                ),
            ]
        );
        // Exact name matches are reported separately from similarity
        assert!(report
            .errors
            .iter()
            .any(|e| e.row == 4 && e.kind == ValidationErrorKind::ExistsInStore));
    }

    #[test]
    fn test_missing_domains_are_unique_and_typed() {
        let rows = csv(
            &format!(
                "{}\n\
                 A,Plumber,Roofing,Addr,true,,,,\n\
                 B,Plumber,roofing,Addr,true,,,,\n\
                 C,Plumber,Tiling,Addr,true,,,,",
                PRO_HEADER
            ),
            ImportTarget::Professional,
        );
        let report = validate_professional_rows(&rows, &[], &[]);

        assert!(report.has_missing_domains());
        assert_eq!(report.missing_domains(), vec!["Roofing", "Tiling"]);
        assert_eq!(
            report.errors[0].message,
            "Domain 'Roofing' does not exist. Please create it first."
        );
    }

    #[test]
    fn test_maybe_availability_in_json() {
        let rows = parse_file(
            r#"[{"full_name":"Jane","headline":"Plumber","domain_name":"Plumbing","address":"1 Main","available":"maybe"}]"#,
            ImportFormat::Json,
            ImportTarget::Professional,
        )
        .unwrap();
        let report = validate_professional_rows(&rows, &[], &[category("Plumbing")]);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "available");
        assert_eq!(report.errors[0].row, 2);
    }

    #[test]
    fn test_csv_and_json_produce_identical_errors() {
        let csv_rows = csv(
            "full_name,headline,domain_name,address,available,email\n\
             Jane,Plumber,Plumbing,1 Main,maybe,bad\n\
             Jane,,Roofing,2 Main,no,",
            ImportTarget::Professional,
        );
        let json_rows = parse_file(
            r#"[
                {"full_name":"Jane","headline":"Plumber","domain_name":"Plumbing","address":"1 Main","available":"maybe","email":"bad"},
                {"full_name":"Jane","headline":"","domain_name":"Roofing","address":"2 Main","available":"no","email":null}
            ]"#,
            ImportFormat::Json,
            ImportTarget::Professional,
        )
        .unwrap();

        let categories = [category("Plumbing")];
        let stored = [summary("Someone", "Baker", None)];
        let from_csv = validate_professional_rows(&csv_rows, &stored, &categories);
        let from_json = validate_professional_rows(&json_rows, &stored, &categories);

        assert!(!from_csv.valid);
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn test_duplicates_found_when_row_numbers_repeat() {
        let rows = vec![
            row(2, &[("name", "Plumbing"), ("status", "active")]),
            row(2, &[("name", "plumbing"), ("status", "active")]),
        ];
        let report = validate_category_rows(&rows, &[]);

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report
            .errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DuplicateInFile { row: 2 }));

        let jane = [
            ("full_name", "Jane Doe"),
            ("headline", "Plumber"),
            ("domain_name", "Plumbing"),
            ("address", "1 Main"),
            ("available", "yes"),
            ("email", "jane@example.com"),
            ("phone", "+1 555 0100"),
        ];
        let rows = vec![row(2, &jane), row(2, &jane)];
        let report = validate_professional_rows(&rows, &[], &[category("Plumbing")]);

        let mut fields = fields_for(&report, 2);
        fields.sort_unstable();
        assert_eq!(
            fields,
            vec!["email", "email", "full_name", "full_name", "phone", "phone"]
        );
    }

    #[test]
    fn test_category_column_lengths() {
        let long_name = "a".repeat(CATEGORY_NAME_MAX_LENGTH + 1);
        let long_icon = "x".repeat(CATEGORY_ICON_MAX_LENGTH + 1);
        let widest_name = "b".repeat(CATEGORY_NAME_MAX_LENGTH);
        let rows = vec![
            row(2, &[("name", long_name.as_str()), ("status", "active")]),
            row(3, &[("name", "Roofing"), ("status", "active"), ("icon", long_icon.as_str())]),
            row(4, &[("name", widest_name.as_str()), ("status", "active")]),
        ];
        let report = validate_category_rows(&rows, &[]);

        assert_eq!(fields_for(&report, 2), vec!["name"]);
        assert_eq!(report.errors[0].message, "Name must be at most 100 characters");
        assert_eq!(fields_for(&report, 3), vec!["icon"]);
        assert_eq!(report.errors[1].kind, ValidationErrorKind::Invalid);
        assert!(fields_for(&report, 4).is_empty());
    }

    #[test]
    fn test_overlong_domain_is_invalid_not_missing() {
        let domain = "d".repeat(CATEGORY_NAME_MAX_LENGTH + 1);
        let long_name = "n".repeat(PROFESSIONAL_NAME_MAX_LENGTH + 1);
        let rows = vec![row(
            2,
            &[
                ("full_name", long_name.as_str()),
                ("headline", "Plumber"),
                ("domain_name", domain.as_str()),
                ("address", "1 Main"),
                ("available", "no"),
            ],
        )];
        let report = validate_professional_rows(&rows, &[], &[]);

        assert!(!report.has_missing_domains());
        assert!(report.missing_domains().is_empty());
        let domain_error = report
            .errors
            .iter()
            .find(|e| e.field == "domain_name")
            .unwrap();
        assert_eq!(domain_error.kind, ValidationErrorKind::Invalid);
        assert!(report
            .errors
            .iter()
            .any(|e| e.field == "full_name" && e.message == "Full name must be at most 200 characters"));
    }
}
