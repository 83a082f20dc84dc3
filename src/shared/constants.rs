/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// IMPORT CONSTANTS
// =============================================================================

/// Columns a category import file must provide
pub const CATEGORY_REQUIRED_FIELDS: &[&str] = &["name", "status"];

/// Columns a category import file may provide
pub const CATEGORY_OPTIONAL_FIELDS: &[&str] = &["description", "icon"];

/// Columns a professional import file must provide
pub const PROFESSIONAL_REQUIRED_FIELDS: &[&str] =
    &["full_name", "headline", "domain_name", "address", "available"];

/// Columns a professional import file may provide
pub const PROFESSIONAL_OPTIONAL_FIELDS: &[&str] = &[
    "bio",
    "email",
    "phone",
    "website",
    "linkedin_url",
    "instagram_url",
    "city",
    "image_url",
];

// =============================================================================
// COLUMN LIMITS (match the migration's VARCHAR widths)
// =============================================================================

pub const CATEGORY_NAME_MAX_LENGTH: usize = 100;
pub const CATEGORY_DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const CATEGORY_ICON_MAX_LENGTH: usize = 16;
pub const PROFESSIONAL_NAME_MAX_LENGTH: usize = 200;
pub const PROFESSIONAL_HEADLINE_MAX_LENGTH: usize = 200;
pub const PROFESSIONAL_BIO_MAX_LENGTH: usize = 5000;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PHONE_MAX_LENGTH: usize = 50;
pub const CITY_MAX_LENGTH: usize = 100;
pub const ADDRESS_MAX_LENGTH: usize = 500;
