use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidateUrl;

lazy_static! {
    /// Basic `local@domain.tld` shape check for imported emails
    /// - Valid: "jane@example.com", "a.b@mail.example.org"
    /// - Invalid: "jane", "jane@example", "jane @example.com", "@example.com"
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Lower-case and strip every whitespace character; phone numbers compare on this form
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Lower-case and trim; names, emails and headlines compare on this form
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Well-formed absolute URL (scheme + host)
pub fn is_valid_url(value: &str) -> bool {
    value.trim().validate_url()
}

/// Parse the permissive availability spellings accepted at the import boundary
pub fn parse_availability(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex() {
        assert!(EMAIL_REGEX.is_match("jane@example.com"));
        assert!(EMAIL_REGEX.is_match("a.b+tag@mail.example.org"));
        assert!(!EMAIL_REGEX.is_match("jane"));
        assert!(!EMAIL_REGEX.is_match("jane@example"));
        assert!(!EMAIL_REGEX.is_match("jane doe@example.com"));
        assert!(!EMAIL_REGEX.is_match("@example.com"));
    }

    #[test]
    fn test_normalize_phone_strips_whitespace() {
        assert_eq!(normalize_phone(" +62 812 3456\t7890 "), "+6281234567890");
        assert_eq!(normalize_phone("EXT 12"), "ext12");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://www.linkedin.com/in/jane-doe"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn test_parse_availability() {
        assert_eq!(parse_availability("TRUE"), Some(true));
        assert_eq!(parse_availability("Yes"), Some(true));
        assert_eq!(parse_availability("no"), Some(false));
        assert_eq!(parse_availability(" false "), Some(false));
        assert_eq!(parse_availability("maybe"), None);
        assert_eq!(parse_availability(""), None);
    }
}
