//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::loader::validate::{MAX_NAME_LENGTH, is_valid_service_name};

/// Validate a service name argument.
///
/// Delegates to the loader's name rule, so anything accepted here could be
/// the stem of a definition file.
pub fn validate_service_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Service name cannot be empty".to_string());
    }

    if !is_valid_service_name(trimmed) {
        return Err(format!(
            "Invalid service name '{trimmed}': expected 1-{MAX_NAME_LENGTH} letters, digits, '-' or '_'"
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate a search query.
///
/// Queries are matched as given; only a query made entirely of whitespace
/// is rejected, since it would match nothing.
pub fn validate_query(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Search query cannot be empty".to_string());
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("api-gateway")]
    #[case("user_service")]
    #[case("  db  ")]
    #[case("S3")]
    fn test_validate_service_name_valid(#[case] input: &str) {
        assert_eq!(validate_service_name(input).unwrap(), input.trim());
    }

    #[rstest]
    #[case("", "cannot be empty")]
    #[case("   ", "cannot be empty")]
    #[case("has space", "Invalid service name")]
    #[case("dots.not.allowed", "Invalid service name")]
    fn test_validate_service_name_invalid(#[case] input: &str, #[case] expected: &str) {
        let err = validate_service_name(input).unwrap_err();
        assert!(err.contains(expected), "unexpected error: {err}");
    }

    #[test]
    fn test_validate_service_name_too_long() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_service_name(&name).is_err());
        assert!(validate_service_name(&name[1..]).is_ok());
    }

    #[test]
    fn test_validate_query_keeps_text() {
        assert_eq!(validate_query(" team ").unwrap(), " team ");
        assert!(validate_query(" \t ").is_err());
    }
}
