//! Service definition validation.
//!
//! Rules are checked explicitly rather than with regular expressions so that
//! each failure maps to one specific message. Every rule is checked; a record
//! can fail several at once.

use servicemap_graph::Service;
use thiserror::Error;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum owner length in characters
pub const MAX_OWNER_LENGTH: usize = 100;

/// Maximum service name length in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Required prefix for repository URLs
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// A single rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Description is empty or whitespace.
    #[error("description: required")]
    DescriptionRequired,

    /// Description exceeds [`MAX_DESCRIPTION_LENGTH`].
    #[error("description: must be at most {max} characters", max = MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong,

    /// Owner is empty or whitespace.
    #[error("owner: required")]
    OwnerRequired,

    /// Owner exceeds [`MAX_OWNER_LENGTH`].
    #[error("owner: must be at most {max} characters", max = MAX_OWNER_LENGTH)]
    OwnerTooLong,

    /// Repository URL is empty or whitespace.
    #[error("github: required")]
    GithubRequired,

    /// Repository URL does not point at github.com.
    #[error("github: must be a URL starting with {prefix}", prefix = GITHUB_URL_PREFIX)]
    GithubInvalid,

    /// Name is empty, too long, or has characters outside `[A-Za-z0-9_-]`.
    #[error(
        "name: only letters, digits, hyphens, and underscores are allowed (1-{max} characters)",
        max = MAX_NAME_LENGTH
    )]
    InvalidName,
}

/// Check `service` against every rule, in field order.
pub fn validate_service(service: &Service) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if service.description.trim().is_empty() {
        errors.push(ValidationError::DescriptionRequired);
    } else if service.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        errors.push(ValidationError::DescriptionTooLong);
    }

    if service.owner.trim().is_empty() {
        errors.push(ValidationError::OwnerRequired);
    } else if service.owner.chars().count() > MAX_OWNER_LENGTH {
        errors.push(ValidationError::OwnerTooLong);
    }

    if service.github.trim().is_empty() {
        errors.push(ValidationError::GithubRequired);
    } else if !is_valid_github_url(&service.github) {
        errors.push(ValidationError::GithubInvalid);
    }

    if !is_valid_service_name(&service.name) {
        errors.push(ValidationError::InvalidName);
    }

    errors
}

/// Whether `url` is `https://github.com/` followed by at least one character.
pub fn is_valid_github_url(url: &str) -> bool {
    url.strip_prefix(GITHUB_URL_PREFIX)
        .is_some_and(|rest| !rest.is_empty())
}

/// Whether `name` is 1 to [`MAX_NAME_LENGTH`] characters of `[A-Za-z0-9_-]`.
pub fn is_valid_service_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Join violations into one line, as reported per file.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid() -> Service {
        Service::new("user-service")
            .with_description("User management")
            .with_owner("user-team")
            .with_github("https://github.com/example/user-service")
    }

    #[test]
    fn test_valid_service() {
        assert!(validate_service(&valid()).is_empty());
    }

    // ========== Field Rules ==========

    #[rstest]
    #[case::empty("", ValidationError::DescriptionRequired)]
    #[case::blank("   ", ValidationError::DescriptionRequired)]
    #[case::too_long("x".repeat(501), ValidationError::DescriptionTooLong)]
    fn test_description_rules(#[case] description: impl Into<String>, #[case] expected: ValidationError) {
        let service = valid().with_description(description);
        assert_eq!(validate_service(&service), vec![expected]);
    }

    #[test]
    fn test_description_at_limit() {
        let service = valid().with_description("x".repeat(500));
        assert!(validate_service(&service).is_empty());
    }

    #[test]
    fn test_description_counts_characters_not_bytes() {
        let service = valid().with_description("é".repeat(500));
        assert!(validate_service(&service).is_empty());
    }

    #[rstest]
    #[case::empty("", ValidationError::OwnerRequired)]
    #[case::too_long("o".repeat(101), ValidationError::OwnerTooLong)]
    fn test_owner_rules(#[case] owner: impl Into<String>, #[case] expected: ValidationError) {
        let service = valid().with_owner(owner);
        assert_eq!(validate_service(&service), vec![expected]);
    }

    #[rstest]
    #[case::empty("", Some(ValidationError::GithubRequired))]
    #[case::other_host("https://gitlab.com/example/repo", Some(ValidationError::GithubInvalid))]
    #[case::http("http://github.com/example/repo", Some(ValidationError::GithubInvalid))]
    #[case::bare_host("https://github.com/", Some(ValidationError::GithubInvalid))]
    #[case::org_only("https://github.com/example", None)]
    fn test_github_rules(#[case] github: &str, #[case] expected: Option<ValidationError>) {
        let service = valid().with_github(github);
        assert_eq!(validate_service(&service), expected.into_iter().collect::<Vec<_>>());
    }

    #[rstest]
    #[case::simple("api", true)]
    #[case::hyphen_underscore("user_service-v2", true)]
    #[case::max_length("a".repeat(50), true)]
    #[case::empty("", false)]
    #[case::too_long("a".repeat(51), false)]
    #[case::dot("user.service", false)]
    #[case::space("user service", false)]
    #[case::non_ascii("サービス", false)]
    fn test_service_name(#[case] name: impl AsRef<str>, #[case] expected: bool) {
        assert_eq!(is_valid_service_name(name.as_ref()), expected);
    }

    // ========== Aggregation ==========

    #[test]
    fn test_all_violations_reported_together() {
        let service = Service::new("bad name");

        let errors = validate_service(&service);
        assert_eq!(
            errors,
            vec![
                ValidationError::DescriptionRequired,
                ValidationError::OwnerRequired,
                ValidationError::GithubRequired,
                ValidationError::InvalidName,
            ]
        );

        let message = describe(&errors);
        assert!(message.starts_with("description: required, owner: required"));
    }
}
