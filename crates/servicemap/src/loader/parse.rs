//! Service definition parsing.
//!
//! A definition file is a YAML mapping. Field values are coerced leniently:
//! scalars of any type become their string form, `null` or an absent key
//! becomes an empty string, and a `dependencies` value that is not a sequence
//! becomes an empty list. Only a document that is not a mapping at all (or
//! not YAML) is rejected.

use serde_yaml::Value;
use servicemap_graph::Service;
use thiserror::Error;

/// Why a definition file could not be turned into a [`Service`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The content is not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(String),

    /// The document parsed but is not a mapping.
    #[error("YAML parse error: not a mapping")]
    NotAMapping,
}

/// Parse `content` into a service named `name`.
///
/// The name always comes from the caller (the file stem); a `name` key in the
/// document is ignored.
pub fn parse_service_yaml(content: &str, name: &str) -> Result<Service, ParseError> {
    let document: Value =
        serde_yaml::from_str(content).map_err(|e| ParseError::Yaml(e.to_string()))?;

    let Value::Mapping(mapping) = document else {
        return Err(ParseError::NotAMapping);
    };

    let field = |key: &str| mapping.get(key).map(coerce_field).unwrap_or_default();

    let dependencies = match mapping.get("dependencies") {
        Some(Value::Sequence(items)) => items.iter().map(coerce_item).collect(),
        _ => Vec::new(),
    };

    Ok(Service {
        name: name.to_string(),
        description: field("description"),
        owner: field("owner"),
        github: field("github"),
        dependencies,
    })
}

/// String form of a top-level field; `null` is empty.
fn coerce_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => coerce_item(other),
    }
}

/// String form of any value, used for list entries.
fn coerce_item(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(coerce_item).collect::<Vec<_>>().join(","),
        Value::Mapping(_) => "[object]".to_string(),
        Value::Tagged(tagged) => coerce_item(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_full_definition() {
        let content = "\
description: User management
owner: user-team
github: https://github.com/example/user-service
dependencies:
  - database
  - cache
";
        let service = parse_service_yaml(content, "user-service").unwrap();

        assert_eq!(service.name, "user-service");
        assert_eq!(service.description, "User management");
        assert_eq!(service.owner, "user-team");
        assert_eq!(service.github, "https://github.com/example/user-service");
        assert_eq!(service.dependencies, vec!["database", "cache"]);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let service = parse_service_yaml("owner: team\n", "svc").unwrap();

        assert_eq!(service.description, "");
        assert_eq!(service.github, "");
        assert!(service.dependencies.is_empty());
    }

    #[test]
    fn test_name_key_is_ignored() {
        let service = parse_service_yaml("name: other\nowner: team\n", "from-file").unwrap();
        assert_eq!(service.name, "from-file");
    }

    #[rstest]
    #[case::number("owner: 42", "42")]
    #[case::float("owner: 1.5", "1.5")]
    #[case::boolean("owner: true", "true")]
    #[case::null("owner: ~", "")]
    #[case::quoted("owner: \"007\"", "007")]
    fn test_scalar_coercion(#[case] content: &str, #[case] expected: &str) {
        assert_eq!(parse_service_yaml(content, "svc").unwrap().owner, expected);
    }

    #[rstest]
    #[case::string("dependencies: database")]
    #[case::mapping("dependencies:\n  database: true")]
    #[case::null("dependencies:")]
    fn test_non_sequence_dependencies_become_empty(#[case] content: &str) {
        let service = parse_service_yaml(content, "svc").unwrap();
        assert!(service.dependencies.is_empty());
    }

    #[test]
    fn test_dependency_entries_are_coerced() {
        let service = parse_service_yaml("dependencies: [db, 42, true]", "svc").unwrap();
        assert_eq!(service.dependencies, vec!["db", "42", "true"]);
    }

    #[rstest]
    #[case::scalar("just a string")]
    #[case::sequence("- a\n- b")]
    #[case::empty("")]
    fn test_non_mapping_document(#[case] content: &str) {
        assert_eq!(
            parse_service_yaml(content, "svc"),
            Err(ParseError::NotAMapping)
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_service_yaml("description: [unclosed", "svc").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML parse error"));
    }
}
