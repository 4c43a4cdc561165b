//! Direct dependency lookups.
//!
//! Both queries scan the raw collection; no index is required. Absence of a
//! service and a service without dependencies both return an empty list, so
//! callers that need to tell them apart must check membership themselves.

use crate::domain::Service;

/// The declared dependencies of `name`, verbatim.
///
/// Declared order and duplicates are preserved. If several records share the
/// name, the first one in collection order answers.
pub fn dependencies_of(name: &str, services: &[Service]) -> Vec<String> {
    services
        .iter()
        .find(|service| service.name == name)
        .map(|service| service.dependencies.clone())
        .unwrap_or_default()
}

/// Names of the services that declare a dependency on `name`.
///
/// Collection order. A service listing `name` more than once appears once.
pub fn dependents_of(name: &str, services: &[Service]) -> Vec<String> {
    services
        .iter()
        .filter(|service| service.depends_on(name))
        .map(|service| service.name.clone())
        .collect()
}
