//! Dangling reference detection.

use crate::domain::{Service, Warning};
use crate::resolver::ServiceIndex;

/// Report every dependency that does not name a service in the collection.
///
/// One warning per occurrence, in collection order and then declared order.
/// Two services referencing the same missing name produce two warnings.
pub fn detect_missing_references(services: &[Service]) -> Vec<Warning> {
    let index = ServiceIndex::build(services);
    detect_with_index(services, &index)
}

pub(crate) fn detect_with_index(services: &[Service], index: &ServiceIndex<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for service in services {
        for dep in &service.dependencies {
            if !index.contains(dep.as_str()) {
                warnings.push(Warning::Missing {
                    service: service.name.clone(),
                    target: dep.clone(),
                });
            }
        }
    }

    warnings
}
