//! Name resolution for dependency references.
//!
//! [`ServiceIndex`] is built once per analysis call and handed to every
//! sub-operation that needs to resolve names.

use crate::domain::Service;
use std::collections::HashMap;

/// Outcome of resolving a dependency name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The name refers to a record in the collection
    Resolved(&'a Service),
    /// No record carries this name
    Dangling,
}

impl Resolution<'_> {
    /// Whether the name resolved to a record.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Lookup table from service name to record.
///
/// Borrows the collection read-only. When two records share a name, the one
/// appearing later in the collection wins.
#[derive(Debug, Clone, Default)]
pub struct ServiceIndex<'a> {
    by_name: HashMap<&'a str, &'a Service>,
}

impl<'a> ServiceIndex<'a> {
    /// Build the index in a single pass over `services`.
    pub fn build(services: &'a [Service]) -> Self {
        let mut by_name = HashMap::with_capacity(services.len());
        for service in services {
            by_name.insert(service.name.as_str(), service);
        }
        Self { by_name }
    }

    /// Look up a record by exact name.
    pub fn get(&self, name: &str) -> Option<&'a Service> {
        self.by_name.get(name).copied()
    }

    /// Whether `name` is a known service.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Classify a dependency reference.
    pub fn resolve(&self, name: &str) -> Resolution<'a> {
        match self.get(name) {
            Some(service) => Resolution::Resolved(service),
            None => Resolution::Dangling,
        }
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the index holds no names.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
