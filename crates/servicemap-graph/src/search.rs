//! Free-text search with one-hop highlight expansion.
//!
//! A query matches a service when its name, description, or owner contains the
//! query, ignoring case. The highlighted set is the matches plus their direct
//! neighborhood:
//!
//! - every dependency a matched service declares (one hop out), including
//!   names that do not resolve to a service
//! - every service that declares a dependency on a matched service (one hop in)
//!
//! Expansion never goes past one hop.
//!
//! # Blank Queries
//!
//! An empty or whitespace-only query is not a filter. It returns empty sets
//! and zero counts, and [`SearchResult::is_active`] is false: callers render
//! everything as-is rather than hiding everything.

use crate::domain::Service;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result counts shown next to a search box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchCounts {
    /// Services matching the query text
    pub matched: usize,
    /// Services highlighted only because they neighbor a match
    pub related: usize,
}

/// Outcome of a search over a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// The query as given
    pub query: String,

    /// Names of services whose text matched
    pub matched: BTreeSet<String>,

    /// Matched names plus their one-hop neighborhood
    pub highlighted: BTreeSet<String>,

    /// Sizes of `matched` and of `highlighted - matched`
    pub counts: SearchCounts,
}

impl SearchResult {
    /// Whether the query filters anything at all (false for blank queries).
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Whether `name` is part of the highlighted neighborhood.
    pub fn is_highlighted(&self, name: &str) -> bool {
        self.highlighted.contains(name)
    }

    /// Whether `name` is a direct text match.
    pub fn is_match(&self, name: &str) -> bool {
        self.matched.contains(name)
    }

    /// Whether a renderer should de-emphasize `name`.
    ///
    /// Nothing is dimmed while the highlighted set is empty, which covers both
    /// blank queries and queries without matches.
    pub fn is_dimmed(&self, name: &str) -> bool {
        !self.highlighted.is_empty() && !self.highlighted.contains(name)
    }

    /// Names highlighted only as neighbors of a match.
    pub fn related(&self) -> impl Iterator<Item = &str> {
        self.highlighted
            .difference(&self.matched)
            .map(String::as_str)
    }
}

/// Search `services` for `query` and expand matches by one hop.
pub fn search(query: &str, services: &[Service]) -> SearchResult {
    if query.trim().is_empty() {
        return SearchResult {
            query: query.to_string(),
            ..SearchResult::default()
        };
    }

    let needle = query.to_lowercase();
    let matched: BTreeSet<String> = services
        .iter()
        .filter(|service| matches_text(service, &needle))
        .map(|service| service.name.clone())
        .collect();

    let mut highlighted = matched.clone();

    // One hop out: what the matches depend on.
    for service in services.iter().filter(|s| matched.contains(&s.name)) {
        highlighted.extend(service.dependencies.iter().cloned());
    }

    // One hop in: what depends on a match.
    for service in services {
        if service.dependencies.iter().any(|dep| matched.contains(dep)) {
            highlighted.insert(service.name.clone());
        }
    }

    let counts = SearchCounts {
        matched: matched.len(),
        related: highlighted.len() - matched.len(),
    };

    tracing::debug!(
        query,
        matched = counts.matched,
        related = counts.related,
        "Search completed"
    );

    SearchResult {
        query: query.to_string(),
        matched,
        highlighted,
        counts,
    }
}

fn matches_text(service: &Service, needle: &str) -> bool {
    [&service.name, &service.description, &service.owner]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
