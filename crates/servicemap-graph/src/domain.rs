//! Domain types for the service dependency graph.
//!
//! A [`Service`] is identified by its name. Its `dependencies` are plain names
//! that may or may not resolve to another record in the same collection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A service in the catalog.
///
/// `Eq` and `Hash` are structural, so two collections with identical content
/// compare equal regardless of where they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Service {
    /// Unique name, also the lookup key
    pub name: String,

    /// Short summary of what the service does
    #[serde(default)]
    pub description: String,

    /// Owning person or team
    #[serde(default)]
    pub owner: String,

    /// Source repository URL
    #[serde(default)]
    pub github: String,

    /// Names of the services this one depends on, in declared order.
    ///
    /// May contain duplicates, the service's own name, and names that are not
    /// present in the collection.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Service {
    /// Create a service with the given name and empty metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner: String::new(),
            github: String::new(),
            dependencies: Vec::new(),
        }
    }

    /// Replace the dependency list.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set the repository URL.
    #[must_use]
    pub fn with_github(mut self, github: impl Into<String>) -> Self {
        self.github = github.into();
        self
    }

    /// Check whether this service declares a dependency on `name`.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == name)
    }
}

/// A directed dependency edge: `source` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Edge identifier in `source->target` form
    pub id: String,

    /// The dependent service
    pub source: String,

    /// The service being depended upon
    pub target: String,

    /// Whether `target` names a service in the collection
    pub resolved: bool,
}

impl Edge {
    /// Create an edge from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>, resolved: bool) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}->{target}"),
            source,
            target,
            resolved,
        }
    }
}

/// Kind of analysis finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Services participating in a dependency cycle
    Cycle,

    /// A dependency naming a service that does not exist
    Missing,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle => write!(f, "cycle"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// A structural problem found in a collection.
///
/// Warnings are results, not errors: they are reported to the caller for
/// display and the collection is left as it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Warning {
    /// One or more dependency cycles.
    Cycle {
        /// Every service participating in the reported cycles
        members: BTreeSet<String>,
    },

    /// A dependency that does not resolve to a known service.
    Missing {
        /// The service declaring the dependency
        service: String,
        /// The unresolved dependency name
        target: String,
    },
}

impl Warning {
    /// The kind of this warning.
    pub fn kind(&self) -> WarningKind {
        match self {
            Self::Cycle { .. } => WarningKind::Cycle,
            Self::Missing { .. } => WarningKind::Missing,
        }
    }

    /// The service names this warning is about.
    ///
    /// For a cycle, every member in name order. For a missing reference, the
    /// single unresolved target.
    pub fn services(&self) -> Vec<&str> {
        match self {
            Self::Cycle { members } => members.iter().map(String::as_str).collect(),
            Self::Missing { target, .. } => vec![target.as_str()],
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { members } => {
                let names: Vec<&str> = members.iter().map(String::as_str).collect();
                write!(f, "Circular dependency detected: {}", names.join(" → "))
            }
            Self::Missing { service, target } => {
                write!(f, "{service} depends on {target}, which does not exist")
            }
        }
    }
}

impl Serialize for Warning {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let fields = match self {
            Self::Cycle { .. } => 3,
            Self::Missing { .. } => 4,
        };
        let mut state = serializer.serialize_struct("Warning", fields)?;
        state.serialize_field("type", &self.kind())?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("services", &self.services())?;
        if let Self::Missing { service, .. } = self {
            state.serialize_field("service", service)?;
        }
        state.end()
    }
}
