// src/core/aggregator.rs
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::roles::{Classification, RoleBucket};
use super::routes::RouteRecord;
use super::syntax::FileMetrics;

/// Which per-file step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Walk,
    ReadLines,
    Parse,
}

/// A recoverable, file-scoped problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::Walk => {
                write!(f, "Error walking: {} - {}", self.path.display(), self.message)
            }
            DiagnosticKind::ReadLines => {
                write!(f, "Error reading lines: {} - {}", self.path.display(), self.message)
            }
            DiagnosticKind::Parse => {
                write!(f, "Parse error in {}: {}", self.path.display(), self.message)
            }
        }
    }
}

/// The eleven counters of the summary block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub methods: u64,
    pub classes: u64,
    pub interfaces: u64,
    pub enums: u64,
    pub loc: u64,
    pub controllers: usize,
    pub services: usize,
    pub repositories: usize,
    pub entities: usize,
    pub domain_classes: usize,
    pub endpoints: usize,
}

impl Summary {
    /// `(key, value)` pairs in report order
    pub fn entries(&self) -> [(&'static str, u64); 11] {
        [
            ("methods", self.methods),
            ("classes", self.classes),
            ("interfaces", self.interfaces),
            ("enums", self.enums),
            ("loc", self.loc),
            ("controllers", self.controllers as u64),
            ("services", self.services as u64),
            ("repositories", self.repositories as u64),
            ("entities", self.entities as u64),
            ("domainClasses", self.domain_classes as u64),
            ("endpoints", self.endpoints as u64),
        ]
    }
}

/// Finished result of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub summary: Summary,
    pub controllers: BTreeSet<String>,
    pub services: BTreeSet<String>,
    pub repositories: BTreeSet<String>,
    pub entities: BTreeSet<String>,
    pub domain_classes: BTreeSet<String>,
    pub endpoints: Vec<RouteRecord>,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ScanReport {
    pub fn bucket(&self, role: RoleBucket) -> &BTreeSet<String> {
        match role {
            RoleBucket::Controller => &self.controllers,
            RoleBucket::Service => &self.services,
            RoleBucket::Repository => &self.repositories,
            RoleBucket::Entity => &self.entities,
            RoleBucket::Domain => &self.domain_classes,
        }
    }
}

/// Accumulates classifications, routes and counters for a scan.
///
/// The engine fills one per file and merges it into the run-wide one, so a
/// file's contribution lands all at once or not at all.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    metrics: FileMetrics,
    loc: u64,
    buckets: [BTreeSet<String>; 5],
    routes: Vec<RouteRecord>,
    diagnostics: Vec<FileDiagnostic>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_metrics(&mut self, metrics: FileMetrics) {
        self.metrics.methods += metrics.methods;
        self.metrics.classes += metrics.classes;
        self.metrics.interfaces += metrics.interfaces;
        self.metrics.enums += metrics.enums;
    }

    pub fn record_lines(&mut self, lines: u64) {
        self.loc += lines;
    }

    /// Add a type to each of its buckets; re-adding a name is a no-op
    pub fn record_classification(&mut self, classification: &Classification) {
        for role in &classification.roles {
            self.buckets[bucket_index(*role)].insert(classification.qualified_name.clone());
        }
    }

    pub fn record_routes(&mut self, routes: impl IntoIterator<Item = RouteRecord>) {
        self.routes.extend(routes);
    }

    pub fn record_diagnostic(&mut self, diagnostic: FileDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Union buckets, append routes and diagnostics, sum counters
    pub fn merge(&mut self, other: Aggregator) {
        self.record_metrics(other.metrics);
        self.loc += other.loc;
        for (mine, theirs) in self.buckets.iter_mut().zip(other.buckets) {
            mine.extend(theirs);
        }
        self.routes.extend(other.routes);
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn finalize(self) -> ScanReport {
        let [controllers, services, repositories, entities, domain_classes] = self.buckets;

        let summary = Summary {
            methods: self.metrics.methods,
            classes: self.metrics.classes,
            interfaces: self.metrics.interfaces,
            enums: self.metrics.enums,
            loc: self.loc,
            controllers: controllers.len(),
            services: services.len(),
            repositories: repositories.len(),
            entities: entities.len(),
            domain_classes: domain_classes.len(),
            endpoints: self.routes.len(),
        };

        ScanReport {
            summary,
            controllers,
            services,
            repositories,
            entities,
            domain_classes,
            endpoints: self.routes,
            diagnostics: self.diagnostics,
        }
    }
}

fn bucket_index(role: RoleBucket) -> usize {
    match role {
        RoleBucket::Controller => 0,
        RoleBucket::Service => 1,
        RoleBucket::Repository => 2,
        RoleBucket::Entity => 3,
        RoleBucket::Domain => 4,
    }
}
