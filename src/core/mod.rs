// src/core/mod.rs
mod engine;
mod parser;
mod syntax;
mod annotations;
mod roles;
mod routes;
mod aggregator;
mod report;

// Language-specific parsers
mod languages;

pub use parser::{CodeParser, Discovery};
pub use syntax::{
    qualified_name, AnnotationArgs, AnnotationUse, Expression, FileMetrics, MethodDeclaration,
    ParsedUnit, TypeDeclaration,
};
pub use annotations::{
    has_annotation, is_annotation, mapping_paths, match_annotation, resolve, strip_quotes,
    AnnotationMatch,
};
pub use roles::{classify, classify_roles, is_domain_package, Classification, RoleBucket};
pub use routes::{format_route, RouteExtractor, RouteRecord};
pub use aggregator::{Aggregator, DiagnosticKind, FileDiagnostic, ScanReport, Summary};
pub use report::{render, render_text, write_report};

// Export the main engine
pub use engine::Engine;
