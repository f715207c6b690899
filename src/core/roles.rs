// src/core/roles.rs
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::annotations::has_annotation;
use super::syntax::{AnnotationUse, TypeDeclaration};

/// Architectural role a type can be sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleBucket {
    Controller,
    Service,
    Repository,
    Entity,
    Domain,
}

impl RoleBucket {
    pub const ALL: [RoleBucket; 5] = [
        RoleBucket::Controller,
        RoleBucket::Service,
        RoleBucket::Repository,
        RoleBucket::Entity,
        RoleBucket::Domain,
    ];

    /// Heading used in the text report
    pub fn title(&self) -> &'static str {
        match self {
            RoleBucket::Controller => "Controllers",
            RoleBucket::Service => "Services",
            RoleBucket::Repository => "Repositories",
            RoleBucket::Entity => "Entities (@Entity)",
            RoleBucket::Domain => "Domain classes (by package name hint)",
        }
    }
}

impl fmt::Display for RoleBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleBucket::Controller => "controller",
            RoleBucket::Service => "service",
            RoleBucket::Repository => "repository",
            RoleBucket::Entity => "entity",
            RoleBucket::Domain => "domain",
        };
        write!(f, "{}", name)
    }
}

/// Roles of one type together with the key it is recorded under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub qualified_name: String,
    pub roles: BTreeSet<RoleBucket>,
}

pub fn classify(decl: &TypeDeclaration) -> Classification {
    Classification {
        qualified_name: decl.qualified_name(),
        roles: classify_roles(&decl.name, &decl.annotations, &decl.package),
    }
}

pub fn classify_roles(
    simple_name: &str,
    annotations: &[AnnotationUse],
    package: &str,
) -> BTreeSet<RoleBucket> {
    let mut roles = BTreeSet::new();

    if has_annotation(annotations, "RestController")
        || has_annotation(annotations, "Controller")
        || simple_name.ends_with("Controller")
    {
        roles.insert(RoleBucket::Controller);
    }

    if has_annotation(annotations, "Service") || simple_name.ends_with("Service") {
        roles.insert(RoleBucket::Service);
    }

    if has_annotation(annotations, "Repository") || simple_name.ends_with("Repository") {
        roles.insert(RoleBucket::Repository);
    }

    // No name fallback for entities.
    if has_annotation(annotations, "Entity") {
        roles.insert(RoleBucket::Entity);
    }

    if is_domain_package(package) {
        roles.insert(RoleBucket::Domain);
    }

    roles
}

/// `domain` or `model` as a middle or trailing package segment
pub fn is_domain_package(package: &str) -> bool {
    ["domain", "model"].iter().any(|segment| {
        package.contains(&format!(".{}.", segment))
            || package.ends_with(&format!(".{}", segment))
    })
}
