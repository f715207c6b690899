// src/core/routes.rs
//! HTTP route reconstruction from Spring and JAX-RS annotations.
//!
//! A type's routes are every Spring-derived record first (methods in
//! declaration order, class prefix outer, method path inner), then every
//! JAX-RS-derived record (methods in declaration order, class path, method
//! path, verb). Nothing is deduplicated.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::annotations::{is_annotation, mapping_paths, resolve};
use super::syntax::{AnnotationArgs, AnnotationUse, MethodDeclaration, TypeDeclaration};

const SPRING_VERBS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];
const JAXRS_VERBS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD"];

/// One reconstructed endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// HTTP verb, empty when the annotations leave it unspecified
    #[serde(rename = "method")]
    pub http_verb: String,

    /// Joined path, never empty
    pub path: String,

    /// Qualified name of the declaring type
    pub owner: String,

    /// Name of the handler method
    #[serde(rename = "handler")]
    pub method_name: String,
}

impl RouteRecord {
    fn new(http_verb: &str, path: String, owner: &str, method: &MethodDeclaration) -> Self {
        Self {
            http_verb: http_verb.to_string(),
            path,
            owner: owner.to_string(),
            method_name: method.name.clone(),
        }
    }
}

/// Verb and candidate paths of one Spring mapping annotation
#[derive(Debug, Clone, PartialEq, Eq)]
struct SpringMapping {
    http_verb: String,
    paths: Vec<String>,
}

/// All routes declared by `decl`
/// Builds the route table of one type declaration at a time
pub struct RouteExtractor {
    /// Regex matching runs of two or more slashes
    repeated_slashes: Regex,
}

impl RouteExtractor {
    pub fn new() -> Self {
        Self {
            repeated_slashes: Regex::new(r"//+").expect("Invalid repeated slash regex"),
        }
    }

    pub fn extract(&self, decl: &TypeDeclaration) -> Vec<RouteRecord> {
        let owner = decl.qualified_name();
        let mut routes = self.spring_routes(decl, &owner);
        routes.extend(self.jaxrs_routes(decl, &owner));
        routes
    }

    fn spring_routes(&self, decl: &TypeDeclaration, owner: &str) -> Vec<RouteRecord> {
        let mut prefixes: Vec<String> = decl
            .annotations
            .iter()
            .filter(|a| is_annotation(a, "RequestMapping"))
            .flat_map(mapping_paths)
            .collect();
        if prefixes.is_empty() {
            prefixes.push(String::new());
        }

        let mut routes = Vec::new();
        for method in &decl.methods {
            for mapping in method.annotations.iter().filter_map(spring_mapping) {
                for prefix in &prefixes {
                    for path in &mapping.paths {
                        routes.push(RouteRecord::new(
                            &mapping.http_verb,
                            self.join_paths(prefix, path),
                            owner,
                            method,
                        ));
                    }
                }
            }
        }
        routes
    }

    fn jaxrs_routes(&self, decl: &TypeDeclaration, owner: &str) -> Vec<RouteRecord> {
        let mut class_paths: Vec<String> =
            decl.annotations.iter().flat_map(jaxrs_paths).collect();
        if class_paths.is_empty() {
            class_paths.push(String::new());
        }

        let mut routes = Vec::new();
        for method in &decl.methods {
            let mut verbs: Vec<&str> = method
                .annotations
                .iter()
                .filter_map(|a| JAXRS_VERBS.iter().find(|verb| a.name == **verb).copied())
                .collect();
            let mut paths: Vec<String> = method.annotations.iter().flat_map(jaxrs_paths).collect();

            if verbs.is_empty() && paths.is_empty() {
                continue;
            }
            if verbs.is_empty() {
                verbs.push("");
            }
            if paths.is_empty() {
                paths.push(String::new());
            }

            for class_path in &class_paths {
                for path in &paths {
                    let full = self.join_paths(class_path, path);
                    for verb in &verbs {
                        routes.push(RouteRecord::new(verb, full.clone(), owner, method));
                    }
                }
            }
        }
        routes
    }

    /// Join two path fragments into one absolute path.
    ///
    /// Each non-empty fragment gets a leading `/`, runs of `/` collapse to one,
    /// and an empty result becomes `/`.
    pub fn join_paths(&self, prefix: &str, suffix: &str) -> String {
        let joined = [prefix, suffix]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part.starts_with('/') {
                    part.to_string()
                } else {
                    format!("/{}", part)
                }
            })
            .collect::<String>();

        if joined.is_empty() {
            "/".to_string()
        } else {
            self.repeated_slashes.replace_all(&joined, "/").into_owned()
        }
    }
}

impl Default for RouteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn spring_mapping(annotation: &AnnotationUse) -> Option<SpringMapping> {
    let fixed_verb = match annotation.name.as_str() {
        "GetMapping" => "GET",
        "PostMapping" => "POST",
        "PutMapping" => "PUT",
        "DeleteMapping" => "DELETE",
        "PatchMapping" => "PATCH",
        "RequestMapping" => "",
        _ => return None,
    };

    let http_verb = if fixed_verb.is_empty() {
        annotation
            .named_value("method")
            .map(|expr| request_method(&resolve(expr)))
            .unwrap_or_default()
    } else {
        fixed_verb.to_string()
    };

    let mut paths = mapping_paths(annotation);
    if paths.is_empty() {
        paths.push(String::new());
    }

    Some(SpringMapping { http_verb, paths })
}

/// First verb found in `RequestMethod.X` style values, checked in a fixed order
fn request_method(values: &[String]) -> String {
    values
        .iter()
        .find_map(|value| {
            let upper = value.to_uppercase();
            SPRING_VERBS.iter().find(|verb| upper.contains(*verb))
        })
        .map(|verb| verb.to_string())
        .unwrap_or_default()
}

/// Values of a JAX-RS `@Path`, skipping empty ones
fn jaxrs_paths(annotation: &AnnotationUse) -> Vec<String> {
    if annotation.name != "Path" {
        return Vec::new();
    }
    let values = match &annotation.args {
        AnnotationArgs::Single(expr) => resolve(expr),
        AnnotationArgs::Named(_) => annotation
            .named_value("value")
            .map(resolve)
            .unwrap_or_default(),
        AnnotationArgs::None => Vec::new(),
    };
    values.into_iter().filter(|path| !path.is_empty()).collect()
}

/// One endpoint line of the text report
pub fn format_route(route: &RouteRecord) -> String {
    let path = route.path.trim();
    let path = if path.is_empty() { "/" } else { path };
    format!(
        "{:<6} {:<30} -> {}#{}",
        route.http_verb.trim(),
        path,
        route.owner,
        route.method_name
    )
}
