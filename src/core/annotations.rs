// src/core/annotations.rs
//! Annotation helpers shared by role classification and route extraction.
//!
//! Names are matched textually, never resolved to types. A lookup for
//! `RestController` accepts the exact simple name, and falls back to any
//! name that merely ends with it (`MyRestController`, and equally an
//! unrelated `NonRestController`). That fallback is a heuristic with known
//! false positives; [`match_annotation`] reports which tier matched so the
//! two can be told apart.

use super::syntax::{AnnotationArgs, AnnotationUse, Expression};

/// How an annotation name satisfied a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationMatch {
    /// Written name equals the target
    Exact,
    /// Written name only ends with the target
    Suffix,
}

pub fn match_annotation(annotation: &AnnotationUse, target: &str) -> Option<AnnotationMatch> {
    if annotation.name == target {
        Some(AnnotationMatch::Exact)
    } else if annotation.name.ends_with(target) {
        Some(AnnotationMatch::Suffix)
    } else {
        None
    }
}

pub fn is_annotation(annotation: &AnnotationUse, target: &str) -> bool {
    match_annotation(annotation, target).is_some()
}

pub fn has_annotation(annotations: &[AnnotationUse], target: &str) -> bool {
    annotations.iter().any(|a| is_annotation(a, target))
}

/// Project an argument expression onto its literal strings, in source order.
///
/// Symbolic values such as `RequestMethod.GET` or constant references come
/// back as their raw text. An empty `{}` yields no strings; callers supply
/// their own default.
pub fn resolve(expr: &Expression) -> Vec<String> {
    match expr {
        Expression::Literal(text) => vec![strip_quotes(text)],
        Expression::Array(items) => items.iter().map(|item| strip_quotes(item)).collect(),
    }
}

/// Drop one pair of matching `"` or `'` around the trimmed text
pub fn strip_quotes(text: &str) -> String {
    let trimmed = text.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

/// Path-bearing values of a mapping annotation: the unnamed argument, or
/// whichever of `path` / `value` is given (both, in written order, if both are).
pub fn mapping_paths(annotation: &AnnotationUse) -> Vec<String> {
    match &annotation.args {
        AnnotationArgs::None => Vec::new(),
        AnnotationArgs::Single(expr) => resolve(expr),
        AnnotationArgs::Named(pairs) => pairs
            .iter()
            .filter(|(key, _)| key == "path" || key == "value")
            .flat_map(|(_, expr)| resolve(expr))
            .collect(),
    }
}
