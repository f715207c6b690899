// src/core/syntax.rs
//! Read-only view of the declarations the classifier and route extractor
//! consume. Language parsers lower their concrete syntax trees into these
//! types; nothing downstream touches tree-sitter directly.

use serde::{Deserialize, Serialize};

/// An annotation argument value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Any single value, kept as its source text (quotes included)
    Literal(String),

    /// `{a, b, ...}` initializer, one source text per element
    Array(Vec<String>),
}

/// Arguments of one annotation use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationArgs {
    /// `@Name`
    None,

    /// `@Name(value)`
    Single(Expression),

    /// `@Name(key = value, ...)` or `@Name()`
    Named(Vec<(String, Expression)>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationUse {
    /// Identifier as written, without any qualifying prefix
    pub name: String,
    pub args: AnnotationArgs,
}

impl AnnotationUse {
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: AnnotationArgs::None,
        }
    }

    pub fn single(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            args: AnnotationArgs::Single(value),
        }
    }

    pub fn named(name: impl Into<String>, pairs: Vec<(&str, Expression)>) -> Self {
        Self {
            name: name.into(),
            args: AnnotationArgs::Named(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect(),
            ),
        }
    }

    /// Value of the named argument `key`, if this use has named arguments
    pub fn named_value(&self, key: &str) -> Option<&Expression> {
        match &self.args {
            AnnotationArgs::Named(pairs) => pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub annotations: Vec<AnnotationUse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub is_interface: bool,
    pub annotations: Vec<AnnotationUse>,
    pub methods: Vec<MethodDeclaration>,

    /// Owning package, empty for the default package
    pub package: String,
}

impl TypeDeclaration {
    /// `package.Name`, or just `Name` in the default package
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.package, &self.name)
    }
}

pub fn qualified_name(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{}.{}", package, simple)
    }
}

/// Structural counters for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub methods: u64,
    pub classes: u64,
    pub interfaces: u64,
    pub enums: u64,
}

/// Everything a language parser extracts from one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnit {
    pub package: String,
    pub metrics: FileMetrics,
    pub types: Vec<TypeDeclaration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_with_and_without_package() {
        assert_eq!(qualified_name("com.acme", "Order"), "com.acme.Order");
        assert_eq!(qualified_name("", "Order"), "Order");
    }

    #[test]
    fn test_named_value_lookup() {
        let anno = AnnotationUse::named(
            "RequestMapping",
            vec![
                ("path", Expression::Literal("\"/a\"".to_string())),
                ("method", Expression::Literal("RequestMethod.GET".to_string())),
            ],
        );

        assert_eq!(
            anno.named_value("method"),
            Some(&Expression::Literal("RequestMethod.GET".to_string()))
        );
        assert_eq!(anno.named_value("value"), None);
        assert_eq!(AnnotationUse::marker("GET").named_value("value"), None);
    }
}
