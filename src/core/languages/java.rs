// src/core/languages/java.rs
use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::config::ParsingConfig;
use crate::error::{MetricsError, Result};
use super::LanguageParser;
use crate::core::syntax::{
    AnnotationArgs, AnnotationUse, Expression, MethodDeclaration, ParsedUnit, TypeDeclaration,
};

/// Java parser using Tree-sitter
pub struct JavaParser {
    parser: Parser,
    include_nested_types: bool,
}

impl JavaParser {
    pub fn new(config: &ParsingConfig) -> Result<Self> {
        let mut parser = Parser::new();
        let java_language = tree_sitter_java::language();
        parser.set_language(&java_language)
            .map_err(|e| MetricsError::Parser(format!("Failed to set Java language: {}", e)))?;

        Ok(Self {
            parser,
            include_nested_types: config.include_nested_types,
        })
    }
}

impl LanguageParser for JavaParser {
    fn parse(&mut self, content: &str, _file_path: &Path) -> Result<ParsedUnit> {
        let tree = self.parser.parse(content, None)
            .ok_or_else(|| MetricsError::Parser("Failed to parse Java code".to_string()))?;

        let root_node = tree.root_node();
        if root_node.has_error() {
            return Err(MetricsError::Parser(self.describe_syntax_error(root_node)));
        }

        let mut unit = ParsedUnit {
            package: self.package_name(root_node, content),
            ..ParsedUnit::default()
        };
        self.collect_items(root_node, content, 0, &mut unit);

        Ok(unit)
    }

    fn file_extensions(&self) -> &[&str] {
        &["java"]
    }

    fn language_name(&self) -> &str {
        "java"
    }
}

impl JavaParser {
    /// Walk the tree counting declarations; `depth` is the number of
    /// enclosing type declarations.
    fn collect_items(&self, node: Node, source: &str, depth: usize, unit: &mut ParsedUnit) {
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "class_declaration" | "interface_declaration" => {
                    if child.kind() == "class_declaration" {
                        unit.metrics.classes += 1;
                    } else {
                        unit.metrics.interfaces += 1;
                    }

                    if depth == 0 || self.include_nested_types {
                        if let Some(decl) = self.parse_type(child, source, &unit.package) {
                            unit.types.push(decl);
                        }
                    }
                    self.collect_items(child, source, depth + 1, unit);
                }
                "enum_declaration" => {
                    unit.metrics.enums += 1;
                    self.collect_items(child, source, depth + 1, unit);
                }
                "record_declaration" | "annotation_type_declaration" => {
                    self.collect_items(child, source, depth + 1, unit);
                }
                "method_declaration" => {
                    unit.metrics.methods += 1;
                    self.collect_items(child, source, depth, unit);
                }
                _ => {
                    self.collect_items(child, source, depth, unit);
                }
            }
        }
    }

    /// Lower a class or interface declaration
    fn parse_type(&self, node: Node, source: &str, package: &str) -> Option<TypeDeclaration> {
        let name = self.node_text(node.child_by_field_name("name")?, source).to_string();

        let mut methods = Vec::new();
        if let Some(body_node) = node.child_by_field_name("body") {
            let mut cursor = body_node.walk();
            for child in body_node.named_children(&mut cursor) {
                if child.kind() == "method_declaration" {
                    if let Some(method) = self.parse_method(child, source) {
                        methods.push(method);
                    }
                }
            }
        }

        Some(TypeDeclaration {
            name,
            is_interface: node.kind() == "interface_declaration",
            annotations: self.parse_annotations(node, source),
            methods,
            package: package.to_string(),
        })
    }

    fn parse_method(&self, node: Node, source: &str) -> Option<MethodDeclaration> {
        let name = self.node_text(node.child_by_field_name("name")?, source).to_string();

        Some(MethodDeclaration {
            name,
            annotations: self.parse_annotations(node, source),
        })
    }

    /// Annotations written in a declaration's modifiers
    fn parse_annotations(&self, node: Node, source: &str) -> Vec<AnnotationUse> {
        let Some(modifiers) = self.find_child_by_kind(node, "modifiers") else {
            return Vec::new();
        };

        let mut annotations = Vec::new();
        let mut cursor = modifiers.walk();
        for child in modifiers.named_children(&mut cursor) {
            if child.kind() == "marker_annotation" || child.kind() == "annotation" {
                if let Some(annotation) = self.parse_annotation(child, source) {
                    annotations.push(annotation);
                }
            }
        }
        annotations
    }

    fn parse_annotation(&self, node: Node, source: &str) -> Option<AnnotationUse> {
        let written = self.node_text(node.child_by_field_name("name")?, source);
        // `@a.b.GetMapping` is known by its last segment
        let name = written.rsplit('.').next().unwrap_or(written).trim().to_string();

        let arguments = node
            .child_by_field_name("arguments")
            .or_else(|| self.find_child_by_kind(node, "annotation_argument_list"));
        let args = match arguments {
            Some(arguments) => self.parse_arguments(arguments, source),
            None => AnnotationArgs::None,
        };

        Some(AnnotationUse { name, args })
    }

    fn parse_arguments(&self, node: Node, source: &str) -> AnnotationArgs {
        let values = self.value_children(node);

        if values.iter().all(|v| v.kind() == "element_value_pair") {
            let pairs = values
                .iter()
                .filter_map(|pair| {
                    let last = pair.named_child_count().checked_sub(1)?;
                    let key = pair
                        .child_by_field_name("key")
                        .or_else(|| pair.named_child(0))?;
                    let value = pair
                        .child_by_field_name("value")
                        .or_else(|| pair.named_child(last))?;
                    Some((
                        self.node_text(key, source).to_string(),
                        self.parse_expression(value, source),
                    ))
                })
                .collect();
            AnnotationArgs::Named(pairs)
        } else {
            AnnotationArgs::Single(self.parse_expression(values[0], source))
        }
    }

    fn parse_expression(&self, node: Node, source: &str) -> Expression {
        if node.kind() == "element_value_array_initializer" {
            let items = self
                .value_children(node)
                .into_iter()
                .map(|item| self.node_text(item, source).trim().to_string())
                .collect();
            Expression::Array(items)
        } else {
            Expression::Literal(self.node_text(node, source).trim().to_string())
        }
    }

    /// Named children that are not comments
    fn value_children<'a>(&self, node: Node<'a>) -> Vec<Node<'a>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .collect()
    }

    /// Dotted name from the package declaration, empty for the default package
    fn package_name(&self, root: Node, source: &str) -> String {
        let Some(package) = self.find_child_by_kind(root, "package_declaration") else {
            return String::new();
        };

        let mut cursor = package.walk();
        let name = package
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"));

        name.map(|n| self.node_text(n, source).split_whitespace().collect::<String>())
            .unwrap_or_default()
    }

    /// Position of the first error or missing node, for diagnostics
    fn describe_syntax_error(&self, root: Node) -> String {
        match first_error(root) {
            Some(node) => {
                let position = node.start_position();
                let what = if node.is_missing() {
                    format!("missing `{}`", node.kind())
                } else {
                    "syntax error".to_string()
                };
                format!("{} at line {}, column {}", what, position.row + 1, position.column + 1)
            }
            None => "syntax error".to_string(),
        }
    }

    /// Extract text content of a node
    fn node_text<'s>(&self, node: Node, source: &'s str) -> &'s str {
        &source[node.byte_range()]
    }

    /// Find a child node by its kind
    fn find_child_by_kind<'a>(&self, node: Node<'a>, kind: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == kind {
                return Some(child);
            }
        }
        None
    }
}

fn first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}
