//! Parsing PG-Schema text into node and relationship type descriptors.
//!
//! Parsing is line-oriented and permissive: a line either matches one of
//! the two recognized declaration shapes or it is ignored. Malformed input
//! never fails the run; it only shrinks the resulting schema.

use pest::{iterators::Pairs, Parser};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "schema.pest"]
struct SchemaParser;

/// A generated property value type. Unrecognized type tokens fall back to
/// [`PropertyType::String`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropertyType {
    /// A random fixed-length uppercase string.
    String,
    /// A random integer.
    Int,
}

impl PropertyType {
    fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("INT") {
            PropertyType::Int
        } else {
            PropertyType::String
        }
    }
}

/// A declared node type.
#[derive(Debug, Clone)]
pub struct NodeType {
    /// Internal label, the unique key used for cross-references.
    pub label: String,
    /// Label written into generated statements.
    pub external_label: String,
    /// Typed properties in declaration order, names unique per type.
    pub properties: Vec<(String, PropertyType)>,
}

/// A declared relationship type. `start` and `end` reference node types
/// by internal label; dangling references are tolerated here and skipped
/// at generation time.
#[derive(Debug, Clone)]
pub struct RelationshipType {
    /// Internal label. Not required to be unique; duplicates generate
    /// separately.
    pub label: String,
    /// Internal label of the start node type.
    pub start: String,
    /// Internal label of the end node type.
    pub end: String,
    /// Label written into generated statements.
    pub external_label: String,
}

/// A single recognized schema line.
#[derive(Debug, Clone)]
pub enum Declaration {
    Node(NodeType),
    Relationship(RelationshipType),
}

impl Declaration {
    /// Matches one trimmed line against the two declaration shapes.
    /// Returns `None` for anything else, including blank lines.
    ///
    /// Both rules are anchored to the whole line, so a declaration
    /// embedded in surrounding text (`foo (A: B {x INT}) bar`) is not
    /// recognized and the line is ignored like any other unmatched one.
    pub fn parse_line(line: &str) -> Option<Self> {
        if let Ok(mut pairs) = SchemaParser::parse(Rule::node_decl, line) {
            return Some(Declaration::Node(NodeType::from_pairs(
                pairs.next()?.into_inner(),
            )));
        }
        if let Ok(mut pairs) = SchemaParser::parse(Rule::rel_decl, line) {
            return Some(Declaration::Relationship(RelationshipType::from_pairs(
                pairs.next()?.into_inner(),
            )));
        }
        None
    }
}

impl NodeType {
    fn from_pairs(pairs: Pairs<'_, Rule>) -> Self {
        let mut label = String::new();
        let mut external_label = String::new();
        let mut properties = Vec::new();
        for pair in pairs {
            match pair.as_rule() {
                Rule::ident => {
                    if label.is_empty() {
                        label = pair.as_str().to_owned();
                    } else {
                        external_label = pair.as_str().to_owned();
                    }
                }
                Rule::prop_body => properties = parse_properties(pair.as_str()),
                _ => {}
            }
        }
        Self {
            label,
            external_label,
            properties,
        }
    }
}

impl RelationshipType {
    fn from_pairs(pairs: Pairs<'_, Rule>) -> Self {
        // grammar order: start, internal label, external label, end
        let mut idents = pairs
            .filter(|pair| pair.as_rule() == Rule::ident)
            .map(|pair| pair.as_str().to_owned());
        let start = idents.next().unwrap_or_default();
        let label = idents.next().unwrap_or_default();
        let external_label = idents.next().unwrap_or_default();
        let end = idents.next().unwrap_or_default();
        Self {
            label,
            start,
            end,
            external_label,
        }
    }
}

/// Splits a raw property block body into (name, type) pairs. Entries with
/// fewer than two whitespace-separated tokens are dropped; tokens beyond
/// the second are ignored.
fn parse_properties(body: &str) -> Vec<(String, PropertyType)> {
    body.split(',')
        .filter_map(|entry| {
            let mut tokens = entry.split_whitespace();
            let name = tokens.next()?;
            let ty = tokens.next()?;
            Some((name.to_owned(), PropertyType::from_token(ty)))
        })
        .collect()
}

/// The parsed schema: node types keyed by internal label and relationship
/// types in file order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Node types in declaration order.
    pub nodes: Vec<NodeType>,
    /// Relationship types in declaration order, duplicates preserved.
    pub relationships: Vec<RelationshipType>,
}

impl Schema {
    /// Parses PG-Schema text. Never fails: unrecognized lines are dropped.
    pub fn parse(text: &str) -> Self {
        let mut schema = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Declaration::parse_line(line) {
                Some(Declaration::Node(node)) => schema.insert_node(node),
                Some(Declaration::Relationship(rel)) => schema.relationships.push(rel),
                None => {}
            }
        }
        schema
    }

    // Last declaration wins; a re-declared label replaces the earlier
    // entry in place, keeping its original position.
    fn insert_node(&mut self, node: NodeType) {
        match self.nodes.iter_mut().find(|n| n.label == node.label) {
            Some(slot) => *slot = node,
            None => self.nodes.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_node_declaration() {
        let schema = Schema::parse("(PostType: Post {name STRING, post_id INT})");
        assert_eq!(schema.nodes.len(), 1);
        let node = &schema.nodes[0];
        assert_eq!(node.label, "PostType");
        assert_eq!(node.external_label, "Post");
        assert_eq!(
            node.properties,
            vec![
                ("name".to_owned(), PropertyType::String),
                ("post_id".to_owned(), PropertyType::Int),
            ]
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        let tight = Schema::parse("(PostType:Post{name STRING,post_id INT})");
        let loose = Schema::parse("(  PostType :  Post  { name   STRING ,  post_id   INT } )");
        for schema in [tight, loose] {
            let node = &schema.nodes[0];
            assert_eq!(node.label, "PostType");
            assert_eq!(node.external_label, "Post");
            assert_eq!(node.properties.len(), 2);
        }
    }

    #[test]
    fn empty_and_missing_property_blocks() {
        let schema = Schema::parse("(A: B {})\n(C: D)");
        assert_eq!(schema.nodes.len(), 2);
        assert!(schema.nodes[0].properties.is_empty());
        assert!(schema.nodes[1].properties.is_empty());
    }

    #[test]
    fn under_specified_property_entries_are_dropped() {
        let schema = Schema::parse("(A: B {name STRING, orphan, age INT UNSIGNED})");
        let node = &schema.nodes[0];
        // "orphan" has one token and is dropped; the extra "UNSIGNED"
        // token is ignored.
        assert_eq!(
            node.properties,
            vec![
                ("name".to_owned(), PropertyType::String),
                ("age".to_owned(), PropertyType::Int),
            ]
        );
    }

    #[test]
    fn unknown_property_types_fall_back_to_string() {
        let schema = Schema::parse("(A: B {when DATE, n int})");
        assert_eq!(
            schema.nodes[0].properties,
            vec![
                ("when".to_owned(), PropertyType::String),
                ("n".to_owned(), PropertyType::Int),
            ]
        );
    }

    #[test]
    fn parses_relationship_declaration() {
        let schema = Schema::parse("(:PostType)-[IsLocatedIn: isLocatedIn]->(:PlaceType)");
        assert_eq!(schema.relationships.len(), 1);
        let rel = &schema.relationships[0];
        assert_eq!(rel.label, "IsLocatedIn");
        assert_eq!(rel.start, "PostType");
        assert_eq!(rel.end, "PlaceType");
        assert_eq!(rel.external_label, "isLocatedIn");
    }

    #[test]
    fn relationship_whitespace_is_insignificant() {
        let schema = Schema::parse("( : A ) - [ R : r ] -> ( : B )");
        let rel = &schema.relationships[0];
        assert_eq!((rel.start.as_str(), rel.end.as_str()), ("A", "B"));
    }

    #[test]
    fn unrecognized_lines_are_ignored() {
        let schema = Schema::parse(
            "# a comment\n\
             (A: B {x INT})\n\
             CREATE GRAPH TYPE whatever\n\
             foo (C: D {x INT}) bar\n\
             (:A)-[R: r]->(:A)\n\
             (broken\n",
        );
        assert_eq!(schema.nodes.len(), 1);
        assert_eq!(schema.relationships.len(), 1);
    }

    #[test]
    fn duplicate_node_labels_overwrite_in_place() {
        let schema = Schema::parse("(A: First {x INT})\n(B: Other {})\n(A: Second {})");
        assert_eq!(schema.nodes.len(), 2);
        assert_eq!(schema.nodes[0].label, "A");
        assert_eq!(schema.nodes[0].external_label, "Second");
        assert!(schema.nodes[0].properties.is_empty());
        assert_eq!(schema.nodes[1].label, "B");
    }

    #[test]
    fn duplicate_relationship_labels_are_kept() {
        let schema = Schema::parse("(:A)-[R: r]->(:B)\n(:B)-[R: r2]->(:A)");
        assert_eq!(schema.relationships.len(), 2);
        assert_eq!(schema.relationships[0].external_label, "r");
        assert_eq!(schema.relationships[1].external_label, "r2");
    }

    #[test]
    fn declaration_order_is_preserved() {
        let schema = Schema::parse("(B: B {})\n(A: A {})\n(C: C {})");
        let labels: Vec<_> = schema.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["B", "A", "C"]);
    }
}
