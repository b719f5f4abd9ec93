//! Random Cypher `CREATE` statement generation.

use crate::{
    counts::CountOverrides,
    parser::{PropertyType, Schema},
};
use rand::{seq::SliceRandom, Rng, RngCore};
use std::{collections::HashMap, fmt::Write};

/// Length of generated string property values.
const STRING_LEN: usize = 8;
/// Inclusive bounds of generated integer property values.
const INT_MIN: i64 = 1;
const INT_MAX: i64 = 1000;

fn rand_string(rng: &mut dyn RngCore) -> String {
    (0..STRING_LEN)
        .map(|_| rng.gen_range(b'A'..=b'Z') as char)
        .collect()
}

fn rand_int(rng: &mut dyn RngCore) -> i64 {
    rng.gen_range(INT_MIN..=INT_MAX)
}

/// Node statements together with the identifiers generated per internal
/// label. Every declared label has an entry, possibly empty.
#[derive(Debug, Default)]
pub struct GeneratedNodes {
    /// One `CREATE` statement per node instance, declaration order.
    pub statements: Vec<String>,
    /// Identifiers per internal label, in generation order.
    pub ids: HashMap<String, Vec<String>>,
}

/// Generates node `CREATE` statements for every node type in declaration
/// order, `counts.get(label, default_count)` instances each. Identifiers
/// are `"{label}_{i}"`, unique within a label by construction.
pub fn generate_nodes(
    schema: &Schema,
    counts: &CountOverrides,
    default_count: u64,
    rng: &mut dyn RngCore,
) -> GeneratedNodes {
    let mut out = GeneratedNodes::default();
    for node in &schema.nodes {
        let ids = out.ids.entry(node.label.clone()).or_default();
        for i in 0..counts.get(&node.label, default_count) {
            let id = format!("{}_{}", node.label, i);

            let mut props = String::new();
            for (index, (name, ty)) in node.properties.iter().enumerate() {
                if index != 0 {
                    props.push_str(", ");
                }
                match ty {
                    PropertyType::String => {
                        write!(props, "{}: '{}'", name, rand_string(rng))
                    }
                    PropertyType::Int => write!(props, "{}: {}", name, rand_int(rng)),
                }
                .unwrap();
            }

            out.statements.push(format!(
                "CREATE ({}:{} {{ {} }});",
                id, node.external_label, props
            ));
            ids.push(id);
        }
    }
    out
}

/// Generates relationship `CREATE` statements for every relationship type
/// in declaration order, up to `counts.get(label, default_count)` each.
///
/// A type whose start or end label has no generated identifiers is
/// skipped outright. Start and end are sampled uniformly with
/// replacement; an attempt that samples the same identifier twice is
/// dropped without retry, so the emitted count may fall short of the
/// requested one.
pub fn generate_relationships(
    schema: &Schema,
    nodes: &GeneratedNodes,
    counts: &CountOverrides,
    default_count: u64,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let mut statements = Vec::new();
    for rel in &schema.relationships {
        let (Some(starts), Some(ends)) = (nodes.ids.get(&rel.start), nodes.ids.get(&rel.end))
        else {
            // references an undeclared node label
            continue;
        };
        if starts.is_empty() || ends.is_empty() {
            continue;
        }

        for _ in 0..counts.get(&rel.label, default_count) {
            if let (Some(start), Some(end)) = (starts.choose(&mut *rng), ends.choose(&mut *rng)) {
                if start != end {
                    statements.push(format!(
                        "CREATE ({})-[:{}]->({});",
                        start, rel.external_label, end
                    ));
                }
            }
        }
    }
    statements
}
