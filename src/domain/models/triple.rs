//! Triple and graph types for the s2match core.
//!
//! A semantic graph decomposes into three triple kinds (§3 of the design
//! doc): instance triples bind a node to its concept, attribute triples bind
//! a node to a literal property (the `top` relation marks the root),
//! relation triples are labeled edges between two nodes.

use std::collections::HashMap;

/// One decomposed edge or property of a semantic graph, as produced by a
/// parser before node identifiers have been renamed to the dense `[0, N)`
/// scheme the core operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Triple {
    Instance { node: String, concept: String },
    Attribute { relation: String, node: String, value: String },
    Relation { relation: String, source: String, target: String },
}

/// A rooted, labeled semantic graph with dense integer node identifiers.
///
/// Node ids form `[0, node_count)`. Concept labels and literals are opaque
/// strings that may carry a trailing `-DD` predicate-sense suffix.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// `(node_id, concept)`, one entry per node.
    pub instances: Vec<(usize, String)>,
    /// `(relation_label, node_id, literal)`. `relation_label == "top"` marks the root.
    pub attributes: Vec<(String, usize, String)>,
    /// `(relation_label, source_node_id, target_node_id)`.
    pub relations: Vec<(String, usize, usize)>,
}

impl Graph {
    /// Number of nodes, i.e. the length of the candidate-mapping array a
    /// pool builder will produce for this graph as "graph 1".
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.instances.len()
    }

    /// Total triple count, used as the denominator in precision/recall (§4.6).
    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.instances.len() + self.attributes.len() + self.relations.len()
    }

    /// Build a dense graph from raw triples keyed by arbitrary variable
    /// names, renaming variables to `0..N` in first-seen order among the
    /// instance triples (§3 "renamed so its node identifiers are dense from
    /// 0"). Variables that appear only in attribute/relation triples but
    /// never as an instance are assigned trailing ids in first-seen order.
    #[must_use]
    pub fn from_triples(triples: &[Triple]) -> Self {
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut next_id = 0usize;
        let mut resolve = |var: &str, ids: &mut HashMap<String, usize>| -> usize {
            if let Some(&id) = ids.get(var) {
                id
            } else {
                let id = next_id;
                ids.insert(var.to_string(), id);
                next_id += 1;
                id
            }
        };

        let mut instances = Vec::new();
        for t in triples {
            if let Triple::Instance { node, concept } = t {
                let id = resolve(node, &mut ids);
                instances.push((id, concept.clone()));
            }
        }
        let mut attributes = Vec::new();
        let mut relations = Vec::new();
        for t in triples {
            match t {
                Triple::Instance { .. } => {}
                Triple::Attribute { relation, node, value } => {
                    let id = resolve(node, &mut ids);
                    attributes.push((relation.clone(), id, value.clone()));
                }
                Triple::Relation { relation, source, target } => {
                    let s = resolve(source, &mut ids);
                    let t = resolve(target, &mut ids);
                    relations.push((relation.clone(), s, t));
                }
            }
        }
        instances.sort_by_key(|(id, _)| *id);
        Self { instances, attributes, relations }
    }
}

/// A partial injective mapping from nodes of graph 1 to nodes of graph 2.
/// `None` at index `i` means node `i` is unmapped.
pub type Mapping = Vec<Option<usize>>;
