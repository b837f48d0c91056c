//! Parsed flow model
//!
//! The immutable output of the two-pass parse: a node map, an edge list,
//! and the two derived lists (entry symptoms, terminal solutions).
//! Maintains insertion order for deterministic iteration. Once built, a
//! `ParsedFlow` is read-only and can be shared across any number of
//! concurrent wizard sessions, e.g. behind an `Arc`.

use std::collections::HashMap;

use tracing::trace;

use crate::core::{FlowEdge, FlowNode, NextOption, NodeType};

/// A parsed decision flow
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedFlow {
    /// Nodes indexed by ID
    nodes: HashMap<String, FlowNode>,
    /// Node IDs in insertion order (for deterministic iteration)
    node_order: Vec<String>,
    /// Edges in insertion order
    edges: Vec<FlowEdge>,
    /// Entry-point nodes: Symptom-typed AND matching the `S<digits>` id convention
    symptom_ids: Vec<String>,
    /// Terminal candidates: every Solution or Future node
    solution_ids: Vec<String>,
}

impl ParsedFlow {
    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Iterate over all edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Entry-point symptom nodes, in insertion order
    ///
    /// Narrower than "all Symptom-typed nodes": only ids matching the
    /// `S<digits>` entry convention qualify.
    pub fn symptoms(&self) -> impl Iterator<Item = &FlowNode> {
        self.symptom_ids.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Every Solution or Future node, in insertion order
    pub fn solutions(&self) -> impl Iterator<Item = &FlowNode> {
        self.solution_ids.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Outgoing edges of a node
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Number of outgoing edges of a node
    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing(id).count()
    }

    /// All outgoing edges of a node as display-ready options
    ///
    /// The option label falls back from the edge label, to the target node's
    /// label, to the raw target id. An unknown id yields an empty list.
    pub fn options_from(&self, id: &str) -> Vec<NextOption> {
        self.outgoing(id)
            .map(|edge| {
                let label = edge
                    .label
                    .clone()
                    .or_else(|| self.nodes.get(&edge.to).map(|n| n.label.clone()))
                    .unwrap_or_else(|| edge.to.clone());
                NextOption {
                    target: edge.to.clone(),
                    label,
                    is_dotted: edge.is_dotted,
                }
            })
            .collect()
    }

    /// True iff the node is Solution/Future-typed and has no non-dotted
    /// outgoing edge; dotted edges never disqualify terminal status
    pub fn is_terminal(&self, id: &str) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.node_type.is_terminal_kind() && !self.outgoing(id).any(|e| !e.is_dotted)
    }

    /// Insert a node, overwriting any existing node with the same id while
    /// keeping its original insertion position
    pub(crate) fn insert_node(&mut self, node: FlowNode) {
        trace!(node_id = %node.id, node_label = %node.label, node_type = %node.node_type, "inserting node");
        if !self.nodes.contains_key(&node.id) {
            self.node_order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }

    /// Append an edge
    pub(crate) fn push_edge(&mut self, edge: FlowEdge) {
        trace!(edge_from = %edge.from, edge_to = %edge.to, dotted = edge.is_dotted, "inserting edge");
        self.edges.push(edge);
    }

    /// Overwrite a node's type (reconciliation pass)
    pub(crate) fn set_node_type(&mut self, id: &str, node_type: NodeType) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.node_type = node_type;
        }
    }

    /// Recompute the derived symptom/solution lists from the node map
    pub(crate) fn rebuild_derived_lists(&mut self) {
        self.symptom_ids = self
            .node_order
            .iter()
            .filter(|id| {
                is_entry_id(id)
                    && self
                        .nodes
                        .get(*id)
                        .is_some_and(|n| n.node_type == NodeType::Symptom)
            })
            .cloned()
            .collect();

        self.solution_ids = self
            .node_order
            .iter()
            .filter(|id| {
                self.nodes
                    .get(*id)
                    .is_some_and(|n| n.node_type.is_terminal_kind())
            })
            .cloned()
            .collect();
    }
}

/// True for ids matching the entry convention: `S` followed by digits only
pub(crate) fn is_entry_id(id: &str) -> bool {
    matches_prefix_digits(id, 'S')
}

/// True for `<prefix><digits>` ids like `S12` or `D3`
pub(crate) fn matches_prefix_digits(id: &str, prefix: char) -> bool {
    let mut chars = id.chars();
    chars.next() == Some(prefix)
        && id.len() > prefix.len_utf8()
        && chars.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_flow() -> ParsedFlow {
        let mut flow = ParsedFlow::default();
        flow.insert_node(FlowNode::new("S1", "Slow queries", NodeType::Symptom));
        flow.insert_node(FlowNode::new("D1", "Read or write heavy?", NodeType::Diagnostic));
        flow.insert_node(FlowNode::new("SOL_A", "Add index", NodeType::Solution));
        flow.insert_node(FlowNode::new("SOL_B", "Scale up", NodeType::Future));
        flow.push_edge(FlowEdge::new("S1", "D1"));
        flow.push_edge(FlowEdge::with_label("D1", "SOL_A", "reads"));
        flow.push_edge(FlowEdge::dotted("SOL_A", "SOL_B", None));
        flow.rebuild_derived_lists();
        flow
    }

    #[test]
    fn test_basic_queries() {
        let flow = sample_flow();
        assert_eq!(flow.node_count(), 4);
        assert_eq!(flow.edge_count(), 3);
        assert!(flow.has_node("S1"));
        assert!(!flow.has_node("Z9"));
        assert_eq!(flow.get_node("D1").unwrap().label, "Read or write heavy?");
    }

    #[test]
    fn test_insertion_order_iteration() {
        let flow = sample_flow();
        let ids: Vec<_> = flow.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "D1", "SOL_A", "SOL_B"]);
    }

    #[test]
    fn test_insert_node_overwrites_in_place() {
        let mut flow = sample_flow();
        flow.insert_node(FlowNode::new("S1", "Renamed", NodeType::Symptom));
        assert_eq!(flow.node_count(), 4);
        assert_eq!(flow.get_node("S1").unwrap().label, "Renamed");
        let ids: Vec<_> = flow.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids[0], "S1");
    }

    #[test]
    fn test_derived_lists() {
        let flow = sample_flow();
        let symptoms: Vec<_> = flow.symptoms().map(|n| n.id.as_str()).collect();
        assert_eq!(symptoms, vec!["S1"]);
        let solutions: Vec<_> = flow.solutions().map(|n| n.id.as_str()).collect();
        assert_eq!(solutions, vec!["SOL_A", "SOL_B"]);
    }

    #[test]
    fn test_symptom_list_requires_entry_id() {
        let mut flow = sample_flow();
        // Symptom-typed, but id does not match the entry convention
        flow.insert_node(FlowNode::new("EXTRA", "Stray", NodeType::Symptom));
        flow.rebuild_derived_lists();
        let symptoms: Vec<_> = flow.symptoms().map(|n| n.id.as_str()).collect();
        assert_eq!(symptoms, vec!["S1"]);
    }

    #[test]
    fn test_options_label_fallback() {
        let flow = sample_flow();
        // Edge label wins
        let d1 = flow.options_from("D1");
        assert_eq!(d1.len(), 1);
        assert_eq!(d1[0].label, "reads");
        // Falls back to the target node's label
        let s1 = flow.options_from("S1");
        assert_eq!(s1[0].label, "Read or write heavy?");
        // Unknown id yields no options
        assert!(flow.options_from("nope").is_empty());
    }

    #[test]
    fn test_options_include_dotted_edges() {
        let flow = sample_flow();
        let opts = flow.options_from("SOL_A");
        assert_eq!(opts.len(), 1);
        assert!(opts[0].is_dotted);
        // Dotted target has no label on the edge: falls back to node label
        assert_eq!(opts[0].label, "Scale up");
    }

    #[test]
    fn test_is_terminal() {
        let flow = sample_flow();
        // Solution with only a dotted outgoing edge is still terminal
        assert!(flow.is_terminal("SOL_A"));
        assert!(flow.is_terminal("SOL_B"));
        // Wrong type
        assert!(!flow.is_terminal("S1"));
        assert!(!flow.is_terminal("D1"));
        // Missing node
        assert!(!flow.is_terminal("nope"));
    }

    #[test]
    fn test_terminal_requires_no_forced_exit() {
        let mut flow = sample_flow();
        flow.push_edge(FlowEdge::new("SOL_A", "D1"));
        assert!(!flow.is_terminal("SOL_A"));
    }

    #[test]
    fn test_entry_id_convention() {
        assert!(is_entry_id("S1"));
        assert!(is_entry_id("S27"));
        assert!(!is_entry_id("S"));
        assert!(!is_entry_id("SOL_1"));
        assert!(!is_entry_id("D4"));
        assert!(!is_entry_id("s1"));
        assert!(matches_prefix_digits("D12", 'D'));
        assert!(!matches_prefix_digits("D", 'D'));
        assert!(!matches_prefix_digits("DX", 'D'));
    }
}
