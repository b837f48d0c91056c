//! Two-pass flow parser
//!
//! Pass 1 ([`ClassIndex::scan`]) resolves class buckets and assignments so
//! they are available no matter where they appear in the source. Pass 2
//! walks the lines again, tracking at most one active subgraph context, and
//! builds the node map and edge list. A final reconciliation pass re-applies
//! class buckets over every assigned node, which is the only mechanism that
//! corrects the type of nodes auto-created from edge endpoints.
//!
//! Parsing is pure and infallible: unrecognized lines are dropped, never
//! reported. See [`ParseCache`](crate::flow::ParseCache) for memoization.

use tracing::{debug, span, Level};

use crate::core::{FlowEdge, FlowNode, NodeType};
use crate::flow::classes::ClassIndex;
use crate::flow::grammar::{match_line, LineStatement};
use crate::flow::model::{is_entry_id, matches_prefix_digits, ParsedFlow};

/// Subgraph names that imply a node type for definitions inside them
const SYMPTOMS_SUBGRAPH: &str = "SYMPTOMS";
const DIAGNOSTICS_SUBGRAPH: &str = "DIAGNOSTICS";
const SOLUTIONS_SUBGRAPH: &str = "SOLUTIONS";

/// Id prefix marking solution nodes
const SOLUTION_ID_PREFIX: &str = "SOL_";

/// Parse diagram source into a [`ParsedFlow`]
///
/// # Example
///
/// ```rust
/// let flow = wayfinder::parse_flow("flowchart TD\nS1[\"Slow queries\"]\nS1-->D1\n");
/// assert_eq!(flow.node_count(), 2);
/// assert_eq!(flow.edge_count(), 1);
/// ```
pub fn parse_flow(source: &str) -> ParsedFlow {
    let parse_span = span!(Level::DEBUG, "parse_flow", source_len = source.len());
    let _enter = parse_span.enter();

    let classes = ClassIndex::scan(source);
    let mut flow = ParsedFlow::default();

    // Single active subgraph context; never nested. Any `end` clears it.
    let mut subgraph: Option<String> = None;

    for line in source.lines() {
        match match_line(line) {
            Some(LineStatement::SubgraphOpen(name)) => subgraph = Some(name),
            Some(LineStatement::SubgraphEnd) => subgraph = None,
            // Consumed by the first pass
            Some(LineStatement::ClassDef { .. }) | Some(LineStatement::ClassAssign { .. }) => {}
            Some(LineStatement::Edge {
                from,
                to,
                label,
                dotted,
            }) => {
                ensure_node(&mut flow, &from);
                ensure_node(&mut flow, &to);
                flow.push_edge(FlowEdge {
                    from,
                    to,
                    label,
                    is_dotted: dotted,
                });
            }
            Some(LineStatement::Node {
                id,
                label,
                decision,
            }) => {
                // Curly-brace nodes are always diagnostics, even when a class
                // assignment says otherwise
                let node_type = if decision {
                    NodeType::Diagnostic
                } else {
                    determine_node_type(&id, subgraph.as_deref(), &classes)
                };
                flow.insert_node(FlowNode::new(id, label, node_type));
            }
            None => {}
        }
    }

    // Reconciliation: class buckets win over whatever type a node was given
    // at creation time
    for (id, class) in classes.assignments() {
        if let Some(bucket) = classes.bucket(class) {
            flow.set_node_type(id, bucket);
        }
    }

    flow.rebuild_derived_lists();

    debug!(
        node_count = flow.node_count(),
        edge_count = flow.edge_count(),
        symptom_count = flow.symptoms().count(),
        solution_count = flow.solutions().count(),
        "flow parsed"
    );
    flow
}

/// Auto-create an edge endpoint that has no standalone definition yet
///
/// Such nodes get `Symptom` type and their id as label, skipping type
/// inference entirely; only a later standalone definition or an explicit
/// class assignment (via reconciliation) changes them.
fn ensure_node(flow: &mut ParsedFlow, id: &str) {
    if !flow.has_node(id) {
        flow.insert_node(FlowNode::new(id, id, NodeType::Symptom));
    }
}

/// Type inference for standalone node definitions
///
/// Precedence: explicit class assignment, id convention, enclosing subgraph,
/// then the `Symptom` default.
fn determine_node_type(id: &str, subgraph: Option<&str>, classes: &ClassIndex) -> NodeType {
    if let Some(bucket) = classes.bucket_for_node(id) {
        return bucket;
    }

    if is_entry_id(id) {
        return NodeType::Symptom;
    }
    if matches_prefix_digits(id, 'D') {
        return NodeType::Diagnostic;
    }
    if id.starts_with(SOLUTION_ID_PREFIX) {
        return NodeType::Solution;
    }

    match subgraph {
        Some(SYMPTOMS_SUBGRAPH) => NodeType::Symptom,
        Some(DIAGNOSTICS_SUBGRAPH) => NodeType::Diagnostic,
        Some(SOLUTIONS_SUBGRAPH) => NodeType::Solution,
        _ => NodeType::Symptom,
    }
}
