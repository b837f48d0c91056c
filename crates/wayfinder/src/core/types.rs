//! Core type definitions for decision flows
//!
//! This module contains the fundamental types shared by the parser and the
//! wizard engine: node/edge data, the node type tag, and the derived
//! option/history records the engine hands to hosts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a node inside a troubleshooting flow
///
/// A closed set: every node is exactly one of these four. `Future` marks
/// roadmap items that behave like solutions but are not yet available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// An observable problem a user starts from
    #[default]
    Symptom,
    /// A question that narrows the problem down
    Diagnostic,
    /// A recommended fix
    Solution,
    /// A fix that is planned but not shipped yet
    Future,
}

impl NodeType {
    /// Returns true for the node types a walk can end on
    pub fn is_terminal_kind(&self) -> bool {
        matches!(self, NodeType::Solution | NodeType::Future)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Symptom => write!(f, "symptom"),
            NodeType::Diagnostic => write!(f, "diagnostic"),
            NodeType::Solution => write!(f, "solution"),
            NodeType::Future => write!(f, "future"),
        }
    }
}

/// A node in the flow with all its metadata
///
/// The parser fills in `id`, `label`, and `node_type`; the remaining fields
/// stay `None` until a [`DetailCatalog`](crate::wizard::DetailCatalog) join
/// enriches the node for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Unique identifier within one flow (map key)
    pub id: String,
    /// Display label (may differ from id)
    pub label: String,
    /// Role of this node in the flow
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl FlowNode {
    /// Create a new node with no enrichment details
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            description: None,
            pricing: None,
            benefits: None,
            url: None,
            icon: None,
        }
    }
}

/// A directed edge between two nodes
///
/// Dotted edges mark optional/related links; the wizard never walks them
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source node ID
    pub from: String,
    /// Target node ID
    pub to: String,
    /// Optional label shown on the transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// True for `-.->` edges
    pub is_dotted: bool,
}

impl FlowEdge {
    /// Create a new solid, unlabeled edge
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            is_dotted: false,
        }
    }

    /// Create a new edge with a label
    pub fn with_label(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
            is_dotted: false,
        }
    }

    /// Create a new dotted edge, optionally labeled
    pub fn dotted(
        from: impl Into<String>,
        to: impl Into<String>,
        label: Option<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label,
            is_dotted: true,
        }
    }
}

/// One selectable choice from the current node
///
/// The label falls back from the edge's own label, to the target node's
/// label, to the raw target id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextOption {
    /// Target node ID of the underlying edge
    pub target: String,
    /// Resolved display label for the choice
    pub label: String,
    /// True if the underlying edge is dotted (related link, not a forced step)
    pub is_dotted: bool,
}

/// One entry in the wizard's path history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    /// The resolved node at this position of the path
    pub node: FlowNode,
    /// The label under which this step was chosen, if one was recorded
    pub choice_label: Option<String>,
}
