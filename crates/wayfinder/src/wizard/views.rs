//! Derived read-only views
//!
//! Pure functions recomputed from the flow, the state, and the catalog.
//! None of them mutate anything, and all of them are defensive about ids
//! that are missing from the node map.

use serde::Serialize;

use crate::core::{FlowNode, NextOption, PathStep};
use crate::flow::ParsedFlow;
use crate::wizard::catalog::{DetailCatalog, SolutionInfo};
use crate::wizard::state::WizardState;

/// Assumed typical number of steps from symptom to solution, used only for
/// the progress estimate
pub const ESTIMATED_DECISION_DEPTH: usize = 4;

/// Progress cap while a walk is still in flight
const INCOMPLETE_PROGRESS_CAP: usize = 90;

/// The node the wizard is currently on
pub fn current_node<'a>(flow: &'a ParsedFlow, state: &WizardState) -> Option<&'a FlowNode> {
    state
        .current_node_id
        .as_deref()
        .and_then(|id| flow.get_node(id))
}

/// All options from the current node, dotted ones included
pub fn options(flow: &ParsedFlow, state: &WizardState) -> Vec<NextOption> {
    state
        .current_node_id
        .as_deref()
        .map(|id| flow.options_from(id))
        .unwrap_or_default()
}

/// True when the current node is a solution (or future) node
pub fn is_solution(flow: &ParsedFlow, state: &WizardState) -> bool {
    current_node(flow, state).map_or(false, |n| n.node_type.is_terminal_kind())
}

/// Percentage estimate of how far along the walk is
///
/// 0 before anything is selected, 100 once complete; otherwise scaled
/// against [`ESTIMATED_DECISION_DEPTH`] and capped at 90. The estimate does
/// not consult actual graph distance.
pub fn progress(state: &WizardState) -> u8 {
    if state.path.is_empty() {
        0
    } else if state.is_complete {
        100
    } else {
        let estimate = state.path.len() * 100 / ESTIMATED_DECISION_DEPTH;
        estimate.min(INCOMPLETE_PROGRESS_CAP) as u8
    }
}

/// The resolved path so far, with any recorded choice labels
///
/// Path entries that resolve to no node are skipped.
pub fn path_history(flow: &ParsedFlow, state: &WizardState) -> Vec<PathStep> {
    state
        .path
        .iter()
        .enumerate()
        .filter_map(|(index, id)| {
            flow.get_node(id).map(|node| PathStep {
                node: node.clone(),
                choice_label: state.choice_label(index).map(str::to_string),
            })
        })
        .collect()
}

/// An alternate solution reachable from the current node via a dotted edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedSolution {
    /// Target node id of the dotted edge
    pub node_id: String,
    /// The externally supplied solution record
    pub details: SolutionInfo,
    /// The dotted edge's own label, if any
    pub label: Option<String>,
}

/// Dotted links from the current node to cataloged solutions
///
/// Targets without a catalog entry are omitted; the join never invents
/// records here.
pub fn related_solutions(
    flow: &ParsedFlow,
    state: &WizardState,
    catalog: &DetailCatalog,
) -> Vec<RelatedSolution> {
    let Some(id) = state.current_node_id.as_deref() else {
        return Vec::new();
    };

    flow.outgoing(id)
        .filter(|edge| edge.is_dotted)
        .filter_map(|edge| {
            catalog.solution(&edge.to).map(|details| RelatedSolution {
                node_id: edge.to.clone(),
                details: details.clone(),
                label: edge.label.clone(),
            })
        })
        .collect()
}
