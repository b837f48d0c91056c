//! Wizard state and pure transitions
//!
//! The state machine has three shapes: Idle (`current_node_id` is `None`),
//! InProgress, and Complete (`is_complete` set). Each transition function
//! takes the old state by reference and returns a whole new state value, so
//! hosts can wire them into any event-dispatch model and state updates are
//! always atomic.

use std::collections::HashMap;

use tracing::debug;

use crate::flow::ParsedFlow;

/// One wizard session's navigation state
///
/// `path` holds visited node ids in order and may contain duplicates when
/// the underlying graph has cycles. Choice labels are keyed by the path
/// index at which the choice was made; they exist only for path-history
/// display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    /// Visited node ids, in order
    pub path: Vec<String>,
    /// Node the wizard is currently on, `None` when idle
    pub current_node_id: Option<String>,
    /// True once the walk landed on a terminal node
    pub is_complete: bool,
    choice_labels: HashMap<usize, String>,
}

impl WizardState {
    /// The label recorded for the step at `index` of the path, if any
    pub fn choice_label(&self, index: usize) -> Option<&str> {
        self.choice_labels.get(&index).map(String::as_str)
    }

    /// True when no walk is in progress
    pub fn is_idle(&self) -> bool {
        self.current_node_id.is_none()
    }
}

/// The empty Idle state
pub fn reset() -> WizardState {
    WizardState::default()
}

/// Start a walk from an entry symptom
///
/// Clears any previous choice-label history, then advances through forced
/// steps to the first decision point (or terminal node) reachable from
/// `symptom_id`.
pub fn select_symptom(flow: &ParsedFlow, symptom_id: &str) -> WizardState {
    let path = advance_to_decision(flow, symptom_id);
    debug!(symptom = %symptom_id, landed = ?path.last(), "symptom selected");
    settle(flow, path, HashMap::new())
}

/// Take one of the current options
///
/// A supplied `choice_label` describes the transition being made and is
/// recorded at the index equal to the current path length, before the new
/// sub-path is appended. The decision-point search starts fresh from
/// `node_id` and its result is appended to the existing path.
pub fn select_option(
    flow: &ParsedFlow,
    state: &WizardState,
    node_id: &str,
    choice_label: Option<&str>,
) -> WizardState {
    let mut choice_labels = state.choice_labels.clone();
    if let Some(label) = choice_label {
        choice_labels.insert(state.path.len(), label.to_string());
    }

    let segment = advance_to_decision(flow, node_id);
    let mut path = state.path.clone();
    path.extend(segment);

    debug!(option = %node_id, landed = ?path.last(), "option selected");
    settle(flow, path, choice_labels)
}

/// Step back to the previous path entry
///
/// Dropping the only remaining entry yields the empty Idle state. The
/// completion flag is cleared unconditionally, even when the node stepped
/// back onto is itself terminal.
pub fn go_back(state: &WizardState) -> WizardState {
    if state.path.len() <= 1 {
        return WizardState::default();
    }

    let mut path = state.path.clone();
    path.pop();
    let current_node_id = path.last().cloned();

    WizardState {
        path,
        current_node_id,
        is_complete: false,
        choice_labels: state.choice_labels.clone(),
    }
}

/// Build the settled state for a finished walk segment
fn settle(flow: &ParsedFlow, path: Vec<String>, choice_labels: HashMap<usize, String>) -> WizardState {
    let current_node_id = path.last().cloned();
    let is_complete = current_node_id
        .as_deref()
        .is_some_and(|id| flow.is_terminal(id));

    WizardState {
        path,
        current_node_id,
        is_complete,
        choice_labels,
    }
}

/// Walk forced steps from `start` until a decision point or terminal node
///
/// A node with exactly one non-dotted option is advanced through; a
/// Solution/Future node stops the walk immediately even if it has a single
/// onward option. Zero or multiple non-dotted options stop at the current
/// node. The step count is bounded by the node count so a cycle of
/// single-option nodes cannot spin forever.
fn advance_to_decision(flow: &ParsedFlow, start: &str) -> Vec<String> {
    let mut path = vec![start.to_string()];
    let mut current = start.to_string();

    for _ in 0..flow.node_count() {
        let mut forced = flow
            .options_from(&current)
            .into_iter()
            .filter(|o| !o.is_dotted);
        let only = match (forced.next(), forced.next()) {
            (Some(option), None) => option,
            _ => break,
        };

        current = only.target;
        path.push(current.clone());

        let reached_terminal_kind = flow
            .get_node(&current)
            .map_or(true, |n| n.node_type.is_terminal_kind());
        if reached_terminal_kind {
            break;
        }
    }

    path
}
