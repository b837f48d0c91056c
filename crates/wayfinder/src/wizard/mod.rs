//! The wizard engine
//!
//! [`WizardState`] plus the pure transition functions in [`state`] are the
//! whole state machine; [`Wizard`] bundles them with a shared flow and a
//! detail catalog into a convenient object for hosts that want to hold one
//! session. The flow itself is immutable and can back any number of
//! concurrent sessions.

pub mod catalog;
pub mod state;
pub mod views;

use std::sync::Arc;

use crate::core::{FlowNode, NextOption, PathStep};
use crate::flow::ParsedFlow;

pub use catalog::{DestinationKind, DetailCatalog, DiagnosticInfo, SolutionInfo, SymptomInfo};
pub use state::WizardState;
pub use views::{RelatedSolution, ESTIMATED_DECISION_DEPTH};

/// One interactive troubleshooting session
///
/// # Example
///
/// ```rust
/// use wayfinder::prelude::*;
///
/// let source = r#"
/// flowchart LR
/// S1["Slow queries"]
/// D1{"Check indexes?"}
/// SOL_1["Add index"]
/// S1-->D1
/// D1-->|"yes"|SOL_1
/// classDef sol fill:#d1fae5
/// class SOL_1 sol
/// "#;
///
/// let mut wizard = Wizard::from_source(source);
/// wizard.select_symptom("S1");
/// // D1 has a single forced option, so the walk runs straight to the fix
/// assert_eq!(wizard.state().path, vec!["S1", "D1", "SOL_1"]);
/// assert!(wizard.state().is_complete);
/// assert_eq!(wizard.progress(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct Wizard {
    flow: Arc<ParsedFlow>,
    catalog: DetailCatalog,
    state: WizardState,
}

impl Wizard {
    /// Create a session over a shared flow with an empty catalog
    pub fn new(flow: Arc<ParsedFlow>) -> Self {
        Self {
            flow,
            catalog: DetailCatalog::new(),
            state: WizardState::default(),
        }
    }

    /// Create a session over a shared flow with detail tables attached
    pub fn with_catalog(flow: Arc<ParsedFlow>, catalog: DetailCatalog) -> Self {
        Self {
            flow,
            catalog,
            state: WizardState::default(),
        }
    }

    /// Parse `source` and open a session on the result
    pub fn from_source(source: &str) -> Self {
        Self::new(Arc::new(crate::flow::parse_flow(source)))
    }

    /// The underlying flow
    pub fn flow(&self) -> &ParsedFlow {
        &self.flow
    }

    /// The catalog backing detail joins
    pub fn catalog(&self) -> &DetailCatalog {
        &self.catalog
    }

    /// The current navigation state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Start a walk from an entry symptom
    pub fn select_symptom(&mut self, symptom_id: &str) {
        self.state = state::select_symptom(&self.flow, symptom_id);
    }

    /// Take one of the current options
    pub fn select_option(&mut self, node_id: &str, choice_label: Option<&str>) {
        self.state = state::select_option(&self.flow, &self.state, node_id, choice_label);
    }

    /// Step back to the previous path entry
    pub fn go_back(&mut self) {
        self.state = state::go_back(&self.state);
    }

    /// Return to the Idle state
    pub fn reset(&mut self) {
        self.state = state::reset();
    }

    /// The node the wizard is currently on
    pub fn current_node(&self) -> Option<&FlowNode> {
        views::current_node(&self.flow, &self.state)
    }

    /// All options from the current node, dotted ones included
    pub fn options(&self) -> Vec<NextOption> {
        views::options(&self.flow, &self.state)
    }

    /// True when the current node is a solution (or future) node
    pub fn is_solution(&self) -> bool {
        views::is_solution(&self.flow, &self.state)
    }

    /// Progress estimate in percent
    pub fn progress(&self) -> u8 {
        views::progress(&self.state)
    }

    /// The resolved path so far, with recorded choice labels
    pub fn path_history(&self) -> Vec<PathStep> {
        views::path_history(&self.flow, &self.state)
    }

    /// Dotted links from the current node to cataloged solutions
    pub fn related_solutions(&self) -> Vec<RelatedSolution> {
        views::related_solutions(&self.flow, &self.state, &self.catalog)
    }

    /// Catalog record for the current node as a solution (default on a miss)
    pub fn solution_details(&self) -> SolutionInfo {
        self.state
            .current_node_id
            .as_deref()
            .map(|id| self.catalog.solution_details(id))
            .unwrap_or_default()
    }

    /// Catalog record for the current node as a diagnostic (default on a miss)
    pub fn diagnostic_details(&self) -> DiagnosticInfo {
        self.state
            .current_node_id
            .as_deref()
            .map(|id| self.catalog.diagnostic_details(id))
            .unwrap_or_default()
    }

    /// Entry symptoms of the flow, enriched from the catalog
    pub fn symptoms(&self) -> Vec<FlowNode> {
        self.flow
            .symptoms()
            .map(|node| self.catalog.enrich(node))
            .collect()
    }
}
