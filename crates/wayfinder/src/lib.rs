//! Wayfinder - Flowchart-driven troubleshooting wizards
//!
//! A library for parsing a restricted Mermaid-style flowchart language into
//! a decision graph and walking that graph as an interactive
//! symptom → diagnostic → solution wizard.
//!
//! # Quick Start
//!
//! ```rust
//! use wayfinder::prelude::*;
//!
//! let source = "flowchart TD\nS1[\"Slow queries\"]\nS1-->SOL_FIX\nSOL_FIX[\"Add an index\"]";
//!
//! let mut wizard = Wizard::from_source(source);
//! wizard.select_symptom("S1");
//! assert!(wizard.state().is_complete);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use wayfinder::flow::ParseCache;
//! use wayfinder::prelude::*;
//! use std::sync::Arc;
//!
//! let source = "S1[\"Slow queries\"]\nD1{\"Read heavy?\"}\nS1-->D1";
//!
//! // Parse once, share everywhere
//! let mut cache = ParseCache::new();
//! let flow = cache.get_or_parse(source);
//! assert_eq!(flow.node_count(), 2);
//!
//! // Any number of sessions can walk the same flow
//! let mut session = Wizard::new(Arc::clone(&flow));
//! session.select_symptom("S1");
//! assert_eq!(session.current_node().unwrap().id, "D1");
//! ```
//!
//! Parsing is permissive by design: the diagram source is an internally
//! authored constant, so unrecognized lines are dropped silently instead of
//! reported. Navigation is equally defensive; ids missing from the node map
//! produce empty derived views, never errors.

pub mod core;
pub mod flow;
pub mod wizard;

pub use crate::core::{FlowEdge, FlowNode, NextOption, NodeType, PathStep, WayfinderError};
pub use crate::flow::{parse_flow, ParseCache, ParsedFlow};
pub use crate::wizard::{DetailCatalog, Wizard, WizardState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{FlowEdge, FlowNode, NextOption, NodeType, PathStep, WayfinderError};
    pub use crate::flow::{parse_flow, ParseCache, ParsedFlow};
    pub use crate::wizard::{
        DestinationKind, DetailCatalog, DiagnosticInfo, RelatedSolution, SolutionInfo,
        SymptomInfo, Wizard, WizardState,
    };
}
