//! External detail tables
//!
//! The diagram only carries ids and labels; descriptive metadata (titles,
//! pricing, benefits, docs links) lives in separate per-node tables supplied
//! by the host, typically loaded from JSON. Joins are defensive: a missing
//! entry yields a default record, never an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{FlowNode, NodeType, WayfinderError};

/// Where choosing a solution ultimately sends the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// A product feature page
    #[default]
    Feature,
    /// A documentation guide
    Docs,
    /// A video tutorial
    Video,
}

/// Descriptive record for a solution node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionInfo {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub pricing: Option<String>,
    pub docs_url: String,
    pub icon: String,
    /// Set for roadmap items that are not available yet
    pub availability: Option<String>,
    pub destination: DestinationKind,
    /// Video id when `destination` is `Video`
    pub video_id: Option<String>,
}

/// Descriptive record for a symptom node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomInfo {
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Descriptive record for a diagnostic node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticInfo {
    pub title: String,
    pub help_text: Option<String>,
}

/// Id-keyed detail tables for every node kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailCatalog {
    solutions: HashMap<String, SolutionInfo>,
    symptoms: HashMap<String, SymptomInfo>,
    diagnostics: HashMap<String, DiagnosticInfo>,
}

impl DetailCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, WayfinderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw lookup: solution record for a node id, if one was supplied
    pub fn solution(&self, id: &str) -> Option<&SolutionInfo> {
        self.solutions.get(id)
    }

    /// Solution record for a node id, default on a miss
    pub fn solution_details(&self, id: &str) -> SolutionInfo {
        self.solutions.get(id).cloned().unwrap_or_default()
    }

    /// Symptom record for a node id, default on a miss
    pub fn symptom_details(&self, id: &str) -> SymptomInfo {
        self.symptoms.get(id).cloned().unwrap_or_default()
    }

    /// Diagnostic record for a node id, default on a miss
    pub fn diagnostic_details(&self, id: &str) -> DiagnosticInfo {
        self.diagnostics.get(id).cloned().unwrap_or_default()
    }

    /// Register a solution record
    pub fn insert_solution(&mut self, id: impl Into<String>, info: SolutionInfo) {
        self.solutions.insert(id.into(), info);
    }

    /// Register a symptom record
    pub fn insert_symptom(&mut self, id: impl Into<String>, info: SymptomInfo) {
        self.symptoms.insert(id.into(), info);
    }

    /// Register a diagnostic record
    pub fn insert_diagnostic(&mut self, id: impl Into<String>, info: DiagnosticInfo) {
        self.diagnostics.insert(id.into(), info);
    }

    /// Copy a node with its enrichment fields filled from the matching table
    ///
    /// Nodes without a catalog entry come back unchanged.
    pub fn enrich(&self, node: &FlowNode) -> FlowNode {
        let mut enriched = node.clone();
        match node.node_type {
            NodeType::Solution | NodeType::Future => {
                if let Some(info) = self.solutions.get(&node.id) {
                    enriched.description = Some(info.description.clone());
                    enriched.pricing = info.pricing.clone();
                    enriched.benefits = Some(info.benefits.clone());
                    enriched.url = Some(info.docs_url.clone());
                    enriched.icon = Some(info.icon.clone());
                }
            }
            NodeType::Symptom => {
                if let Some(info) = self.symptoms.get(&node.id) {
                    enriched.description = Some(info.description.clone());
                    enriched.icon = Some(info.icon.clone());
                }
            }
            NodeType::Diagnostic => {
                if let Some(info) = self.diagnostics.get(&node.id) {
                    enriched.description = info.help_text.clone();
                }
            }
        }
        enriched
    }
}
