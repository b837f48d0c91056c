//! Class resolution (first pass)
//!
//! `classDef` lines map a class name to a node-type bucket via a color
//! heuristic on the style string; `class` lines map node ids to class names.
//! Assignments may appear anywhere in the source, including before the nodes
//! they style are defined, so this scan runs to completion before the graph
//! is built.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::core::NodeType;
use crate::flow::grammar::{match_line, LineStatement};

// Color words and Tailwind palette steps checked as case-insensitive
// substrings of the full style string, one family per bucket.
const RED_TOKENS: &[&str] = &[
    "red", "rose", "fee2e2", "fecaca", "fca5a5", "f87171", "ef4444", "dc2626", "b91c1c",
];
const AMBER_TOKENS: &[&str] = &[
    "yellow", "amber", "fef3c7", "fde68a", "fcd34d", "fbbf24", "f59e0b", "d97706", "b45309",
];
const GREEN_TOKENS: &[&str] = &[
    "green", "emerald", "d1fae5", "a7f3d0", "6ee7b7", "34d399", "10b981", "059669", "047857",
];
const INDIGO_TOKENS: &[&str] = &[
    "indigo", "purple", "violet", "e0e7ff", "c7d2fe", "a5b4fc", "818cf8", "6366f1", "4f46e5",
    "a855f7", "8b5cf6", "7c3aed",
];

/// Lookups built by the first pass over the diagram source
#[derive(Debug, Default, Clone)]
pub struct ClassIndex {
    /// Class name -> node-type bucket (classes with unrecognized colors are absent)
    buckets: HashMap<String, NodeType>,
    /// Node id -> class name (later assignments overwrite earlier ones)
    assignments: HashMap<String, String>,
}

impl ClassIndex {
    /// Single forward scan over all lines of the source
    pub fn scan(source: &str) -> Self {
        let mut index = Self::default();

        for line in source.lines() {
            match match_line(line) {
                Some(LineStatement::ClassDef { name, style }) => {
                    if let Some(bucket) = bucket_for_style(&style) {
                        trace!(class = %name, ?bucket, "classDef mapped to bucket");
                        index.buckets.insert(name, bucket);
                    } else {
                        trace!(class = %name, "classDef colors match no bucket; ignored");
                    }
                }
                Some(LineStatement::ClassAssign { ids, class }) => {
                    for id in ids {
                        index.assignments.insert(id, class.clone());
                    }
                }
                _ => {}
            }
        }

        debug!(
            bucket_count = index.buckets.len(),
            assignment_count = index.assignments.len(),
            "class scan completed"
        );
        index
    }

    /// Bucket for a class name, if its colors mapped to one
    pub fn bucket(&self, class: &str) -> Option<NodeType> {
        self.buckets.get(class).copied()
    }

    /// Bucket for a node id, going through its class assignment
    pub fn bucket_for_node(&self, id: &str) -> Option<NodeType> {
        self.assignments.get(id).and_then(|class| self.bucket(class))
    }

    /// Iterate over all node-id -> class-name assignments
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(id, class)| (id.as_str(), class.as_str()))
    }
}

/// Map a classDef style string to a node-type bucket
///
/// First matching family wins, checked red, amber, green, indigo.
fn bucket_for_style(style: &str) -> Option<NodeType> {
    let style = style.to_ascii_lowercase();
    let contains_any = |tokens: &[&str]| tokens.iter().any(|t| style.contains(t));

    if contains_any(RED_TOKENS) {
        Some(NodeType::Symptom)
    } else if contains_any(AMBER_TOKENS) {
        Some(NodeType::Diagnostic)
    } else if contains_any(GREEN_TOKENS) {
        Some(NodeType::Solution)
    } else if contains_any(INDIGO_TOKENS) {
        Some(NodeType::Future)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_heuristic() {
        assert_eq!(bucket_for_style("fill:#fee2e2"), Some(NodeType::Symptom));
        assert_eq!(
            bucket_for_style("fill:#fef3c7,stroke:#f59e0b"),
            Some(NodeType::Diagnostic)
        );
        assert_eq!(bucket_for_style("fill:#d1fae5"), Some(NodeType::Solution));
        assert_eq!(
            bucket_for_style("fill:#e0e7ff,stroke:#6366f1"),
            Some(NodeType::Future)
        );
        assert_eq!(bucket_for_style("fill:lightgreen"), Some(NodeType::Solution));
        assert_eq!(bucket_for_style("FILL:#D1FAE5"), Some(NodeType::Solution));
        // No recognized family
        assert_eq!(bucket_for_style("fill:#3ecf8e,color:#fff"), None);
        assert_eq!(bucket_for_style("stroke-width:4px"), None);
    }

    #[test]
    fn test_scan_builds_both_lookups() {
        let source = r#"
flowchart TD
    classDef sym fill:#fee2e2
    classDef sol fill:#d1fae5
    classDef plain stroke-width:2px
    class S1,S2 sym
    class SOL_1 sol
    class X1 plain
"#;
        let index = ClassIndex::scan(source);

        assert_eq!(index.bucket("sym"), Some(NodeType::Symptom));
        assert_eq!(index.bucket("sol"), Some(NodeType::Solution));
        assert_eq!(index.bucket("plain"), None);
        assert_eq!(index.bucket("missing"), None);

        assert_eq!(index.bucket_for_node("S1"), Some(NodeType::Symptom));
        assert_eq!(index.bucket_for_node("S2"), Some(NodeType::Symptom));
        assert_eq!(index.bucket_for_node("SOL_1"), Some(NodeType::Solution));
        // Assigned to a class with no bucket
        assert_eq!(index.bucket_for_node("X1"), None);
        assert_eq!(index.bucket_for_node("unassigned"), None);
    }

    #[test]
    fn test_later_assignment_overwrites() {
        let source = r#"
classDef a fill:#fee2e2
classDef b fill:#d1fae5
class N1 a
class N1 b
"#;
        let index = ClassIndex::scan(source);
        assert_eq!(index.bucket_for_node("N1"), Some(NodeType::Solution));
    }

    #[test]
    fn test_assignments_before_definitions() {
        // class lines may precede the classDef they reference
        let source = "class S1 late\nclassDef late fill:#fee2e2";
        let index = ClassIndex::scan(source);
        assert_eq!(index.bucket_for_node("S1"), Some(NodeType::Symptom));
    }
}
