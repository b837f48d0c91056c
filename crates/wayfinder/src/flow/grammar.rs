//! Line grammar for the flowchart subset
//!
//! One chumsky parser per grammar construct, combined as ordered
//! alternatives. The order is load-bearing: a line is classified by the
//! first construct that matches it in full, so decision nodes are tried
//! before bracket nodes and dotted edges before solid ones. Anything that
//! matches no construct is dropped without a diagnostic; the diagram source
//! is internally authored, not untrusted input.

use chumsky::prelude::*;
use chumsky::text::ident;
use tracing::trace;

/// A single recognized line of diagram source
#[derive(Debug, Clone, PartialEq)]
pub enum LineStatement {
    /// `subgraph ID["Label"]` - opens the (single) subgraph context
    SubgraphOpen(String),
    /// `end` - clears the subgraph context
    SubgraphEnd,
    /// `classDef NAME fill:#...,stroke:#...`
    ClassDef { name: String, style: String },
    /// `class ID1,ID2 NAME`
    ClassAssign { ids: Vec<String>, class: String },
    /// `A --> B`, `A -- "label" --> B`, `A -->|"label"| B`, `A -.-> B`, ...
    Edge {
        from: String,
        to: String,
        label: Option<String>,
        dotted: bool,
    },
    /// `ID["Label"]` or `ID{"Label"}` (decision)
    Node {
        id: String,
        label: String,
        decision: bool,
    },
}

/// Classify a single line of diagram source
///
/// Returns `None` for blank lines, comments, the `flowchart` header, and any
/// line no construct recognizes.
pub fn match_line(line: &str) -> Option<LineStatement> {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.starts_with("%%") || trimmed.starts_with("flowchart") {
        return None;
    }

    let result = line_parser()
        .then_ignore(end())
        .parse(trimmed)
        .into_result()
        .ok();

    if result.is_none() {
        trace!(line = %trimmed, "no grammar rule matched; line dropped");
    }

    result
}

fn line_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    subgraph_open_parser()
        .or(subgraph_end_parser())
        .or(classdef_parser())
        .or(class_assign_parser())
        .or(edge_parser())
        .or(node_parser())
}

/// Inline whitespace (spaces and tabs); lines never contain newlines here
fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Required inline whitespace after a keyword
fn whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse `subgraph ID["Label"]` (straight or curly quotes, or no quotes)
///
/// Only the ID matters downstream; the display label is dropped.
fn subgraph_open_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    let bracket_label = just('[')
        .ignore_then(none_of("]\n").repeated().at_least(1).collect::<String>())
        .then_ignore(just(']'));

    just("subgraph")
        .then(whitespace_required())
        .ignore_then(ident().map(|s: &str| s.to_string()))
        .then_ignore(bracket_label.or_not())
        .then_ignore(inline_whitespace())
        .map(LineStatement::SubgraphOpen)
}

/// Parse a line that is exactly `end`
///
/// The end-of-input check lives inside this matcher so that ids merely
/// starting with "end" fall through to the node/edge alternatives.
fn subgraph_end_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    just("end").then_ignore(end()).to(LineStatement::SubgraphEnd)
}

/// Parse `classDef className fill:#f9f,stroke:#333`
fn classdef_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    just("classDef")
        .then(whitespace_required())
        .ignore_then(ident().map(|s: &str| s.to_string()))
        .then_ignore(whitespace_required())
        .then(style_string_parser())
        .map(|(name, style)| LineStatement::ClassDef { name, style })
}

/// Parse `class nodeId1,nodeId2 className`
fn class_assign_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    just("class")
        .then(whitespace_required())
        .ignore_then(id_list_parser())
        .then_ignore(whitespace_required())
        .then(ident().map(|s: &str| s.to_string()))
        .then_ignore(inline_whitespace())
        .map(|(ids, class)| LineStatement::ClassAssign { ids, class })
}

/// Parse a comma-separated list of identifiers: `A,B,C`
fn id_list_parser<'src>() -> impl Parser<'src, &'src str, Vec<String>> + Clone {
    ident()
        .map(|s: &str| s.to_string())
        .separated_by(just(',').padded_by(inline_whitespace()))
        .at_least(1)
        .collect()
}

/// Parse a style string: `fill:#f9f,stroke:#333,stroke-width:4px`
fn style_string_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    none_of("\n\r;")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|s| s.trim().to_string())
}

/// Parse edge lines, tried in order: dotted (optional piped label), solid
/// with an inline label between `--` and `-->`, solid arrow with an
/// optional piped label (which also covers the plain `A --> B` form)
fn edge_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    let node_id = ident().map(|s: &str| s.to_string());

    // |"label"|
    let piped_label = just('|')
        .ignore_then(none_of("|\n").repeated().at_least(1).collect::<String>())
        .then_ignore(just('|'))
        .then_ignore(inline_whitespace());

    // A -.-> B  or  A -.-> |"label"| B
    let dotted = node_id
        .clone()
        .then_ignore(inline_whitespace())
        .then_ignore(just("-.->"))
        .then_ignore(inline_whitespace())
        .then(piped_label.clone().or_not())
        .then(node_id.clone())
        .map(|((from, label), to)| LineStatement::Edge {
            from,
            to,
            label: label.map(|l| strip_label(&l)),
            dotted: true,
        });

    // A -- "label" --> B
    let solid_inline_label = node_id
        .clone()
        .then_ignore(inline_whitespace())
        .then_ignore(just("--"))
        .then_ignore(inline_whitespace())
        .then(
            any()
                .and_is(just("-->").not())
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .then_ignore(just("-->"))
        .then_ignore(inline_whitespace())
        .then(node_id.clone())
        .map(|((from, label), to)| LineStatement::Edge {
            from,
            to,
            label: Some(strip_label(&label)),
            dotted: false,
        });

    // A --> B  or  A --> |"label"| B
    let solid = node_id
        .clone()
        .then_ignore(inline_whitespace())
        .then_ignore(just("-->"))
        .then_ignore(inline_whitespace())
        .then(piped_label.or_not())
        .then(node_id)
        .map(|((from, label), to)| LineStatement::Edge {
            from,
            to,
            label: label.map(|l| strip_label(&l)),
            dotted: false,
        });

    dotted.or(solid_inline_label).or(solid)
}

/// Parse node definitions: decision `ID{"Label"}` before rectangle `ID["Label"]`
fn node_parser<'src>() -> impl Parser<'src, &'src str, LineStatement> + Clone {
    let node_id = ident().map(|s: &str| s.to_string());

    let decision = node_id
        .clone()
        .then_ignore(just('{'))
        .then(none_of("{}\n").repeated().at_least(1).collect::<String>())
        .then_ignore(just('}'))
        .map(|(id, label)| LineStatement::Node {
            id,
            label: strip_label(&label),
            decision: true,
        });

    let rectangle = node_id
        .then_ignore(just('['))
        .then(none_of("[]\n").repeated().at_least(1).collect::<String>())
        .then_ignore(just(']'))
        .map(|(id, label)| LineStatement::Node {
            id,
            label: strip_label(&label),
            decision: false,
        });

    decision.or(rectangle)
}

/// Trim a raw label and strip one or more layers of surrounding quotes
/// (straight double, straight single, curly)
pub(crate) fn strip_label(raw: &str) -> String {
    const QUOTE_PAIRS: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

    let mut s = raw.trim();
    loop {
        let mut stripped = false;
        for (open, close) in QUOTE_PAIRS {
            if s.starts_with(open)
                && s.ends_with(close)
                && s.len() >= open.len_utf8() + close.len_utf8()
            {
                s = s[open.len_utf8()..s.len() - close.len_utf8()].trim();
                stripped = true;
            }
        }
        if !stripped {
            break;
        }
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_comments_and_header() {
        assert_eq!(match_line(""), None);
        assert_eq!(match_line("   "), None);
        assert_eq!(match_line("%% S1: Slow query performance"), None);
        assert_eq!(match_line("flowchart TD"), None);
        assert_eq!(match_line("flowchart LR"), None);
    }

    #[test]
    fn test_subgraph_open_and_end() {
        assert_eq!(
            match_line(r#"subgraph SYMPTOMS["Observable symptoms"]"#),
            Some(LineStatement::SubgraphOpen("SYMPTOMS".to_string()))
        );
        assert_eq!(
            match_line("subgraph DIAGNOSTICS['Diagnostic questions']"),
            Some(LineStatement::SubgraphOpen("DIAGNOSTICS".to_string()))
        );
        assert_eq!(match_line("end"), Some(LineStatement::SubgraphEnd));
        // An id that merely starts with "end" is still a node
        assert_eq!(
            match_line("endpoint[\"Not a subgraph close\"]"),
            Some(LineStatement::Node {
                id: "endpoint".to_string(),
                label: "Not a subgraph close".to_string(),
                decision: false,
            })
        );
    }

    #[test]
    fn test_classdef() {
        assert_eq!(
            match_line("classDef sol fill:#d1fae5,stroke:#10b981"),
            Some(LineStatement::ClassDef {
                name: "sol".to_string(),
                style: "fill:#d1fae5,stroke:#10b981".to_string(),
            })
        );
    }

    #[test]
    fn test_class_assignment() {
        assert_eq!(
            match_line("class S1,S2,S3 symptom"),
            Some(LineStatement::ClassAssign {
                ids: vec!["S1".to_string(), "S2".to_string(), "S3".to_string()],
                class: "symptom".to_string(),
            })
        );
    }

    #[test]
    fn test_classdef_not_mistaken_for_class() {
        // "classDef" shares a prefix with "class"; priority order decides
        let parsed = match_line("classDef warn fill:#fef3c7");
        assert!(matches!(parsed, Some(LineStatement::ClassDef { .. })));
    }

    #[test]
    fn test_solid_edge_without_label() {
        assert_eq!(
            match_line("S1 --> D1"),
            Some(LineStatement::Edge {
                from: "S1".to_string(),
                to: "D1".to_string(),
                label: None,
                dotted: false,
            })
        );
        // No spaces
        assert_eq!(
            match_line("S1-->D1"),
            Some(LineStatement::Edge {
                from: "S1".to_string(),
                to: "D1".to_string(),
                label: None,
                dotted: false,
            })
        );
    }

    #[test]
    fn test_solid_edge_with_inline_label() {
        assert_eq!(
            match_line(r#"D1 -- "Read-heavy (mostly SELECTs)" --> D4"#),
            Some(LineStatement::Edge {
                from: "D1".to_string(),
                to: "D4".to_string(),
                label: Some("Read-heavy (mostly SELECTs)".to_string()),
                dotted: false,
            })
        );
    }

    #[test]
    fn test_solid_edge_with_piped_label() {
        assert_eq!(
            match_line(r#"D1-->|"yes"|SOL_1"#),
            Some(LineStatement::Edge {
                from: "D1".to_string(),
                to: "SOL_1".to_string(),
                label: Some("yes".to_string()),
                dotted: false,
            })
        );
    }

    #[test]
    fn test_dotted_edges() {
        assert_eq!(
            match_line("SOL_OPTIMIZE -.-> SOL_COMPUTE"),
            Some(LineStatement::Edge {
                from: "SOL_OPTIMIZE".to_string(),
                to: "SOL_COMPUTE".to_string(),
                label: None,
                dotted: true,
            })
        );
        assert_eq!(
            match_line(r#"SOL_RR -.-> |"When you outgrow replicas"| SOL_MULTI"#),
            Some(LineStatement::Edge {
                from: "SOL_RR".to_string(),
                to: "SOL_MULTI".to_string(),
                label: Some("When you outgrow replicas".to_string()),
                dotted: true,
            })
        );
    }

    #[test]
    fn test_rectangle_node() {
        assert_eq!(
            match_line(r#"S1["Slow query performance"]"#),
            Some(LineStatement::Node {
                id: "S1".to_string(),
                label: "Slow query performance".to_string(),
                decision: false,
            })
        );
        // Unquoted label
        assert_eq!(
            match_line("S2[High CPU]"),
            Some(LineStatement::Node {
                id: "S2".to_string(),
                label: "High CPU".to_string(),
                decision: false,
            })
        );
    }

    #[test]
    fn test_decision_node() {
        assert_eq!(
            match_line(r#"D1{"Check indexes?"}"#),
            Some(LineStatement::Node {
                id: "D1".to_string(),
                label: "Check indexes?".to_string(),
                decision: true,
            })
        );
        assert_eq!(
            match_line("D2{Workload type}"),
            Some(LineStatement::Node {
                id: "D2".to_string(),
                label: "Workload type".to_string(),
                decision: true,
            })
        );
    }

    #[test]
    fn test_unrecognized_lines_are_dropped() {
        assert_eq!(match_line("linkStyle 0 stroke:#ff3"), None);
        assert_eq!(match_line("A ==> B"), None);
        assert_eq!(match_line("A --o B"), None);
        assert_eq!(match_line("completely bogus line !!!"), None);
    }

    #[test]
    fn test_chained_edges_collapse_like_a_lazy_regex() {
        // Chains are outside the subset; the inline-label matcher swallows
        // the middle segment as a label, same as the lazy-regex original
        assert_eq!(
            match_line("A --> B --> C"),
            Some(LineStatement::Edge {
                from: "A".to_string(),
                to: "C".to_string(),
                label: Some("> B".to_string()),
                dotted: false,
            })
        );
    }

    #[test]
    fn test_strip_label_quotes() {
        assert_eq!(strip_label(r#""Add index""#), "Add index");
        assert_eq!(strip_label("'Add index'"), "Add index");
        assert_eq!(strip_label("“Add index”"), "Add index");
        assert_eq!(strip_label(r#"  "padded"  "#), "padded");
        // Interior apostrophes survive
        assert_eq!(
            strip_label(r#""Can't connect from corporate network""#),
            "Can't connect from corporate network"
        );
        // A lone quote is not a pair
        assert_eq!(strip_label("\""), "\"");
    }
}
