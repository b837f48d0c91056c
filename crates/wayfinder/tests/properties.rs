//! Property-based invariant tests for the flow parser and the wizard walk
//!
//! These verify invariants that must hold for **any** diagram in the
//! supported subset:
//!
//! 1. Parse determinism - same input always yields an identical flow
//! 2. Edge closure - every edge endpoint resolves to a node after parsing
//! 3. Terminal consistency - `is_terminal` matches its definition exactly
//! 4. Walk termination and shape - `select_symptom` always terminates, the
//!    path starts at the selected symptom, and completion implies a
//!    terminal current node
//! 5. Progress bounds - progress is always within 0..=100, and capped at 90
//!    while incomplete

use proptest::prelude::*;
use wayfinder::prelude::*;
use wayfinder::wizard::{state, views};

/// Ids drawn from the three conventions plus an unconventional one
fn arb_node_id() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..30).prop_map(|n| format!("S{}", n)),
        (1u8..30).prop_map(|n| format!("D{}", n)),
        (1u8..10).prop_map(|n| format!("SOL_{}", n)),
        (1u8..10).prop_map(|n| format!("N{}", n)),
    ]
}

fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z ?']{1,24}".prop_map(|s| s.trim().to_string())
}

/// One line of diagram source in the supported subset
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        // Standalone nodes, rectangle and decision
        (arb_node_id(), arb_label()).prop_map(|(id, l)| format!("{}[\"{}\"]", id, l)),
        (arb_node_id(), arb_label()).prop_map(|(id, l)| format!("{}{{\"{}\"}}", id, l)),
        // Edges: plain, piped label, inline label, dotted
        (arb_node_id(), arb_node_id()).prop_map(|(a, b)| format!("{} --> {}", a, b)),
        (arb_node_id(), arb_node_id(), arb_label())
            .prop_map(|(a, b, l)| format!("{}-->|\"{}\"|{}", a, l, b)),
        (arb_node_id(), arb_node_id(), arb_label())
            .prop_map(|(a, b, l)| format!("{} -- \"{}\" --> {}", a, l, b)),
        (arb_node_id(), arb_node_id()).prop_map(|(a, b)| format!("{} -.-> {}", a, b)),
        // Styling
        Just("classDef sol fill:#d1fae5".to_string()),
        (arb_node_id()).prop_map(|id| format!("class {} sol", id)),
        // Noise the parser must shrug off
        prop_oneof![
            Just("%% a comment".to_string()),
            Just("this line is not part of the grammar".to_string()),
        ],
    ]
}

fn arb_source() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_line(), 0..40)
        .prop_map(|lines| format!("flowchart TD\n{}\n", lines.join("\n")))
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(source in arb_source()) {
        prop_assert_eq!(parse_flow(&source), parse_flow(&source));
    }

    #[test]
    fn prop_edge_endpoints_always_resolve(source in arb_source()) {
        let flow = parse_flow(&source);
        for edge in flow.edges() {
            prop_assert!(flow.has_node(&edge.from));
            prop_assert!(flow.has_node(&edge.to));
        }
    }

    #[test]
    fn prop_terminal_matches_definition(source in arb_source()) {
        let flow = parse_flow(&source);
        for node in flow.nodes() {
            let expected = node.node_type.is_terminal_kind()
                && !flow.outgoing(&node.id).any(|e| !e.is_dotted);
            prop_assert_eq!(flow.is_terminal(&node.id), expected);
        }
    }

    #[test]
    fn prop_symptom_list_is_entry_convention_only(source in arb_source()) {
        let flow = parse_flow(&source);
        for symptom in flow.symptoms() {
            prop_assert_eq!(symptom.node_type, NodeType::Symptom);
            prop_assert!(symptom.id.starts_with('S'));
            prop_assert!(symptom.id[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn prop_walk_terminates_with_sane_shape(source in arb_source()) {
        let flow = parse_flow(&source);
        let starts: Vec<String> = flow.symptoms().map(|n| n.id.clone()).collect();
        for start in starts {
            let state = state::select_symptom(&flow, &start);
            prop_assert_eq!(state.path.first().map(String::as_str), Some(start.as_str()));
            prop_assert!(state.path.len() <= flow.node_count() + 1);
            prop_assert_eq!(
                state.current_node_id.as_deref(),
                state.path.last().map(String::as_str)
            );
            if state.is_complete {
                let current = state.current_node_id.as_deref().unwrap();
                prop_assert!(flow.is_terminal(current));
            }
        }
    }

    #[test]
    fn prop_progress_is_bounded(source in arb_source()) {
        let flow = parse_flow(&source);
        let starts: Vec<String> = flow.symptoms().map(|n| n.id.clone()).collect();
        for start in starts {
            let state = state::select_symptom(&flow, &start);
            let progress = views::progress(&state);
            prop_assert!(progress <= 100);
            if !state.is_complete {
                prop_assert!(progress <= 90);
            }
        }
    }
}
