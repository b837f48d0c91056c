//! Terminal presentation for flows and the interactive walk

use anyhow::Result;
use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};
use unicode_width::UnicodeWidthStr;

use wayfinder::prelude::*;

const PROGRESS_BAR_WIDTH: usize = 20;

/// Print a plain-text summary of a parsed flow
pub fn print_flow_summary(flow: &ParsedFlow) {
    println!(
        "{} nodes, {} edges, {} symptoms, {} solutions",
        flow.node_count(),
        flow.edge_count(),
        flow.symptoms().count(),
        flow.solutions().count()
    );
    println!();

    for node in flow.nodes() {
        println!("  [{}] {} ({})", node.id, node.label, node.node_type);
    }
    println!();

    for edge in flow.edges() {
        let arrow = if edge.is_dotted { "-.->" } else { "-->" };
        match &edge.label {
            Some(label) => println!("  {} {} {} ({})", edge.from, arrow, edge.to, label),
            None => println!("  {} {} {}", edge.from, arrow, edge.to),
        }
    }
}

/// Print the entry symptoms of a flow, one per line
pub fn print_symptoms(symptoms: &[FlowNode]) {
    if symptoms.is_empty() {
        println!("no entry symptoms found");
        return;
    }

    let id_width = symptoms
        .iter()
        .map(|n| UnicodeWidthStr::width(n.id.as_str()))
        .max()
        .unwrap_or(0);

    for node in symptoms {
        let mut line = format!("  {}  {}", pad_to(&node.id, id_width), node.label);
        if let Some(description) = &node.description {
            line.push_str(&format!(" - {}", description));
        }
        println!("{}", line);
    }
}

/// Drive an interactive wizard session over stdin/stdout
pub fn walk(mut wizard: Wizard, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if wizard.state().is_idle() {
            print_symptom_menu(&wizard, use_color);
        } else {
            print_step(&wizard, use_color);
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?.trim().to_lowercase();

        match input.as_str() {
            "q" | "quit" => break,
            "r" | "restart" => wizard.reset(),
            "b" | "back" => wizard.go_back(),
            _ => apply_choice(&mut wizard, &input),
        }
    }

    Ok(())
}

/// Resolve a numbered choice against the current menu
fn apply_choice(wizard: &mut Wizard, input: &str) {
    let Ok(choice) = input.parse::<usize>() else {
        println!("unrecognized input; enter a number, b, r, or q");
        return;
    };
    let index = choice.wrapping_sub(1);

    if wizard.state().is_idle() {
        let symptoms = wizard.symptoms();
        match symptoms.get(index) {
            Some(symptom) => wizard.select_symptom(&symptom.id),
            None => println!("no symptom numbered {}", choice),
        }
    } else {
        let options = wizard.options();
        match options.get(index) {
            Some(option) => wizard.select_option(&option.target, Some(&option.label)),
            None => println!("no option numbered {}", choice),
        }
    }
}

fn print_symptom_menu(wizard: &Wizard, use_color: bool) {
    println!();
    println!("{}", paint("What are you seeing?", Color::Cyan, use_color));
    for (index, symptom) in wizard.symptoms().iter().enumerate() {
        println!("  {}. {}", index + 1, symptom.label);
    }
    println!("  (number to choose, q to quit)");
}

fn print_step(wizard: &Wizard, use_color: bool) {
    println!();

    if let Some(node) = wizard.current_node() {
        let color = kind_color(node.node_type);
        println!("{}", paint(&node.label, color, use_color));

        let help = wizard.diagnostic_details().help_text;
        if let Some(help) = help {
            println!("  {}", paint(&help, Color::DarkGrey, use_color));
        }
    } else {
        println!("(nothing to show for this step)");
    }

    println!(
        "  {} {}%",
        progress_bar(wizard.progress(), PROGRESS_BAR_WIDTH),
        wizard.progress()
    );

    if wizard.is_solution() {
        print_solution(wizard, use_color);
    }

    let options = wizard.options();
    if !options.is_empty() {
        let label_width = options
            .iter()
            .map(|o| UnicodeWidthStr::width(o.label.as_str()))
            .max()
            .unwrap_or(0);
        for (index, option) in options.iter().enumerate() {
            let marker = if option.is_dotted { "(related)" } else { "" };
            println!(
                "  {}. {} {}",
                index + 1,
                pad_to(&option.label, label_width),
                marker
            );
        }
    }
    println!("  (number to choose, b back, r restart, q quit)");
}

fn print_solution(wizard: &Wizard, use_color: bool) {
    let details = wizard.solution_details();
    if !details.title.is_empty() {
        println!("  {}", paint(&details.title, Color::Green, use_color));
        if !details.subtitle.is_empty() {
            println!("  {}", details.subtitle);
        }
        if !details.description.is_empty() {
            println!("  {}", details.description);
        }
        for benefit in &details.benefits {
            println!("   - {}", benefit);
        }
        if let Some(pricing) = &details.pricing {
            println!("  pricing: {}", pricing);
        }
        if !details.docs_url.is_empty() {
            println!("  docs: {}", details.docs_url);
        }
    }

    let related = wizard.related_solutions();
    if !related.is_empty() {
        println!("  {}", paint("also consider:", Color::Yellow, use_color));
        for rel in related {
            match rel.label {
                Some(label) => println!("   - {} ({})", rel.details.title, label),
                None => println!("   - {}", rel.details.title),
            }
        }
    }
}

fn kind_color(node_type: NodeType) -> Color {
    match node_type {
        NodeType::Symptom => Color::Red,
        NodeType::Diagnostic => Color::Yellow,
        NodeType::Solution => Color::Green,
        NodeType::Future => Color::Magenta,
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Right-pad to a display width, counting wide characters properly
fn pad_to(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(current)));
    padded
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent) * width / 100;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}
