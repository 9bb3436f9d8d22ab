// ABOUTME: Serializes a workflow graph to the Graphviz DOT language
// ABOUTME: Quotes every identifier and carries entry-node styling as node attributes

use std::fmt::Write;

use crate::graph::WorkflowGraph;

/// Render `graph` as a DOT `digraph`. Nodes and edges keep insertion order.
pub fn to_dot(graph: &WorkflowGraph) -> String {
    let mut output = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(output, "digraph \"{}\" {{", escape_dot_string(graph.name()));

    for node in graph.nodes() {
        let id = escape_dot_string(&node.name);
        match &node.style {
            Some(style) => {
                let _ = writeln!(
                    output,
                    "  \"{}\" [style=\"{}\", fillcolor=\"{}\"];",
                    id,
                    escape_dot_string(&style.style),
                    escape_dot_string(&style.fill_color)
                );
            }
            None => {
                let _ = writeln!(output, "  \"{}\";", id);
            }
        }
    }

    for (from, to) in graph.edges() {
        let _ = writeln!(
            output,
            "  \"{}\" -> \"{}\";",
            escape_dot_string(from),
            escape_dot_string(to)
        );
    }

    output.push_str("}\n");
    output
}

/// Escape a string for use inside a double-quoted DOT identifier.
pub fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
