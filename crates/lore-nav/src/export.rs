//! Export a resolved relation panel as DOT (Graphviz) or Mermaid flowchart.

use crate::lookup::ResolutionKind;
use crate::resolver::RelationPanel;
use std::fmt::Write;

/// Export format for panel visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            "mermaid" => Ok(ExportFormat::Mermaid),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

fn dot_shape(kind: ResolutionKind) -> &'static str {
    match kind {
        ResolutionKind::Champion => "box",
        ResolutionKind::Lore => "ellipse",
        ResolutionKind::Unknown => "note",
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Export the panel as a DOT (Graphviz) string.
///
/// The focal entity is node `focal`; targets are `n0`, `n1`, ... in display order.
pub fn export_dot(panel: &RelationPanel) -> String {
    let mut out = String::new();
    writeln!(out, "digraph Relations {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [fontsize=10];").unwrap();
    writeln!(
        out,
        "  focal [shape=doublecircle, style=filled, fillcolor=\"#e0e0ff\", label=\"{}\"];",
        escape(&panel.focal_name)
    )
    .unwrap();
    writeln!(out).unwrap();

    for (i, relation) in panel.entries().enumerate() {
        let style = if relation.resolution.is_linkable() {
            "solid"
        } else {
            "dashed"
        };
        writeln!(
            out,
            "  n{} [shape={}, style={}, label=\"{}\"];",
            i,
            dot_shape(relation.resolution.kind),
            style,
            escape(&relation.target_name)
        )
        .unwrap();
        writeln!(
            out,
            "  focal -> n{} [style={}, color=\"{}\", label=\"{}\"];",
            i,
            style,
            relation.category.color_token(),
            escape(relation.relation_type.as_str())
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

/// Mermaid labels cannot contain quotes or pipes.
fn mermaid_label(text: &str) -> String {
    text.replace('"', "#quot;").replace('|', "/")
}

/// Export the panel as a Mermaid flowchart string.
pub fn export_mermaid(panel: &RelationPanel) -> String {
    let mut out = String::new();
    writeln!(out, "flowchart LR").unwrap();
    writeln!(out, "  focal((\"{}\"))", mermaid_label(&panel.focal_name)).unwrap();

    let mut link_styles = Vec::new();
    let mut unknown_nodes = Vec::new();
    for (i, relation) in panel.entries().enumerate() {
        let label = mermaid_label(&relation.target_name);
        let node = match relation.resolution.kind {
            ResolutionKind::Champion => format!("n{}[\"{}\"]", i, label),
            ResolutionKind::Lore => format!("n{}(\"{}\")", i, label),
            ResolutionKind::Unknown => {
                unknown_nodes.push(format!("n{}", i));
                format!("n{}[/\"{}\"/]", i, label)
            }
        };
        let arrow = if relation.resolution.is_linkable() {
            "-->"
        } else {
            "-.->"
        };
        writeln!(
            out,
            "  focal {}|{}| {}",
            arrow,
            mermaid_label(relation.relation_type.as_str()),
            node
        )
        .unwrap();
        link_styles.push(format!(
            "  linkStyle {} stroke:{}",
            i,
            relation.category.color_token()
        ));
    }

    for line in link_styles {
        writeln!(out, "{}", line).unwrap();
    }
    if !unknown_nodes.is_empty() {
        writeln!(out, "  classDef unknown stroke-dasharray: 5 5").unwrap();
        writeln!(out, "  class {} unknown", unknown_nodes.join(",")).unwrap();
    }

    out
}

/// Export the panel in the specified format.
pub fn export(panel: &RelationPanel, format: ExportFormat) -> String {
    match format {
        ExportFormat::Dot => export_dot(panel),
        ExportFormat::Mermaid => export_mermaid(panel),
    }
}
